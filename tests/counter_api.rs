//! End-to-end tests against a real PostgreSQL instance.
//!
//! Ignored by default. Run with a disposable database:
//!
//! ```text
//! TEST_DATABASE_URL=postgres://postgres@localhost:5432/postgres \
//!     cargo test -- --ignored
//! ```
//!
//! All tests share the single `counter` row, so they serialize on a lock
//! and reset the row to zero before driving the API.

#![allow(clippy::panic)]

use std::net::SocketAddr;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Mutex;

use tally_service::api;
use tally_service::api::dto::CounterResponse;
use tally_service::app_state::AppState;
use tally_service::error::ErrorCode;
use tally_service::persistence::CounterStore;

static DB_LOCK: Mutex<()> = Mutex::const_new(());

fn database_url() -> String {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .unwrap_or_else(|_| "postgres://postgres@localhost:5432/postgres".to_string())
}

async fn connect() -> PgPool {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url())
        .await;
    let Ok(pool) = pool else {
        panic!("test database unreachable; set TEST_DATABASE_URL");
    };
    pool
}

/// Initializes the store and forces the counter back to zero.
async fn fresh_store(pool: &PgPool) -> CounterStore {
    let store = CounterStore::new(pool.clone());
    let Ok(()) = store.initialize().await else {
        panic!("initialize failed");
    };
    let reset = sqlx::query("UPDATE counter SET count = 0 WHERE id = 1")
        .execute(pool)
        .await;
    let Ok(_) = reset else {
        panic!("reset failed");
    };
    store
}

/// Serves the full router on an ephemeral port, returning its base URL.
async fn spawn_app(store: CounterStore) -> String {
    let app = api::build_router().with_state(AppState { store });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await;
    let Ok(listener) = listener else {
        panic!("ephemeral bind failed");
    };
    let addr: SocketAddr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(_) => panic!("listener has no local addr"),
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn get_count(client: &reqwest::Client, base: &str) -> CounterResponse {
    let response = client.get(format!("{base}/api/count")).send().await;
    let Ok(response) = response else {
        panic!("GET /api/count failed");
    };
    let Ok(envelope) = response.json().await else {
        panic!("invalid envelope");
    };
    envelope
}

async fn post_increment(client: &reqwest::Client, base: &str) -> CounterResponse {
    let response = client.post(format!("{base}/api/increment")).send().await;
    let Ok(response) = response else {
        panic!("POST /api/increment failed");
    };
    let Ok(envelope) = response.json().await else {
        panic!("invalid envelope");
    };
    envelope
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (TEST_DATABASE_URL)"]
async fn initialize_is_idempotent() {
    let _guard = DB_LOCK.lock().await;
    let pool = connect().await;
    let store = fresh_store(&pool).await;

    // Move the counter off zero, then initialize again.
    let Ok(_) = store.increment().await else {
        panic!("increment failed");
    };
    let Ok(()) = store.initialize().await else {
        panic!("second initialize failed");
    };

    let Ok(row) = store.fetch().await else {
        panic!("fetch failed");
    };
    assert_eq!(row.count, 1, "re-initialization must not reset the count");

    let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM counter WHERE id = 1")
        .fetch_one(&pool)
        .await;
    assert_eq!(rows.ok(), Some(1));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (TEST_DATABASE_URL)"]
async fn read_after_write_returns_exact_count() {
    let _guard = DB_LOCK.lock().await;
    let pool = connect().await;
    let base = spawn_app(fresh_store(&pool).await).await;
    let client = reqwest::Client::new();

    for _ in 0..5 {
        let envelope = post_increment(&client, &base).await;
        assert!(envelope.success);
    }

    let envelope = get_count(&client, &base).await;
    assert!(envelope.success);
    assert_eq!(envelope.count, Some(5));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (TEST_DATABASE_URL)"]
async fn sequential_increments_are_strictly_increasing() {
    let _guard = DB_LOCK.lock().await;
    let pool = connect().await;
    let base = spawn_app(fresh_store(&pool).await).await;
    let client = reqwest::Client::new();

    let mut previous = 0;
    for _ in 0..10 {
        let envelope = post_increment(&client, &base).await;
        let Some(count) = envelope.count else {
            panic!("increment returned no count");
        };
        assert!(count > previous);
        previous = count;
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (TEST_DATABASE_URL)"]
async fn concurrent_increments_lose_no_updates() {
    let _guard = DB_LOCK.lock().await;
    let pool = connect().await;
    let store = fresh_store(&pool).await;
    let base = spawn_app(store.clone()).await;
    let client = reqwest::Client::new();

    const K: i32 = 20;
    let mut handles = Vec::with_capacity(K as usize);
    for _ in 0..K {
        let client = client.clone();
        let base = base.clone();
        handles.push(tokio::spawn(
            async move { post_increment(&client, &base).await },
        ));
    }

    let mut seen = Vec::with_capacity(K as usize);
    for handle in handles {
        let Ok(envelope) = handle.await else {
            panic!("increment task panicked");
        };
        assert!(envelope.success);
        let Some(count) = envelope.count else {
            panic!("increment returned no count");
        };
        seen.push(count);
    }

    // Every caller observed a distinct post-increment value.
    seen.sort_unstable();
    assert_eq!(seen, (1..=K).collect::<Vec<_>>());

    let Ok(row) = store.fetch().await else {
        panic!("fetch failed");
    };
    assert_eq!(row.count, K);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (TEST_DATABASE_URL)"]
async fn missing_row_reports_counter_not_found() {
    let _guard = DB_LOCK.lock().await;
    let pool = connect().await;
    let base = spawn_app(fresh_store(&pool).await).await;
    let client = reqwest::Client::new();

    // Delete the singleton out-of-band.
    let deleted = sqlx::query("DELETE FROM counter WHERE id = 1")
        .execute(&pool)
        .await;
    let Ok(_) = deleted else {
        panic!("delete failed");
    };

    let envelope = get_count(&client, &base).await;
    assert!(!envelope.success);
    assert_eq!(envelope.error, Some(ErrorCode::CounterNotFound));

    let envelope = post_increment(&client, &base).await;
    assert!(!envelope.success);
    assert_eq!(envelope.error, Some(ErrorCode::CounterNotFound));
}
