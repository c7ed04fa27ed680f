//! Integration tests for the NATS connection pool.
//!
//! These need a running NATS server and are ignored by default. Run them with
//! `cargo test --test nats_transport -- --ignored`, pointing
//! `SHUTTLE_TEST_NATS_URL` at the server (default `nats://localhost:4222`).

use shuttle::transport::nats::{ConnectionPool, NatsSettings};

fn server_url() -> String {
    std::env::var("SHUTTLE_TEST_NATS_URL").unwrap_or_else(|_| "nats://localhost:4222".to_string())
}

#[tokio::test]
#[ignore = "requires a NATS server"]
async fn acquire_reuses_the_cached_client() {
    let mut pool = ConnectionPool::new(NatsSettings::new(server_url(), None));

    let first = pool.acquire().await.unwrap();
    let second = pool.acquire().await.unwrap();

    assert!(pool.is_open());
    assert_eq!(first.server_info().client_id, second.server_info().client_id);

    pool.close().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a NATS server"]
async fn close_clears_the_cache_and_next_acquire_reconnects() {
    let mut pool = ConnectionPool::new(NatsSettings::new(server_url(), None));

    let before = pool.acquire().await.unwrap();
    pool.close().await.unwrap();
    assert!(!pool.is_open());

    let after = pool.acquire().await.unwrap();
    assert!(pool.is_open());
    assert_ne!(before.server_info().client_id, after.server_info().client_id);

    pool.close().await.unwrap();
}
