//! Listener lifecycle over a real socket: ready once bound, unhealthy and
//! stopped once cancelled.

use std::sync::Arc;
use std::time::Duration;

use dashboard::router::create_router;
use dashboard::server::serve;
use dashboard::state::AppState;
use runtime::{CancellationToken, HealthFlag};
use store::{MemoryStore, QueueStore};
use tokio::net::TcpListener;
use types::keys::QUEUE_KEY;

#[tokio::test]
async fn test_ready_then_drained() {
    let store = Arc::new(MemoryStore::new());
    for _ in 0..3 {
        store.push_head(QUEUE_KEY, "1").await.unwrap();
    }

    let health = HealthFlag::new();
    let stop = CancellationToken::new();
    let app = create_router(AppState::new(store, health.clone()), "static");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve(
        listener,
        app,
        health.clone(),
        stop.clone(),
        Duration::from_secs(5),
    ));

    let res = reqwest::get(format!("http://{addr}/healthz")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NO_CONTENT);
    assert!(res.headers().contains_key("x-request-id"));

    let res = reqwest::get(format!("http://{addr}/size")).await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["size"], 3);

    stop.cancel();
    server.await.unwrap().unwrap();
    assert!(!health.is_healthy());
}
