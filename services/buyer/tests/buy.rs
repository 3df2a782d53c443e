//! Buyer contract tests: LIFO consumption, idle ticks, and loop survival.

use std::sync::Arc;
use std::time::Duration;

use buyer::{BuyOutcome, Buyer, BuyerConfig};
use runtime::CancellationToken;
use store::{MemoryStore, QueueStore};
use types::keys::QUEUE_KEY;

fn buyer_over(store: Arc<MemoryStore>) -> Buyer {
    Buyer::new(store, BuyerConfig::default())
}

#[tokio::test]
async fn test_empty_queue_is_not_an_error() {
    let store = Arc::new(MemoryStore::new());
    let buyer = buyer_over(store);

    assert_eq!(buyer.buy().await, BuyOutcome::Empty);
    assert_eq!(buyer.buy().await, BuyOutcome::Empty);
    assert_eq!(buyer.idle(), 2);
    assert_eq!(buyer.failed(), 0);
}

#[tokio::test]
async fn test_buys_newest_order_first() {
    let store = Arc::new(MemoryStore::new());
    store.push_head(QUEUE_KEY, "first").await.unwrap();
    store.push_head(QUEUE_KEY, "second").await.unwrap();
    let buyer = buyer_over(store.clone());

    assert_eq!(buyer.buy().await, BuyOutcome::Bought("second".into()));
    assert_eq!(buyer.tick().await, BuyOutcome::Bought("first".into()));
    assert_eq!(buyer.tick().await, BuyOutcome::Empty);
    assert_eq!(buyer.bought(), 2);
}

#[tokio::test]
async fn test_pops_exactly_one_per_tick() {
    let store = Arc::new(MemoryStore::new());
    for _ in 0..5 {
        store.push_head(QUEUE_KEY, "1").await.unwrap();
    }
    let buyer = buyer_over(store.clone());

    buyer.tick().await;
    assert_eq!(store.len(QUEUE_KEY).await.unwrap(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_keeps_ticking_on_empty_queue() {
    let store = Arc::new(MemoryStore::new());
    let buyer = Arc::new(buyer_over(store.clone()));
    let stop = CancellationToken::new();

    let handle = {
        let buyer = buyer.clone();
        let stop = stop.clone();
        tokio::spawn(async move { buyer.run(stop).await })
    };

    // Three idle ticks, then an order shows up.
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    store.push_head(QUEUE_KEY, "1").await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    stop.cancel();

    assert_eq!(handle.await.unwrap(), 5);
    assert_eq!(buyer.bought(), 1);
    assert_eq!(buyer.idle(), 4);
    assert_eq!(store.len(QUEUE_KEY).await.unwrap(), 0);
}
