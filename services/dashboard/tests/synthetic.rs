//! Synthetic series tests
//!
//! Bounds of generated ticks for arbitrary seeds, and the feed's contract with
//! the histogram buffer and the `/histogram` route.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use dashboard::generator::{GeneratorConfig, SyntheticFeed, TickGenerator};
use dashboard::router::create_router;
use dashboard::state::AppState;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use runtime::{CancellationToken, HealthFlag};
use store::{MemoryStore, QueueStore};
use tower::ServiceExt;
use types::histogram::HistogramEntry;
use types::keys::HISTOGRAM_KEY;
use types::tick::MarketTick;

proptest! {
    #[test]
    fn prop_tick_within_step_of_seed(seed in 0.0f64..10_000.0, rng_seed in any::<u64>()) {
        let mut generator = TickGenerator::with_seed(ChaCha8Rng::seed_from_u64(rng_seed), seed, 5);
        let tick = generator.next_tick(0);

        prop_assert!(tick.open >= seed - 4.0 && tick.open <= seed + 4.0);
        prop_assert!(tick.close >= seed - 4.0 && tick.close <= seed + 4.0);
        prop_assert!(tick.high >= tick.open.max(tick.close));
        prop_assert!(tick.low <= tick.open.min(tick.close));
        prop_assert!(tick.is_valid());
        prop_assert_eq!(generator.seed(), tick.close);
    }

    #[test]
    fn prop_walk_stays_valid(rng_seed in any::<u64>(), steps in 1usize..200) {
        let mut generator = TickGenerator::new(ChaCha8Rng::seed_from_u64(rng_seed), 200.0, 5);
        for ts in 0..steps {
            let seed = generator.seed();
            let tick = generator.next_tick(ts as i64);
            prop_assert!(tick.close >= seed - 4.0 && tick.close <= seed + 4.0);
            prop_assert!(tick.is_valid());
        }
    }
}

#[test]
fn test_same_rng_seed_same_series() {
    let mut a = TickGenerator::new(ChaCha8Rng::seed_from_u64(17), 200.0, 5);
    let mut b = TickGenerator::new(ChaCha8Rng::seed_from_u64(17), 200.0, 5);
    for ts in 0..50 {
        assert_eq!(a.next_tick(ts), b.next_tick(ts));
    }
}

#[tokio::test]
async fn test_publish_pushes_tick_to_histogram_head() {
    let store = Arc::new(MemoryStore::new());
    let feed = SyntheticFeed::new(
        store.clone(),
        GeneratorConfig::default(),
        ChaCha8Rng::seed_from_u64(4),
    );

    let first = feed.publish_at(100).await.unwrap();
    let second = feed.publish_at(101).await.unwrap();

    let contents = store.contents(HISTOGRAM_KEY);
    assert_eq!(contents.len(), 2);
    let stored = |raw: &str| HistogramEntry::decode(raw).unwrap().as_tick().copied();
    assert_eq!(stored(&contents[0]), Some(second));
    assert_eq!(stored(&contents[1]), Some(first));
    assert_eq!(feed.published(), 2);
}

#[tokio::test]
async fn test_published_tick_round_trips_through_route() {
    let store = Arc::new(MemoryStore::new());
    let feed = SyntheticFeed::new(
        store.clone(),
        GeneratorConfig::default(),
        ChaCha8Rng::seed_from_u64(12),
    );
    let tick = feed.publish_at(1_700_000_000).await.unwrap();

    let app = create_router(AppState::new(store.clone(), HealthFlag::new()), "static");
    let res = app
        .oneshot(Request::builder().uri("/histogram").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let served: MarketTick = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(served, tick);
}

#[tokio::test(start_paused = true)]
async fn test_feed_runs_until_cancelled() {
    let store = Arc::new(MemoryStore::new());
    let feed = Arc::new(SyntheticFeed::new(
        store.clone(),
        GeneratorConfig::default(),
        ChaCha8Rng::seed_from_u64(1),
    ));
    let stop = CancellationToken::new();

    let handle = {
        let feed = feed.clone();
        let stop = stop.clone();
        tokio::spawn(async move { feed.run(stop).await })
    };

    tokio::time::sleep(Duration::from_millis(4_500)).await;
    stop.cancel();

    assert_eq!(handle.await.unwrap(), 4);
    assert_eq!(store.len(HISTOGRAM_KEY).await.unwrap(), 4);
    assert_eq!(feed.lost(), 0);
}
