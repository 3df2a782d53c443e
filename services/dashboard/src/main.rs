use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dashboard::generator::{GeneratorConfig, SyntheticFeed};
use dashboard::router::create_router;
use dashboard::server::serve;
use dashboard::state::AppState;
use runtime::{init_tracing, spawn_signal_listener, CancellationToken, HealthFlag};
use store::RedisStore;
use tokio::net::TcpListener;
use types::config::{DEFAULT_BINDING, DEFAULT_REDIS_ADDR, SHUTDOWN_GRACE};

#[derive(Parser, Debug)]
#[command(name = "dashboard", version, about = "Queue size, synthetic ticks and readiness over HTTP")]
struct Cli {
    /// Redis address (host:port)
    #[arg(long, env = "ACME_REDIS", default_value = DEFAULT_REDIS_ADDR)]
    redis: String,

    /// Server listen address (host:port)
    #[arg(long, env = "ACME_BINDING", default_value = DEFAULT_BINDING)]
    binding: String,

    /// Directory holding the front-end served at `/`
    #[arg(long, env = "ACME_STATIC_DIR", default_value = "./static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_tracing();
    let cli = Cli::parse();

    tracing::info!("Starting Dashboard service");

    let store = RedisStore::connect(&cli.redis)
        .await
        .with_context(|| format!("Failed to connect to Redis on {}", cli.redis))?;
    let store = Arc::new(store);

    let stop = CancellationToken::new();
    spawn_signal_listener(stop.clone());

    let health = HealthFlag::new();
    let state = AppState::new(store.clone(), health.clone());

    // Synthetic series runs independently of HTTP traffic.
    let feed = Arc::new(SyntheticFeed::from_entropy(store, GeneratorConfig::default()));
    let feed_task = {
        let feed = feed.clone();
        let stop = stop.clone();
        tokio::spawn(async move { feed.run(stop).await })
    };

    let app = create_router(state, &cli.static_dir);

    tracing::info!(binding = %cli.binding, "Server is starting");
    let listener = TcpListener::bind(&cli.binding)
        .await
        .with_context(|| format!("Could not listen on {}", cli.binding))?;

    let served = serve(listener, app, health, stop.clone(), SHUTDOWN_GRACE).await;

    // Listener failures must not leave the feed ticking.
    stop.cancel();
    feed_task.await.context("Synthetic feed task panicked")?;

    served
}
