use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use runtime::{init_tracing, spawn_signal_listener, CancellationToken};
use seller::{Seller, SellerConfig};
use store::RedisStore;
use tracing::info;
use types::config::DEFAULT_REDIS_ADDR;

#[derive(Parser, Debug)]
#[command(name = "seller", version, about = "Pushes randomized order batches onto the shared queue")]
struct Cli {
    /// Redis address (host:port)
    #[arg(long, env = "ACME_REDIS", default_value = DEFAULT_REDIS_ADDR)]
    redis: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let store = RedisStore::connect(&cli.redis)
        .await
        .with_context(|| format!("Failed to connect to Redis on {}", cli.redis))?;

    let stop = CancellationToken::new();
    spawn_signal_listener(stop.clone());

    let seller = Seller::from_entropy(Arc::new(store), SellerConfig::default());
    seller.run(stop).await;

    // Seller has no drain phase; a signal always means a non-zero exit.
    info!("Leaving...");
    Ok(ExitCode::FAILURE)
}
