use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use buyer::{Buyer, BuyerConfig};
use clap::Parser;
use runtime::{init_tracing, spawn_signal_listener, CancellationToken};
use store::RedisStore;
use tracing::info;
use types::config::DEFAULT_REDIS_ADDR;

#[derive(Parser, Debug)]
#[command(name = "buyer", version, about = "Pops one order off the shared queue every tick")]
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

    let buyer = Buyer::new(Arc::new(store), BuyerConfig::default());
    buyer.run(stop).await;

    info!("Leaving...");
    Ok(ExitCode::FAILURE)
}
