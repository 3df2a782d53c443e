//! Listener lifecycle
//!
//! Running → Draining on cancellation. Draining clears the health flag
//! first, stops accepting connections, then gives in-flight requests a
//! bounded grace period.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::bail;
use axum::Router;
use runtime::{CancellationToken, HealthFlag};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Serve `app` on `listener` until `stop` is cancelled and the drain completes.
///
/// Fails if in-flight requests are still running once `grace` has elapsed
/// after cancellation.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    health: HealthFlag,
    stop: CancellationToken,
    grace: Duration,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;

    let drain_health = health.clone();
    let drain_signal = stop.clone();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        drain_signal.cancelled().await;
        drain_health.set_unhealthy();
        info!("Server is shutting down...");
    })
    .into_future();
    tokio::pin!(server);

    health.set_healthy();
    info!(%addr, "Server is ready to handle requests");

    let deadline = async {
        stop.cancelled().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        res = &mut server => res?,
        _ = deadline => {
            error!(grace_secs = grace.as_secs(), "Could not gracefully shutdown the server");
            bail!("in-flight requests still running {}s after shutdown", grace.as_secs());
        }
    }

    info!("Server stopped");
    Ok(())
}
