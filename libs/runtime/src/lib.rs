//! Process scaffolding shared by the seller, buyer and dashboard.
//!
//! Each service is a `tokio` program whose loops race a periodic timer against
//! a [`CancellationToken`](tokio_util::sync::CancellationToken) that is
//! cancelled when the process receives SIGINT or SIGTERM.

pub mod health;
pub mod shutdown;
pub mod telemetry;
pub mod ticker;

pub use health::HealthFlag;
pub use shutdown::{spawn_signal_listener, wait_for_signal};
pub use telemetry::init_tracing;
pub use ticker::run_every;
pub use tokio_util::sync::CancellationToken;
