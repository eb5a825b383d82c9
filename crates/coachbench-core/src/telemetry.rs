//! Tracing setup for the coachbench binary.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence for filtering; otherwise `level` is the
/// default verbosity. With `json` set, log lines are emitted as
/// newline-delimited JSON for aggregation pipelines.
///
/// Calling this more than once is harmless; only the first call installs
/// the subscriber.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let builder = fmt().with_env_filter(filter).with_target(false);

    if json {
        builder.json().try_init().ok();
    } else {
        builder.try_init().ok();
    }
}
