//! Tracing initialization.

use tracing_subscriber::filter::EnvFilter;

/// Install the global tracing subscriber.
///
/// `WAYPOINT_LOG` controls the filter (standard `EnvFilter` syntax, e.g.
/// `waypoint_analysis=debug`); `fallback` applies when the variable is unset.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_env("WAYPOINT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("tracing subscriber installed");
    }
}
