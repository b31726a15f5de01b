//! Subscriber setup for hosts and tests.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "puzzleroom=info";

/// Install a formatted subscriber.
///
/// `RUST_LOG` wins over `filter`; `None` falls back to [`DEFAULT_FILTER`].
/// Returns `false` if a global subscriber was already installed.
pub fn init(filter: Option<&str>) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
