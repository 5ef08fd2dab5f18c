//! Telemetry setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber: `RUST_LOG` wins, otherwise the given
/// default directives.
///
/// Call once at process startup, before the store handles traffic:
///
/// ```no_run
/// session_shared::telemetry::init_telemetry("session_redis=debug,info");
/// ```
pub fn init_telemetry(default_directives: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json())
        .init();
}
