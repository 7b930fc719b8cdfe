use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::Verbosity;

/// Environment variable holding an `EnvFilter` directive that overrides the verbosity.
pub const LOG_ENV_VAR: &str = "BOINC_RPC_LOG";

/// Builds the filter for `verbosity`, preferring a valid `BOINC_RPC_LOG` directive.
#[must_use]
pub fn build_filter(verbosity: Verbosity) -> EnvFilter {
    match std::env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive.trim())
            .unwrap_or_else(|_| EnvFilter::new(verbosity.directive())),
        _ => EnvFilter::new(verbosity.directive()),
    }
}

/// Installs a formatted stderr subscriber for GUI-RPC events.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one keeps receiving events.
pub fn init_tracing(verbosity: Verbosity) -> bool {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_filter(verbosity))
        .with(fmt_layer)
        .try_init()
        .is_ok()
}
