//! Logging setup for the CLI
//!
//! Logs go to stderr so PNG paths and listings on stdout stay clean. Set
//! `DEBUG_LOGGING=1` to enable debug output for the hudkit crates, or
//! `RUST_LOG` for a custom filter.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEBUG_FILTER: &str = "info,hudkit=debug,hudkit_core=debug,hudkit_overlay=debug";

/// Initialize the global subscriber. Call once at startup.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let filter = if debug_logging {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,hudkit=info"))
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}
