use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset: catalog service spans at debug, the rest at info.
pub const DEFAULT_FILTER: &str = "info,service=debug,tower_http=info,axum=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Compact human-readable output on stdout.
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// JSON lines on stdout, one object per event, targets included.
pub fn init_logging_json() {
    // override with e.g. RUST_LOG=info,service::movie=trace
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}
