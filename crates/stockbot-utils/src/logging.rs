//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_DIRECTIVE: &str = "warn,stockbot=info";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when present; otherwise `default_directive` is used.
/// Calling this twice is harmless: the second registration is ignored.
pub fn init_tracing(default_directive: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(default_directive))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

fn build_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}
