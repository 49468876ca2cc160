//! Logging and tracing initialization.
//!
//! Call one of these once at application startup, before constructing the
//! [`SessionStore`](crate::SessionStore). The log level is controlled by
//! the `RUST_LOG` environment variable:
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! RUST_LOG=gem_session=debug,reqwest=warn cargo run
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with sensible defaults.
///
/// Defaults to `info` when `RUST_LOG` is not set.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed. Only call it
/// once at startup.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize logging with a specific level, ignoring `RUST_LOG` unless it
/// is set.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed. Only call it
/// once at startup.
pub fn init_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
