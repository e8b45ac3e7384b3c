//! Tracing subscriber setup for embedding applications.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Filtering comes from `RUST_LOG` when set, otherwise from `default_directive`
/// (e.g. `"info"` or `"trailmark=debug"`).
pub fn init_tracing(default_directive: &str) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    tracing::info!("Starting trailmark v{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// Logging setup errors.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Tracing subscriber already installed: {0}")]
    AlreadyInitialized(String),
}
