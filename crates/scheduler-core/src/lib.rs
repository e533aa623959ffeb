pub mod config;
pub mod error;
pub mod op_state;

pub use config::{Config, ValidationResult};
pub use error::{AppError, ConfigError, ImportError, StorageError, ValidationError};
pub use op_state::OpState;

use anyhow::Result;

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins over `fallback_filter`, and a blank fallback means `info`. Calling this more than once is
/// harmless; later calls keep the first subscriber.
pub fn init_with_filter(fallback_filter: &str) -> Result<()> {
    let fallback = if fallback_filter.trim().is_empty() {
        "info"
    } else {
        fallback_filter
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Scheduler core initialized");
    }
    Ok(())
}
