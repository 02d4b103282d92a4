//! CLI error types.

use readme_sync_config::ConfigError;
use readme_sync_confluence::SyncError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Sync(#[from] SyncError),
}
