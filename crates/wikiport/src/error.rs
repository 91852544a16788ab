//! CLI error types.

use wikiport_config::ConfigError;
use wikiport_export::ExportError;
use wikiport_tree::WalkError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Walk(#[from] WalkError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Strict(String),
}
