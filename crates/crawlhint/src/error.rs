//! CLI error types.

use crawlhint_config::ConfigError;
use crawlhint_vcs::VcsError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Vcs(#[from] VcsError),
}
