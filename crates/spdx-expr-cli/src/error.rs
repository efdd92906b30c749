//! Error types for the command line tool.

use thiserror::Error;

/// Errors raised while assembling the tool's configuration.
#[derive(Debug, Error)]
pub enum CliError {
    /// An environment variable or flag carried an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
