use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Read {
        /// Configuration file path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
    /// The configuration file is not valid JSON for [`crate::Config`].
    #[error("failed to parse configuration '{path}': {message}")]
    Parse {
        /// Configuration file path.
        path: Utf8PathBuf,
        /// Parser message including line and column.
        message: String,
    },
    /// A value is out of range or inconsistent.
    #[error("invalid configuration value for '{field}': {message}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },
    /// The state directory could not be created.
    #[error("failed to prepare state directory '{}': {source}", path.display())]
    StateDir {
        /// Directory path.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
    /// A path is not valid UTF-8.
    #[error("path '{path}' is not valid UTF-8")]
    NonUtf8Path {
        /// Lossy rendering of the path.
        path: String,
    },
}
