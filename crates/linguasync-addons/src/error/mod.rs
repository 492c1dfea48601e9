//! Domain errors raised by addon operations.
//!
//! All errors use `thiserror`-derived enums with structured context so callers
//! can inspect the failure programmatically. I/O errors are wrapped in `Arc`
//! so the enum stays cheap to clone into alerts and logs.

use std::path::PathBuf;
use std::sync::Arc;

use linguasync_text::TextError;
use thiserror::Error;

/// Errors arising from addon registration and execution.
#[derive(Debug, Error)]
pub enum AddonError {
    /// The addon name does not belong to any known addon.
    #[error("unknown addon '{name}'")]
    UnknownAddon {
        /// Name that was looked up.
        name: String,
    },

    /// The addon was registered twice.
    #[error("addon '{name}' is already registered")]
    AlreadyRegistered {
        /// Addon name.
        name: String,
    },

    /// The addon cannot operate on the component.
    #[error("addon '{name}' cannot be installed: {reason}")]
    NotInstallable {
        /// Addon name.
        name: String,
        /// Why the eligibility check failed.
        reason: String,
    },

    /// Addon settings failed to deserialise or validate.
    #[error("invalid settings for addon '{name}': {message}")]
    Settings {
        /// Addon name.
        name: String,
        /// Description of the problem.
        message: String,
    },

    /// A filesystem operation failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A text document could not be read or written.
    #[error(transparent)]
    Text(#[from] TextError),

    /// A repository query failed.
    #[error("repository error: {message}")]
    Repository {
        /// Description of the failure.
        message: String,
    },

    /// A path escapes the repository or cannot be resolved.
    #[error("invalid repository path '{path}': {message}")]
    InvalidPath {
        /// Offending repository-relative path.
        path: String,
        /// Description of the failure.
        message: String,
    },

    /// Compiling a catalogue to its binary form failed.
    #[error("failed to compile '{}': {message}", path.display())]
    Compile {
        /// Catalogue being compiled.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },
}

impl AddonError {
    /// Wraps an I/O error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}

#[cfg(test)]
mod tests;
