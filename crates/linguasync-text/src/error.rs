//! Errors raised while reading and writing line documents.

use std::path::PathBuf;

use thiserror::Error;

/// Errors arising from text document I/O.
#[derive(Debug, Error)]
pub enum TextError {
    /// The file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid UTF-8 text.
    #[error("'{}' is not valid UTF-8 text", path.display())]
    Decode {
        /// File that was decoded.
        path: PathBuf,
        /// Underlying decoding error.
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The file could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        /// File that was written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl TextError {
    /// Returns `true` when the error reports undecodable file content.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
