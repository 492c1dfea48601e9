//! Exclusive lock held for the duration of one run.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use crate::errors::AppError;

const LOCK_TARGET: &str = "linguasync::lock";

/// Lock file that is removed again when dropped.
#[derive(Debug)]
pub(crate) struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Creates the lock file, failing when another run already holds it.
    pub(crate) fn acquire(path: &Path) -> Result<Self, AppError> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        match options.open(path) {
            Ok(mut file) => {
                writeln!(file, "{}", std::process::id()).map_err(|source| AppError::Lock {
                    path: path.to_path_buf(),
                    source: Arc::new(source),
                })?;
                Ok(Self {
                    path: path.to_path_buf(),
                })
            }
            Err(error) if error.kind() == io::ErrorKind::AlreadyExists => Err(AppError::Locked {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(AppError::Lock {
                path: path.to_path_buf(),
                source: Arc::new(source),
            }),
        }
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => warn!(
                target: LOCK_TARGET,
                path = %self.path.display(),
                %error,
                "failed to remove lock file"
            ),
        }
    }
}
