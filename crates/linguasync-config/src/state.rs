//! Paths of the files linguasync keeps between runs.
//!
//! The state directory holds the pending alerts consulted by the change gate
//! and the lock file that keeps two runs from editing the same tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{Config, ConfigError};

/// Canonical paths for state written by the CLI.
#[derive(Debug, Clone)]
pub struct StatePaths {
    state_dir: PathBuf,
    lock_path: PathBuf,
    alerts_path: PathBuf,
}

impl StatePaths {
    /// Derives and creates the state directory for the repository at
    /// `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StateDir`] when the directory cannot be created.
    pub fn from_config(config: &Config, root: &Path) -> Result<Self, ConfigError> {
        let state_dir = if config.state_dir.is_absolute() {
            config.state_dir.as_std_path().to_path_buf()
        } else {
            root.join(config.state_dir.as_std_path())
        };
        fs::create_dir_all(&state_dir).map_err(|source| ConfigError::StateDir {
            path: state_dir.clone(),
            source: Arc::new(source),
        })?;
        Ok(Self {
            lock_path: state_dir.join("run.lock"),
            alerts_path: state_dir.join("alerts.json"),
            state_dir,
        })
    }

    /// Directory holding the state files.
    #[must_use]
    pub fn state_dir(&self) -> &Path {
        self.state_dir.as_path()
    }

    /// Lock file guarding the repository during a run.
    #[must_use]
    pub fn lock_path(&self) -> &Path {
        self.lock_path.as_path()
    }

    /// JSON file with the pending alerts.
    #[must_use]
    pub fn alerts_path(&self) -> &Path {
        self.alerts_path.as_path()
    }
}
