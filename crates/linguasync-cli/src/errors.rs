//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use linguasync_addons::AddonError;
use linguasync_config::ConfigError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("repository root '{}' is not accessible: {source}", path.display())]
    Root {
        path: PathBuf,
        source: Arc<io::Error>,
    },
    #[error("another run holds the lock '{}'", path.display())]
    Locked { path: PathBuf },
    #[error("failed to create lock file '{}': {source}", path.display())]
    Lock {
        path: PathBuf,
        source: Arc<io::Error>,
    },
    #[error("failed to load alert state '{}': {message}", path.display())]
    AlertState { path: PathBuf, message: String },
    #[error("the {event} event requires --{argument}")]
    MissingArgument {
        event: &'static str,
        argument: &'static str,
    },
    #[error("'{0}' is not a translation of this component")]
    UnknownTranslation(String),
    #[error(transparent)]
    Addon(#[from] AddonError),
    #[error("failed to serialise output: {0}")]
    Serialise(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("{failed} addon(s) failed")]
    AddonsFailed { failed: usize },
}
