//! Diagnostic logging for addon runs.
//!
//! Addon and tool events are written to `stderr`, leaving `stdout` to the
//! JSON change reports. The filter uses `tracing` directive syntax, so a
//! single addon can be traced with `linguasync_addons::orchestrator=debug`.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use linguasync_config::{Config, LogFormat};

static SUBSCRIBER_INSTALLED: OnceCell<()> = OnceCell::new();

/// Reasons diagnostic logging could not be set up.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The `log_filter` setting is not a valid directive list.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Another logger already owns the process.
    #[error("cannot enable diagnostic logging: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Routes addon diagnostics to `stderr` using the configured filter and
/// format. Only the first call in a process takes effect, so repeated
/// command runs in tests share one logger.
///
/// # Errors
///
/// Returns a [`TelemetryError`] when `log_filter` does not parse or a
/// different logger was installed first.
pub fn initialise(config: &Config) -> Result<(), TelemetryError> {
    SUBSCRIBER_INSTALLED
        .get_or_try_init(|| install_subscriber(config))
        .map(|_| ())
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;

    let builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr)
            // Plain text when stderr is captured by a job runner.
            .with_ansi(io::stderr().is_terminal())
            .with_timer(fmt::time::UtcTime::rfc_3339())
    };

    let subscriber: Box<dyn Subscriber + Send + Sync> = match config.log_format {
        LogFormat::Json => Box::new(builder(filter).json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder(filter).compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}
