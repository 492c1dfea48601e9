use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Shape of the diagnostic lines written to `stderr`.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One terse line per event, for interactive runs.
    #[default]
    Compact,
    /// One JSON object per event, for CI job logs.
    Json,
}

/// Error returned when a log format name is not recognised.
pub type LogFormatParseError = strum::ParseError;
