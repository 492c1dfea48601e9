//! Default values shared by the configuration file and the CLI.

/// Name of the configuration file looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = "linguasync.json";

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default upper bound on one external tool run, in seconds.
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 120;

/// Default state directory, relative to the repository root.
pub const DEFAULT_STATE_DIR: &str = ".linguasync";

/// Default file mask of the translation files.
pub const DEFAULT_FILEMASK: &str = "po/*.po";

/// Default source language code.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Default translation file format identifier.
pub const DEFAULT_FILE_FORMAT: &str = "po";

pub(crate) fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

pub(crate) const fn default_tool_timeout_secs() -> u64 {
    DEFAULT_TOOL_TIMEOUT_SECS
}
