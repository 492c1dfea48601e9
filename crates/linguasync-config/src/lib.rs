//! Runtime configuration for linguasync.
//!
//! Configuration lives in a JSON file, `linguasync.json` in the repository
//! root by default. Every field has a default so an absent file yields a
//! working setup for a conventional `po/` tree. Command-line flags are
//! layered on top through [`ConfigOverrides`].
//!
//! ```json
//! {
//!   "log_filter": "linguasync=debug",
//!   "component": { "filemask": "po/*.po", "new_base": "po/demo.pot" },
//!   "addons": [
//!     { "name": "gettext.linguas" },
//!     { "name": "gettext.msgmerge", "settings": { "previous": false } }
//!   ]
//! }
//! ```

mod defaults;
mod error;
mod logging;
mod state;

use std::fs;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use self::defaults::{
    CONFIG_FILE_NAME, DEFAULT_FILE_FORMAT, DEFAULT_FILEMASK, DEFAULT_LOG_FILTER,
    DEFAULT_SOURCE_LANGUAGE, DEFAULT_STATE_DIR, DEFAULT_TOOL_TIMEOUT_SECS,
};
pub use self::error::ConfigError;
pub use self::logging::{LogFormat, LogFormatParseError};
pub use self::state::StatePaths;

/// Layout of the translation tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentConfig {
    /// Repository-relative glob with one `*` standing for the language code.
    pub filemask: String,
    /// Repository-relative template path.
    pub new_base: Option<String>,
    /// Language code of the source strings.
    pub source_language: String,
    /// Translation file format identifier (`po` or `po-mono`).
    pub file_format: String,
    /// Address passed to `xgettext --msgid-bugs-address`.
    pub report_source_bugs: Option<String>,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            filemask: DEFAULT_FILEMASK.to_owned(),
            new_base: None,
            source_language: DEFAULT_SOURCE_LANGUAGE.to_owned(),
            file_format: DEFAULT_FILE_FORMAT.to_owned(),
            report_source_bugs: None,
        }
    }
}

/// One enabled addon with its raw settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AddonConfig {
    /// Addon name such as `gettext.msgmerge`.
    pub name: String,
    /// Addon settings; `null` selects the addon defaults.
    #[serde(default)]
    pub settings: Value,
}

impl AddonConfig {
    /// Enables `name` with default settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Value::Null,
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `tracing` filter directive.
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Upper bound on one external tool run, in seconds.
    #[serde(default = "defaults::default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
    /// Directory for alert state and the lock file, relative to the
    /// repository root unless absolute.
    pub state_dir: Utf8PathBuf,
    /// Translation tree layout.
    pub component: ComponentConfig,
    /// Enabled addons in dispatch order.
    pub addons: Vec<AddonConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: LogFormat::default(),
            tool_timeout_secs: DEFAULT_TOOL_TIMEOUT_SECS,
            state_dir: Utf8PathBuf::from(DEFAULT_STATE_DIR),
            component: ComponentConfig::default(),
            addons: Vec::new(),
        }
    }
}

/// Values supplied on the command line that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replacement log filter.
    pub log_filter: Option<String>,
    /// Replacement log format.
    pub log_format: Option<LogFormat>,
    /// Replacement tool timeout in seconds.
    pub tool_timeout_secs: Option<u64>,
}

impl Config {
    /// Parses configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown keys and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_json(path: &Utf8Path, text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to the defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file exists but cannot be
    /// read, and the errors of [`Config::from_json`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json(path, &text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: Arc::new(err),
            }),
        }
    }

    /// Applies command-line overrides and re-validates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when an override is out of range.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(filter) = overrides.log_filter {
            self.log_filter = filter;
        }
        if let Some(format) = overrides.log_format {
            self.log_format = format;
        }
        if let Some(timeout) = overrides.tool_timeout_secs {
            self.tool_timeout_secs = timeout;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks value ranges and cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_filter.trim().is_empty() {
            return Err(invalid("log_filter", "must not be empty"));
        }
        if self.tool_timeout_secs == 0 {
            return Err(invalid("tool_timeout_secs", "must be at least one second"));
        }
        let mask = self.component.filemask.as_str();
        if mask.matches('*').count() != 1 {
            return Err(invalid(
                "component.filemask",
                format!("'{mask}' must contain exactly one '*'"),
            ));
        }
        if mask.starts_with('/') {
            return Err(invalid("component.filemask", "must be repository-relative"));
        }
        if self
            .component
            .new_base
            .as_deref()
            .is_some_and(|base| base.starts_with('/'))
        {
            return Err(invalid("component.new_base", "must be repository-relative"));
        }
        if self.component.source_language.trim().is_empty() {
            return Err(invalid("component.source_language", "must not be empty"));
        }
        if self.addons.iter().any(|addon| addon.name.trim().is_empty()) {
            return Err(invalid("addons", "addon names must not be empty"));
        }
        Ok(())
    }

    /// Returns the tool timeout as a [`Duration`].
    #[must_use]
    pub const fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests;
