//! Validated, immutable addon settings.
//!
//! Settings arrive as raw JSON from the host configuration. Each addon has
//! one settings type that deserialises with gettext's defaults, rejects
//! unknown keys, and is validated once when the registry is built. A JSON
//! `null` selects the defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AddonError;
use crate::template::PathTemplate;

/// Default MO output path template.
pub const DEFAULT_MO_PATH: &str = "{{ filename|stripext }}.mo";

/// Line width gettext tools wrap at unless told otherwise.
pub const DEFAULT_WIDTH: i32 = 77;

/// Behaviour shared by all addon settings types.
pub trait AddonSettings: DeserializeOwned + Default {
    /// Checks cross-field constraints after deserialisation.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the first problem found.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Deserialises and validates settings for the addon called `name`.
///
/// # Errors
///
/// Returns [`AddonError::Settings`] when the value does not match the
/// settings schema or fails validation.
///
/// # Example
///
/// ```
/// use linguasync_addons::settings::{MsgmergeSettings, parse};
///
/// let value = serde_json::json!({"previous": false});
/// let settings: MsgmergeSettings = parse("gettext.msgmerge", &value)?;
/// assert!(!settings.previous());
/// assert!(settings.fuzzy());
/// # Ok::<(), linguasync_addons::AddonError>(())
/// ```
pub fn parse<T: AddonSettings>(name: &str, value: &Value) -> Result<T, AddonError> {
    let settings = if value.is_null() {
        T::default()
    } else {
        T::deserialize(value).map_err(|err| AddonError::Settings {
            name: name.to_owned(),
            message: err.to_string(),
        })?
    };
    settings.validate().map_err(|message| AddonError::Settings {
        name: name.to_owned(),
        message,
    })?;
    Ok(settings)
}

/// Settings for MO generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoSettings {
    fuzzy: bool,
    path: String,
}

impl Default for MoSettings {
    fn default() -> Self {
        Self {
            fuzzy: false,
            path: DEFAULT_MO_PATH.to_owned(),
        }
    }
}

impl MoSettings {
    /// Returns whether fuzzy units are compiled.
    #[must_use]
    pub const fn fuzzy(&self) -> bool {
        self.fuzzy
    }

    /// Returns the output path template, falling back to the default when
    /// the configured one is blank.
    #[must_use]
    pub fn path(&self) -> &str {
        if self.path.trim().is_empty() {
            DEFAULT_MO_PATH
        } else {
            self.path.as_str()
        }
    }

    /// Parses the output path template.
    ///
    /// # Errors
    ///
    /// Returns the template error as text.
    pub fn template(&self) -> Result<PathTemplate, String> {
        PathTemplate::parse(self.path()).map_err(|err| format!("invalid path template: {err}"))
    }
}

impl AddonSettings for MoSettings {
    fn validate(&self) -> Result<(), String> {
        self.template().map(drop)
    }
}

/// Settings for `msgmerge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MsgmergeSettings {
    fuzzy: bool,
    previous: bool,
    no_location: bool,
}

impl Default for MsgmergeSettings {
    fn default() -> Self {
        Self {
            fuzzy: true,
            previous: true,
            no_location: false,
        }
    }
}

impl MsgmergeSettings {
    /// Returns whether fuzzy matching is enabled.
    #[must_use]
    pub const fn fuzzy(&self) -> bool {
        self.fuzzy
    }

    /// Returns whether previous msgids are kept for fuzzy entries.
    #[must_use]
    pub const fn previous(&self) -> bool {
        self.previous
    }

    /// Returns whether location comments are dropped.
    #[must_use]
    pub const fn no_location(&self) -> bool {
        self.no_location
    }

    /// Builds the `msgmerge` flags implied by these settings.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        let mut args = Vec::new();
        if !self.fuzzy {
            args.push("--no-fuzzy-matching".to_owned());
        }
        if self.previous {
            args.push("--previous".to_owned());
        }
        if self.no_location {
            args.push("--no-location".to_owned());
        }
        args
    }
}

impl AddonSettings for MsgmergeSettings {}

/// Settings for `xgettext`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct XgettextSettings {
    directory: String,
    files_from: String,
    from_code: String,
    add_comments: bool,
    add_comments_tags: Vec<String>,
    no_default_keywords: bool,
    keywords: Vec<String>,
    flags: Vec<String>,
}

impl Default for XgettextSettings {
    fn default() -> Self {
        Self {
            directory: String::new(),
            files_from: "POTFILES.in".to_owned(),
            from_code: "UTF-8".to_owned(),
            add_comments: false,
            add_comments_tags: Vec::new(),
            no_default_keywords: false,
            keywords: Vec::new(),
            flags: Vec::new(),
        }
    }
}

impl XgettextSettings {
    /// Returns the directory manifest entries are relative to; `.` maps to
    /// the empty string.
    #[must_use]
    pub fn directory(&self) -> &str {
        match self.directory.trim() {
            "." => "",
            other => other,
        }
    }

    /// Returns the manifest file name, relative to the template directory.
    #[must_use]
    pub const fn files_from(&self) -> &str {
        self.files_from.as_str()
    }

    /// Builds the settings-derived `xgettext` flags, excluding
    /// `--files-from` and the output file.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        let mut args = Vec::new();
        let directory = self.directory();
        if !directory.is_empty() {
            args.push(format!("--directory={directory}"));
        }
        if !self.from_code.is_empty() {
            args.push(format!("--from-code={}", self.from_code));
        }
        if self.add_comments {
            args.push("--add-comments".to_owned());
        } else {
            args.extend(
                non_blank(&self.add_comments_tags).map(|tag| format!("--add-comments={tag}")),
            );
        }
        if self.no_default_keywords {
            args.push("--keyword".to_owned());
        }
        args.extend(non_blank(&self.keywords).map(|keyword| format!("--keyword={keyword}")));
        args.extend(non_blank(&self.flags).map(|flag| format!("--flag={flag}")));
        args
    }
}

fn non_blank(values: &[String]) -> impl Iterator<Item = &str> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

impl AddonSettings for XgettextSettings {
    fn validate(&self) -> Result<(), String> {
        let files_from = self.files_from.trim();
        if files_from.is_empty() {
            return Err("files_from must not be empty".to_owned());
        }
        if files_from.starts_with('/') || self.directory().starts_with('/') {
            return Err("files_from and directory must be repository-relative".to_owned());
        }
        Ok(())
    }
}

/// Settings for the gettext output customisation addon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomizeSettings {
    width: i32,
}

impl Default for CustomizeSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
        }
    }
}

impl CustomizeSettings {
    /// Returns the configured line width; `-1` disables wrapping.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }
}

impl AddonSettings for CustomizeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.width == -1 || self.width > 0 {
            Ok(())
        } else {
            Err(format!("width must be positive or -1, got {}", self.width))
        }
    }
}

/// Settings for contributor comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorsSettings {
    ignored_authors: Vec<String>,
}

impl Default for AuthorsSettings {
    fn default() -> Self {
        Self {
            ignored_authors: vec!["noreply@".to_owned()],
        }
    }
}

impl AuthorsSettings {
    /// Returns `true` when `author` matches an ignore pattern.
    #[must_use]
    pub fn is_ignored(&self, author: &str) -> bool {
        self.ignored_authors
            .iter()
            .any(|pattern| !pattern.is_empty() && author.contains(pattern.as_str()))
    }
}

impl AddonSettings for AuthorsSettings {}

/// Settings type for addons that take none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoSettings {}

impl AddonSettings for NoSettings {}

#[cfg(test)]
mod tests;
