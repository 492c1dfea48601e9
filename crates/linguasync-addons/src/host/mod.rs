//! Collaborators supplied by the host application.
//!
//! Addons never touch version control, the translation database or the
//! binary catalogue writer directly. The host hands them a [`Component`]
//! that answers questions about one translation tree and a [`MoCompiler`]
//! that produces binary catalogues.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::alert::{Alert, AlertKind};
use crate::error::AddonError;

/// Version-control view of the repository holding a component.
pub trait Repository: Send + Sync {
    /// Returns the absolute path of the working tree.
    fn root(&self) -> &Path;

    /// Returns the identifier of the current revision.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Repository`] when the revision cannot be read.
    fn last_revision(&self) -> Result<String, AddonError>;

    /// Lists repository-relative paths changed between `from` and the
    /// current revision, including deleted files.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Repository`] when the history cannot be read.
    fn list_changed_files(&self, from: &str) -> Result<BTreeSet<String>, AddonError>;

    /// Resolves symbolic links in a repository-relative path.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::InvalidPath`] when the path does not exist or
    /// resolves outside the working tree.
    fn resolve_symlinks(&self, path: &str) -> Result<PathBuf, AddonError>;
}

/// Storage format of a component's translation files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFormat {
    /// Bilingual gettext catalogues.
    Po,
    /// Monolingual gettext catalogues.
    PoMono,
    /// Anything else.
    Other(String),
}

impl FileFormat {
    /// Parses a format identifier such as `po` or `po-mono`.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id {
            "po" => Self::Po,
            "po-mono" => Self::PoMono,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// One translation file of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    language_code: String,
    filename: PathBuf,
    is_source: bool,
    is_template: bool,
}

impl Translation {
    /// Creates a regular (non-source) translation.
    #[must_use]
    pub fn new(language_code: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            language_code: language_code.into(),
            filename: filename.into(),
            is_source: false,
            is_template: false,
        }
    }

    /// Marks the translation as the source language, optionally also the
    /// template.
    #[must_use]
    pub const fn as_source(mut self, is_template: bool) -> Self {
        self.is_source = true;
        self.is_template = is_template;
        self
    }

    /// Returns the language code.
    #[must_use]
    pub const fn language_code(&self) -> &str {
        self.language_code.as_str()
    }

    /// Returns the absolute catalogue path.
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Returns `true` for the source-language translation.
    #[must_use]
    pub const fn is_source(&self) -> bool {
        self.is_source
    }

    /// Returns `true` when the translation file is the template.
    #[must_use]
    pub const fn is_template(&self) -> bool {
        self.is_template
    }
}

/// One translation tree inside a repository.
pub trait Component {
    /// Returns the repository holding the component.
    fn repository(&self) -> &dyn Repository;

    /// Returns the storage format of the translation files.
    fn file_format(&self) -> FileFormat;

    /// Returns the language codes of all translations except the source
    /// language.
    fn language_codes(&self) -> BTreeSet<String>;

    /// Returns the repository-relative template path, if configured.
    fn new_base(&self) -> Option<&str>;

    /// Returns the repository-relative file mask, e.g. `po/*.po`.
    fn filemask(&self) -> &str;

    /// Returns every translation of the component.
    fn translations(&self) -> Vec<Translation>;

    /// Returns the address for reporting source string bugs.
    fn report_source_bugs(&self) -> Option<&str>;

    /// Returns `true` when an alert of `kind` is still pending.
    fn has_pending_alert(&self, kind: AlertKind) -> bool;

    /// Replaces the pending alerts of `kind`; an empty list clears them.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot record the alerts.
    fn trigger_alerts(&self, kind: AlertKind, alerts: Vec<Alert>) -> Result<(), AddonError>;

    /// Returns the absolute template path, if configured.
    fn new_base_path(&self) -> Option<PathBuf> {
        self.new_base()
            .filter(|base| !base.is_empty())
            .map(|base| self.repository().root().join(base))
    }

    /// Converts an absolute path inside the working tree to a
    /// repository-relative one with `/` separators.
    fn repository_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(self.repository().root()).unwrap_or(path);
        relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Produces binary catalogues from translations.
pub trait MoCompiler: Send + Sync {
    /// Compiles `translation`, including fuzzy units when `include_fuzzy`.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Compile`] when the catalogue cannot be
    /// compiled.
    fn compile(&self, translation: &Translation, include_fuzzy: bool)
    -> Result<Vec<u8>, AddonError>;
}
