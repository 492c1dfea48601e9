//! Translation tree discovered on disk from the configured file mask.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use linguasync_addons::host::{Component, FileFormat, Repository, Translation};
use linguasync_addons::{AddonError, Alert, AlertKind};
use linguasync_config::ComponentConfig;
use tracing::debug;

use crate::alerts::AlertStore;
use crate::git::GitRepository;

const COMPONENT_TARGET: &str = "linguasync::component";

/// A component whose translations are the files matching its file mask.
pub(crate) struct DirectoryComponent {
    repository: GitRepository,
    config: ComponentConfig,
    alerts: AlertStore,
}

impl DirectoryComponent {
    pub(crate) const fn new(
        repository: GitRepository,
        config: ComponentConfig,
        alerts: AlertStore,
    ) -> Self {
        Self {
            repository,
            config,
            alerts,
        }
    }

    /// Kinds of the alerts still pending after a run.
    pub(crate) fn pending_alerts(&self) -> Vec<AlertKind> {
        self.alerts.pending().into_keys().collect()
    }

    /// Language code to catalogue path for every file matching the mask.
    fn scan(&self) -> BTreeMap<String, PathBuf> {
        scan_filemask(self.repository.root(), &self.config.filemask)
    }
}

impl Component for DirectoryComponent {
    fn repository(&self) -> &dyn Repository {
        &self.repository
    }

    fn file_format(&self) -> FileFormat {
        FileFormat::from_id(&self.config.file_format)
    }

    fn language_codes(&self) -> BTreeSet<String> {
        self.scan()
            .into_keys()
            .filter(|code| *code != self.config.source_language)
            .collect()
    }

    fn new_base(&self) -> Option<&str> {
        self.config.new_base.as_deref()
    }

    fn filemask(&self) -> &str {
        &self.config.filemask
    }

    fn translations(&self) -> Vec<Translation> {
        let template = self.new_base_path();
        let source = self.config.source_language.as_str();
        let mut translations: Vec<Translation> = self
            .scan()
            .into_iter()
            .map(|(code, path)| {
                if code == source {
                    let is_template = template.as_deref() == Some(path.as_path());
                    Translation::new(code, path).as_source(is_template)
                } else {
                    Translation::new(code, path)
                }
            })
            .collect();
        let has_source = translations.iter().any(Translation::is_source);
        if let Some(base) = template.filter(|base| !has_source && base.is_file()) {
            translations.push(Translation::new(source, base).as_source(true));
        }
        translations
    }

    fn report_source_bugs(&self) -> Option<&str> {
        self.config.report_source_bugs.as_deref()
    }

    fn has_pending_alert(&self, kind: AlertKind) -> bool {
        self.alerts.is_pending(kind)
    }

    fn trigger_alerts(&self, kind: AlertKind, alerts: Vec<Alert>) -> Result<(), AddonError> {
        self.alerts.replace(kind, alerts)
    }
}

/// Expands a file mask with one `*` against the tree at `root`.
///
/// The `*` may stand for a whole directory, as in
/// `locale/*/LC_MESSAGES/app.po`, or part of a file name, as in `po/*.po`.
fn scan_filemask(root: &Path, filemask: &str) -> BTreeMap<String, PathBuf> {
    let mut found = BTreeMap::new();
    let Some((before, after)) = filemask.split_once('*') else {
        return found;
    };
    let (directory, name_prefix) = before.rsplit_once('/').unwrap_or(("", before));
    let (name_suffix, rest) = match after.split_once('/') {
        Some((suffix, rest)) => (suffix, Some(rest)),
        None => (after, None),
    };

    let base = root.join(directory);
    let entries = match fs::read_dir(&base) {
        Ok(entries) => entries,
        Err(error) => {
            debug!(
                target: COMPONENT_TARGET,
                path = %base.display(),
                %error,
                "file mask directory unreadable"
            );
            return found;
        }
    };
    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let Some(code) = file_name
            .to_str()
            .and_then(|name| name.strip_prefix(name_prefix))
            .and_then(|name| name.strip_suffix(name_suffix))
            .filter(|code| !code.is_empty() && !code.contains('/'))
        else {
            continue;
        };
        let path = match rest {
            Some(tail) => entry.path().join(tail),
            None => entry.path(),
        };
        if path.is_file() {
            found.insert(code.to_owned(), path);
        }
    }
    found
}
