//! Persistent store for pending addon alerts.
//!
//! Alerts survive between runs in a JSON object keyed by alert kind. The
//! change gate consults it so a failed step is retried on the next update
//! even when no input changed.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use linguasync_addons::{AddonError, Alert, AlertKind};
use linguasync_text::write_atomically;
use tracing::{info, warn};

use crate::errors::AppError;

const ALERTS_TARGET: &str = "linguasync::alerts";

type AlertMap = BTreeMap<AlertKind, Vec<Alert>>;

/// Pending alerts backed by a JSON file.
#[derive(Debug)]
pub(crate) struct AlertStore {
    path: PathBuf,
    alerts: Mutex<AlertMap>,
}

impl AlertStore {
    /// Loads the store; a missing file means no alerts are pending.
    pub(crate) fn load(path: &Path) -> Result<Self, AppError> {
        let alerts = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).map_err(|error| AppError::AlertState {
                path: path.to_path_buf(),
                message: error.to_string(),
            })?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => AlertMap::new(),
            Err(error) => {
                return Err(AppError::AlertState {
                    path: path.to_path_buf(),
                    message: error.to_string(),
                });
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            alerts: Mutex::new(alerts),
        })
    }

    pub(crate) fn is_pending(&self, kind: AlertKind) -> bool {
        self.lock().contains_key(&kind)
    }

    /// Returns a snapshot of the pending alerts.
    pub(crate) fn pending(&self) -> AlertMap {
        self.lock().clone()
    }

    /// Replaces the alerts of `kind` and persists the store.
    pub(crate) fn replace(&self, kind: AlertKind, alerts: Vec<Alert>) -> Result<(), AddonError> {
        let mut guard = self.lock();
        if alerts.is_empty() {
            if guard.remove(&kind).is_none() {
                return Ok(());
            }
            info!(target: ALERTS_TARGET, alert = %kind, "alert cleared");
        } else {
            for alert in &alerts {
                warn!(
                    target: ALERTS_TARGET,
                    alert = %kind,
                    addon = alert.addon(),
                    command = alert.command(),
                    error = alert.error(),
                    "alert raised"
                );
            }
            guard.insert(kind, alerts);
        }
        let json = serde_json::to_vec_pretty(&*guard).map_err(|error| AddonError::Repository {
            message: format!("cannot serialise alerts: {error}"),
        })?;
        write_atomically(&self.path, &json)?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AlertMap> {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn failure() -> Alert {
        Alert::new("gettext.msgmerge", "msgmerge po/de.po", "", "exit status 1")
    }

    #[test]
    fn alerts_persist_between_loads() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("alerts.json");

        let store = AlertStore::load(&path).expect("empty store");
        assert!(!store.is_pending(AlertKind::Msgmerge));
        store
            .replace(AlertKind::Msgmerge, vec![failure()])
            .expect("raise");

        let reloaded = AlertStore::load(&path).expect("reload");
        assert!(reloaded.is_pending(AlertKind::Msgmerge));
        assert!(!reloaded.is_pending(AlertKind::Xgettext));
        assert_eq!(
            reloaded.pending().get(&AlertKind::Msgmerge),
            Some(&vec![failure()])
        );
    }

    #[test]
    fn empty_batch_clears_the_alert() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("alerts.json");
        let store = AlertStore::load(&path).expect("empty store");
        store
            .replace(AlertKind::Xgettext, vec![failure()])
            .expect("raise");
        store.replace(AlertKind::Xgettext, Vec::new()).expect("clear");

        let reloaded = AlertStore::load(&path).expect("reload");
        assert!(!reloaded.is_pending(AlertKind::Xgettext));
    }

    #[test]
    fn clearing_without_alerts_writes_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("alerts.json");
        let store = AlertStore::load(&path).expect("empty store");
        store.replace(AlertKind::Msgmerge, Vec::new()).expect("clear");
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_state_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("alerts.json");
        fs::write(&path, "not json").expect("write");
        assert!(matches!(
            AlertStore::load(&path),
            Err(AppError::AlertState { .. })
        ));
    }
}
