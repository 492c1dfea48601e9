//! `ALL_LINGUAS` maintenance in autoconf scripts.

use std::fs;
use std::path::PathBuf;

use linguasync_text::LineDocument;
use linguasync_text::assignment::{ALL_LINGUAS, KeyedAssignment};
use tracing::{debug, info};

use super::ADDON_TARGET;
use crate::addon::{
    Addon, AddonEvent, AddonKind, AddonReport, Eligibility, EventKind, gettext_eligibility,
};
use crate::error::AddonError;
use crate::host::Component;

/// Candidate script names, relative to the repository root.
pub const CONFIGURE_FILES: [&str; 3] = ["configure", "configure.in", "configure.ac"];

/// Keeps `ALL_LINGUAS="…"` assignments listing every translated language.
#[derive(Debug, Clone)]
pub struct UpdateConfigure {
    assignment: KeyedAssignment,
}

impl Default for UpdateConfigure {
    fn default() -> Self {
        Self {
            assignment: KeyedAssignment::new(ALL_LINGUAS),
        }
    }
}

fn existing_scripts(component: &dyn Component) -> Vec<PathBuf> {
    let root = component.repository().root();
    CONFIGURE_FILES
        .iter()
        .map(|name| root.join(name))
        .filter(|path| path.is_file())
        .collect()
}

impl Addon for UpdateConfigure {
    fn kind(&self) -> AddonKind {
        AddonKind::UpdateConfigure
    }

    fn can_install(&self, component: &dyn Component) -> Eligibility {
        gettext_eligibility(component).and_then(|| {
            let eligible = existing_scripts(component).iter().any(|path| {
                fs::read(path).is_ok_and(|content| self.assignment.is_eligible(&content))
            });
            if eligible {
                Eligibility::Eligible
            } else {
                Eligibility::ineligible(format!(
                    "no configure script assigns {}",
                    self.assignment.prefix()
                ))
            }
        })
    }

    fn on_event(
        &self,
        component: &dyn Component,
        event: &AddonEvent<'_>,
    ) -> Result<AddonReport, AddonError> {
        let mut report = AddonReport::for_event(event);
        if !matches!(event.kind(), EventKind::PostAdd | EventKind::Daily) {
            return Ok(report);
        }
        let codes = component.language_codes();
        for path in existing_scripts(component) {
            let document = match LineDocument::read(&path) {
                Ok(document) => document,
                Err(err) if err.is_decode() => {
                    debug!(target: ADDON_TARGET, path = %path.display(), "not UTF-8, skipped");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let reconciled = self.assignment.reconcile(document.into_lines(), &codes);
            if reconciled.write_if_changed(&path)? {
                info!(
                    target: ADDON_TARGET,
                    path = %path.display(),
                    key = self.assignment.key(),
                    "updated language assignment"
                );
                report.push(component.repository_path(&path));
            }
        }
        Ok(report)
    }
}
