//! `LINGUAS` maintenance.

use std::path::PathBuf;

use linguasync_text::{LineDocument, linguas};
use tracing::{debug, info};

use super::ADDON_TARGET;
use crate::addon::{
    Addon, AddonEvent, AddonKind, AddonReport, Eligibility, EventKind, gettext_eligibility,
};
use crate::error::AddonError;
use crate::host::Component;

/// Keeps the `LINGUAS` file listing every translated language.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateLinguas;

/// Returns where the component's `LINGUAS` file lives: next to the template
/// or, without one, next to the catalogues matched by the file mask.
#[must_use]
pub fn linguas_path(component: &dyn Component) -> PathBuf {
    let base = component.new_base_path().unwrap_or_else(|| {
        component
            .repository()
            .root()
            .join(component.filemask().replace('*', "x"))
    });
    base.parent()
        .map_or_else(|| PathBuf::from("LINGUAS"), |dir| dir.join("LINGUAS"))
}

impl Addon for UpdateLinguas {
    fn kind(&self) -> AddonKind {
        AddonKind::UpdateLinguas
    }

    fn can_install(&self, component: &dyn Component) -> Eligibility {
        gettext_eligibility(component).and_then(|| {
            let path = linguas_path(component);
            if path.is_file() {
                Eligibility::Eligible
            } else {
                Eligibility::ineligible(format!("{} does not exist", path.display()))
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
        let path = linguas_path(component);
        if !path.is_file() {
            info!(target: ADDON_TARGET, path = %path.display(), "LINGUAS file missing, skipped");
            return Ok(report);
        }

        let codes = component.language_codes();
        let document = LineDocument::read(&path)?;
        let reconciled = linguas::reconcile(document.into_lines(), &codes);
        if reconciled.write_if_changed(&path)? {
            info!(
                target: ADDON_TARGET,
                path = %path.display(),
                languages = codes.len(),
                "updated LINGUAS"
            );
            report.push(component.repository_path(&path));
        } else {
            debug!(target: ADDON_TARGET, path = %path.display(), "LINGUAS already up to date");
        }
        Ok(report)
    }
}
