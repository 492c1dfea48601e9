//! Regenerating the template with `xgettext`.
//!
//! A run moves through a fixed sequence of states; every failure state
//! records an alert and ends the run without an error:
//!
//! ```text
//! manifest lookup -> change gate -> path validation -> xgettext -> diff -> promote
//!      |                 |               |                |         |
//!   missing/invalid     skip          invalid           failed   unchanged
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use linguasync_text::potfiles::{manifest_paths, read_manifest};
use tracing::info;

use super::{ADDON_TARGET, abort_with_alert, display, tool_eligibility};
use crate::addon::{
    Addon, AddonEvent, AddonKind, AddonReport, ArgumentContributor, Eligibility,
    gettext_eligibility,
};
use crate::alert::{Alert, AlertKind};
use crate::error::AddonError;
use crate::gate;
use crate::host::Component;
use crate::settings::XgettextSettings;
use crate::tool::{DEFAULT_TIMEOUT, ReplaceOutcome, ToolExecutor, ToolInvocation, replace_artifact};

const XGETTEXT: &str = "xgettext";

/// Regenerates the component template from the sources listed in the
/// `POTFILES.in` manifest.
pub struct Xgettext {
    settings: XgettextSettings,
    executor: Arc<dyn ToolExecutor>,
    contributor: Option<Arc<dyn ArgumentContributor>>,
    timeout: Duration,
}

impl Xgettext {
    /// Creates the addon.
    #[must_use]
    pub fn new(settings: XgettextSettings, executor: Arc<dyn ToolExecutor>) -> Self {
        Self {
            settings,
            executor,
            contributor: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Appends arguments from another addon to every invocation.
    #[must_use]
    pub fn with_contributor(mut self, contributor: Arc<dyn ArgumentContributor>) -> Self {
        self.contributor = Some(contributor);
        self
    }

    /// Overrides the invocation timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the manifest path: `files_from` next to the template.
    #[must_use]
    pub fn manifest_path(&self, template: &Path) -> PathBuf {
        template
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(self.settings.files_from())
    }

    /// Builds the flags for one run, excluding the output file.
    #[must_use]
    pub fn arguments(&self, component: &dyn Component, manifest: &Path) -> Vec<String> {
        let mut args = vec![format!("--files-from={}", manifest.display())];
        args.extend(self.settings.arguments());
        if let Some(address) = component.report_source_bugs().filter(|a| !a.is_empty()) {
            args.push(format!("--msgid-bugs-address={address}"));
        }
        if let Some(contributor) = &self.contributor {
            args.extend(contributor.xgettext_args());
        }
        args
    }

    fn alert(&self, output: &Path, error: impl Into<String>) -> Alert {
        Alert::new(self.kind().name(), XGETTEXT, display(output), error)
    }
}

impl Addon for Xgettext {
    fn kind(&self) -> AddonKind {
        AddonKind::Xgettext
    }

    fn can_install(&self, component: &dyn Component) -> Eligibility {
        gettext_eligibility(component)
            .and_then(|| {
                if component.new_base_path().is_some() {
                    Eligibility::Eligible
                } else {
                    Eligibility::ineligible("no template for new translations is configured")
                }
            })
            .and_then(|| tool_eligibility(self.executor.as_ref(), self.kind(), XGETTEXT))
    }

    fn on_event(
        &self,
        component: &dyn Component,
        event: &AddonEvent<'_>,
    ) -> Result<AddonReport, AddonError> {
        let mut report = AddonReport::for_event(event);
        let AddonEvent::PostUpdate { previous_head } = event else {
            return Ok(report);
        };
        let addon = self.kind().name();

        let Some(output) = component.new_base_path() else {
            let alert = Alert::new(
                addon,
                XGETTEXT,
                "",
                "Template for new translations not configured",
            );
            return abort_with_alert(component, AlertKind::Xgettext, alert, report);
        };
        let manifest = self.manifest_path(&output);
        if !manifest.is_file() {
            let alert = self.alert(&output, "Input list (POTFILES.in) file not found");
            return abort_with_alert(component, AlertKind::Xgettext, alert, report);
        }
        let entries = match read_manifest(&manifest) {
            Ok(entries) => entries,
            Err(err) => {
                let alert = self.alert(&output, err.to_string());
                return abort_with_alert(component, AlertKind::Xgettext, alert, report);
            }
        };
        let sources = manifest_paths(&entries, self.settings.directory());
        let mut dependencies: BTreeSet<String> = sources.clone();
        dependencies.insert(component.repository_path(&manifest));

        let decision = gate::check(component, AlertKind::Xgettext, *previous_head, &dependencies);
        if !decision.should_run() {
            let previous = previous_head.unwrap_or_default();
            let last = component.repository().last_revision().unwrap_or_default();
            info!(
                target: ADDON_TARGET,
                addon,
                revisions = %format_args!("{previous}..{last}"),
                "input files not updated, skipped"
            );
            return Ok(report);
        }

        let repository = component.repository();
        if let Some(err) = sources
            .iter()
            .find_map(|source| repository.resolve_symlinks(source).err())
        {
            let alert = self.alert(&output, err.to_string());
            return abort_with_alert(component, AlertKind::Xgettext, alert, report);
        }

        let args = self.arguments(component, &manifest);
        let replaced = replace_artifact(&output, |temp| {
            let invocation = ToolInvocation::new(XGETTEXT)
                .args(args.iter().cloned())
                .arg("-o")
                .path_arg(temp)
                .with_working_dir(repository.root())
                .with_timeout(self.timeout);
            self.executor.execute(&invocation)
        });
        let replaced = match replaced {
            Ok(replaced) => replaced,
            Err(err) => {
                let alert = self.alert(&output, err.to_string());
                return abort_with_alert(component, AlertKind::Xgettext, alert, report);
            }
        };

        match replaced {
            ReplaceOutcome::Failed(failed) => {
                let alert = Alert::from_outcome(addon, &failed);
                abort_with_alert(component, AlertKind::Xgettext, alert, report)
            }
            ReplaceOutcome::Unchanged => {
                info!(target: ADDON_TARGET, addon, "template has no updates");
                component.trigger_alerts(AlertKind::Xgettext, Vec::new())?;
                Ok(report)
            }
            ReplaceOutcome::Created | ReplaceOutcome::Replaced => {
                info!(
                    target: ADDON_TARGET,
                    addon,
                    path = %output.display(),
                    "template regenerated"
                );
                component.trigger_alerts(AlertKind::Xgettext, Vec::new())?;
                report.push(component.repository_path(&output));
                Ok(report)
            }
        }
    }
}
