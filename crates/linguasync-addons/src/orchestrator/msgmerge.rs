//! Merging the template into every catalogue with `msgmerge`.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{ADDON_TARGET, abort_with_alert, display, tool_eligibility};
use crate::addon::{
    Addon, AddonEvent, AddonKind, AddonReport, ArgumentContributor, Eligibility,
    gettext_eligibility,
};
use crate::alert::{Alert, AlertKind, AlertLog};
use crate::error::AddonError;
use crate::gate;
use crate::host::{Component, Translation};
use crate::settings::MsgmergeSettings;
use crate::tool::{DEFAULT_TIMEOUT, ReplaceOutcome, ToolExecutor, ToolInvocation, replace_artifact};

const MSGMERGE: &str = "msgmerge";

/// Updates every catalogue to match the template.
pub struct Msgmerge {
    settings: MsgmergeSettings,
    executor: Arc<dyn ToolExecutor>,
    contributor: Option<Arc<dyn ArgumentContributor>>,
    timeout: Duration,
}

impl Msgmerge {
    /// Creates the addon.
    #[must_use]
    pub fn new(settings: MsgmergeSettings, executor: Arc<dyn ToolExecutor>) -> Self {
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

    /// Overrides the per-invocation timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the flags passed to every `msgmerge` run.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        let mut args = self.settings.arguments();
        if let Some(contributor) = &self.contributor {
            args.extend(contributor.msgmerge_args());
        }
        args
    }

    fn merge_one(
        &self,
        args: &[String],
        catalogue: &Path,
        template: &Path,
    ) -> Result<ReplaceOutcome, AddonError> {
        replace_artifact(catalogue, |temp| {
            let invocation = ToolInvocation::new(MSGMERGE)
                .args(args.iter().cloned())
                .arg(format!("--output-file={}", temp.display()))
                .path_arg(catalogue)
                .path_arg(template)
                .with_timeout(self.timeout);
            self.executor.execute(&invocation)
        })
    }
}

/// Source catalogues other than the template, and files missing from the
/// working tree, are not merged.
fn is_mergeable(translation: &Translation) -> bool {
    !(translation.is_source() && !translation.is_template()) && translation.filename().is_file()
}

impl Addon for Msgmerge {
    fn kind(&self) -> AddonKind {
        AddonKind::Msgmerge
    }

    fn can_install(&self, component: &dyn Component) -> Eligibility {
        gettext_eligibility(component)
            .and_then(|| tool_eligibility(self.executor.as_ref(), self.kind(), MSGMERGE))
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

        let dependencies: BTreeSet<String> = component
            .new_base()
            .filter(|base| !base.is_empty())
            .map(str::to_owned)
            .into_iter()
            .collect();
        let decision = gate::check(component, AlertKind::Msgmerge, *previous_head, &dependencies);
        if !decision.should_run() {
            let previous = previous_head.unwrap_or_default();
            let last = component.repository().last_revision().unwrap_or_default();
            info!(
                target: ADDON_TARGET,
                addon,
                revisions = %format_args!("{previous}..{last}"),
                "template not updated, skipped"
            );
            return Ok(report);
        }

        let template = match component.new_base_path() {
            Some(template) if template.is_file() => template,
            other => {
                let output = other.as_deref().map(display).unwrap_or_default();
                let alert = Alert::new(
                    addon,
                    MSGMERGE,
                    output,
                    "Template for new translations not found",
                );
                return abort_with_alert(component, AlertKind::Msgmerge, alert, report);
            }
        };

        let args = self.arguments();
        let alerts = AlertLog::new();
        for translation in component.translations().iter().filter(|t| is_mergeable(t)) {
            let catalogue = translation.filename();
            match self.merge_one(&args, catalogue, &template) {
                Ok(outcome) if outcome.is_modified() => {
                    debug!(target: ADDON_TARGET, path = %catalogue.display(), "catalogue merged");
                    report.push(component.repository_path(catalogue));
                }
                Ok(ReplaceOutcome::Failed(outcome)) => {
                    warn!(
                        target: ADDON_TARGET,
                        addon,
                        path = %catalogue.display(),
                        error = outcome.diagnostic(),
                        "msgmerge failed"
                    );
                    alerts.push(Alert::from_outcome(addon, &outcome));
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(
                        target: ADDON_TARGET,
                        addon,
                        path = %catalogue.display(),
                        %err,
                        "merge failed"
                    );
                    alerts.push(Alert::new(addon, MSGMERGE, display(catalogue), err.to_string()));
                }
            }
        }

        info!(
            target: ADDON_TARGET,
            addon,
            updated = report.files().len(),
            failed = alerts.len(),
            "msgmerge finished"
        );
        component.trigger_alerts(AlertKind::Msgmerge, alerts.into_alerts())?;
        Ok(report)
    }
}
