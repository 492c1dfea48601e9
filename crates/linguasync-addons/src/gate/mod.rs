//! Change gate deciding whether an expensive synchronisation may be skipped.
//!
//! A step runs on its first execution, whenever a previous run left an alert
//! behind, and otherwise only when one of its dependency files changed
//! between the previous and the current revision. Deleted files show up in
//! the changed-file list, so deleting a dependency also triggers a run.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::alert::AlertKind;
use crate::host::Component;

const GATE_TARGET: &str = "linguasync_addons::gate";

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// There is no previous revision to compare against.
    FirstRun,
    /// A previous run failed and is retried.
    PendingAlert,
    /// At least one dependency changed.
    DependencyChanged,
    /// Nothing relevant changed; the step is skipped.
    Unchanged,
}

impl GateDecision {
    /// Returns `true` unless the step may be skipped.
    #[must_use]
    pub const fn should_run(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Decides whether a step must run.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use linguasync_addons::gate::{GateDecision, decide};
///
/// let deps = BTreeSet::from([String::from("po/demo.pot")]);
/// let changed = BTreeSet::from([String::from("README.md")]);
/// assert_eq!(decide(Some("abc123"), false, &deps, &changed), GateDecision::Unchanged);
/// assert_eq!(decide(None, false, &deps, &changed), GateDecision::FirstRun);
/// ```
#[must_use]
pub fn decide(
    previous_revision: Option<&str>,
    has_pending_alert: bool,
    dependencies: &BTreeSet<String>,
    changed_files: &BTreeSet<String>,
) -> GateDecision {
    if previous_revision.is_none() {
        return GateDecision::FirstRun;
    }
    if has_pending_alert {
        return GateDecision::PendingAlert;
    }
    if dependencies.is_disjoint(changed_files) {
        GateDecision::Unchanged
    } else {
        GateDecision::DependencyChanged
    }
}

/// Boolean form of [`decide`].
#[must_use]
pub fn should_run(
    previous_revision: Option<&str>,
    has_pending_alert: bool,
    dependencies: &BTreeSet<String>,
    changed_files: &BTreeSet<String>,
) -> bool {
    decide(previous_revision, has_pending_alert, dependencies, changed_files).should_run()
}

/// Evaluates the gate against a component's repository.
///
/// The changed-file list is only requested when neither the first-run nor
/// the pending-alert rule already decided. A failing repository query is
/// treated as a change.
pub fn check(
    component: &dyn Component,
    alert: AlertKind,
    previous_revision: Option<&str>,
    dependencies: &BTreeSet<String>,
) -> GateDecision {
    let Some(previous) = previous_revision else {
        return GateDecision::FirstRun;
    };
    if component.has_pending_alert(alert) {
        return GateDecision::PendingAlert;
    }
    match component.repository().list_changed_files(previous) {
        Ok(changed) => {
            let decision = decide(Some(previous), false, dependencies, &changed);
            debug!(
                target: GATE_TARGET,
                previous,
                changed = changed.len(),
                ?decision,
                "evaluated change gate"
            );
            decision
        }
        Err(error) => {
            warn!(
                target: GATE_TARGET,
                previous,
                %error,
                "cannot list changed files, running anyway"
            );
            GateDecision::DependencyChanged
        }
    }
}
