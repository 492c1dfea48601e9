//! Alert records surfaced to the host when an addon cannot complete.
//!
//! Alerts are data, not control flow: orchestrators collect them while they
//! keep processing independent items, then hand the whole batch to the host
//! through [`Component::trigger_alerts`](crate::host::Component::trigger_alerts).
//! An empty batch clears a previously pending alert of the same kind.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::tool::ToolOutcome;

/// Alert categories that make the change gate retry unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertKind {
    /// `msgmerge` failed for at least one catalogue.
    #[serde(rename = "MsgmergeAddonError")]
    Msgmerge,
    /// Regenerating the template with `xgettext` failed.
    #[serde(rename = "XGettextAddonError")]
    Xgettext,
}

impl AlertKind {
    /// Returns the canonical alert name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Msgmerge => "MsgmergeAddonError",
            Self::Xgettext => "XGettextAddonError",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic describing one failed addon step.
///
/// # Example
///
/// ```
/// use linguasync_addons::Alert;
///
/// let alert = Alert::new(
///     "gettext.msgmerge",
///     "msgmerge",
///     "",
///     "Template for new translations not found",
/// );
/// assert_eq!(alert.addon(), "gettext.msgmerge");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    addon: String,
    command: String,
    output: String,
    error: String,
}

impl Alert {
    /// Creates an alert.
    #[must_use]
    pub fn new(
        addon: impl Into<String>,
        command: impl Into<String>,
        output: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            addon: addon.into(),
            command: command.into(),
            output: output.into(),
            error: error.into(),
        }
    }

    /// Builds an alert from a failed tool outcome.
    #[must_use]
    pub fn from_outcome(addon: &str, outcome: &ToolOutcome) -> Self {
        Self::new(
            addon,
            outcome.command(),
            outcome.output(),
            outcome.diagnostic(),
        )
    }

    /// Returns the name of the addon that raised the alert.
    #[must_use]
    pub const fn addon(&self) -> &str {
        self.addon.as_str()
    }

    /// Returns the command that failed.
    #[must_use]
    pub const fn command(&self) -> &str {
        self.command.as_str()
    }

    /// Returns captured output or the affected artefact.
    #[must_use]
    pub const fn output(&self) -> &str {
        self.output.as_str()
    }

    /// Returns the error description.
    #[must_use]
    pub const fn error(&self) -> &str {
        self.error.as_str()
    }
}

/// Append-only alert collector safe to share between worker threads.
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: Mutex<Vec<Alert>>,
}

impl AlertLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an alert.
    pub fn push(&self, alert: Alert) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert);
    }

    /// Returns the number of recorded alerts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the log, returning the alerts in recording order.
    #[must_use]
    pub fn into_alerts(self) -> Vec<Alert> {
        self.alerts
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
