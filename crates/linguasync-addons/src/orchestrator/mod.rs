//! Addon implementations.
//!
//! Each orchestrator follows the same shape: decide whether to run, read
//! the artefact, apply the pure edit from `linguasync-text` or run the
//! external tool, then write and report the path only when something
//! changed. Expected failures end up as alerts on the component.

mod authors;
mod configure;
mod customize;
mod linguas;
mod mo;
mod msgmerge;
mod xgettext;

use std::path::Path;

use tracing::warn;

pub use self::authors::AuthorComments;
pub use self::configure::{CONFIGURE_FILES, UpdateConfigure};
pub use self::customize::Customize;
pub use self::linguas::{UpdateLinguas, linguas_path};
pub use self::mo::GenerateMo;
pub use self::msgmerge::Msgmerge;
pub use self::xgettext::Xgettext;

use crate::addon::{AddonKind, AddonReport, Eligibility};
use crate::alert::{Alert, AlertKind};
use crate::error::AddonError;
use crate::host::Component;
use crate::tool::ToolExecutor;

const ADDON_TARGET: &str = "linguasync_addons::orchestrator";

/// Records a single alert that ends the run and returns an empty report.
fn abort_with_alert(
    component: &dyn Component,
    kind: AlertKind,
    alert: Alert,
    report: AddonReport,
) -> Result<AddonReport, AddonError> {
    warn!(
        target: ADDON_TARGET,
        addon = alert.addon(),
        command = alert.command(),
        error = alert.error(),
        "addon run aborted"
    );
    component.trigger_alerts(kind, vec![alert])?;
    Ok(report)
}

/// Eligibility of an addon that needs `tool` on the host.
fn tool_eligibility(executor: &dyn ToolExecutor, addon: AddonKind, tool: &str) -> Eligibility {
    if executor.locate(tool).is_some() {
        Eligibility::Eligible
    } else {
        Eligibility::ineligible(format!("{addon} needs '{tool}', which is not installed"))
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
