//! Atomic replacement of tool-generated artefacts.

use std::fs;
use std::path::Path;

use linguasync_text::pot_diff;
use tracing::debug;

use super::ToolOutcome;
use crate::error::AddonError;

const TOOL_TARGET: &str = "linguasync_addons::tool";

/// What happened to the final artefact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The artefact did not exist and was created.
    Created,
    /// The artefact was replaced by a materially different version.
    Replaced,
    /// The new output matched the artefact apart from its creation date.
    Unchanged,
    /// The tool failed; the artefact was left untouched.
    Failed(ToolOutcome),
}

impl ReplaceOutcome {
    /// Returns `true` when the artefact on disk changed.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        matches!(self, Self::Created | Self::Replaced)
    }
}

/// Runs a tool that writes to a temporary file and promotes its output.
///
/// The temporary file is created (and closed) next to `final_path`, so the
/// final rename stays on one filesystem. `run` receives its path. The output
/// replaces `final_path` only when the tool succeeded and either
/// `final_path` does not exist or the two files differ materially; in every
/// other case the temporary file is removed.
///
/// # Errors
///
/// Returns an [`AddonError`] when the temporary file cannot be created or
/// compared, or when the final rename fails. Tool failures are reported as
/// [`ReplaceOutcome::Failed`] instead.
pub fn replace_artifact<F>(final_path: &Path, run: F) -> Result<ReplaceOutcome, AddonError>
where
    F: FnOnce(&Path) -> ToolOutcome,
{
    let parent = final_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let temp_path = tempfile::Builder::new()
        .prefix(".linguasync-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|err| AddonError::io(parent, err))?
        .into_temp_path();

    let outcome = run(&temp_path);
    if !outcome.succeeded() {
        return Ok(ReplaceOutcome::Failed(outcome));
    }

    let existed = final_path.exists();
    if existed && !pot_diff::files_materially_different(&temp_path, final_path)? {
        debug!(
            target: TOOL_TARGET,
            path = %final_path.display(),
            "generated artefact has no material changes"
        );
        return Ok(ReplaceOutcome::Unchanged);
    }

    let permissions = if existed {
        fs::metadata(final_path)
            .map_err(|err| AddonError::io(final_path, err))?
            .permissions()
    } else {
        default_permissions(&temp_path)?
    };
    fs::set_permissions(&temp_path, permissions).map_err(|err| AddonError::io(final_path, err))?;

    temp_path
        .persist(final_path)
        .map_err(|err| AddonError::io(final_path, err.error))?;
    Ok(if existed {
        ReplaceOutcome::Replaced
    } else {
        ReplaceOutcome::Created
    })
}

/// Temporary files are private to the owner; new artefacts get the usual
/// world-readable mode instead.
fn default_permissions(temp_path: &Path) -> Result<fs::Permissions, AddonError> {
    let permissions = fs::metadata(temp_path)
        .map_err(|err| AddonError::io(temp_path, err))?
        .permissions();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut readable = permissions;
        readable.set_mode(0o644);
        Ok(readable)
    }
    #[cfg(not(unix))]
    {
        Ok(permissions)
    }
}
