//! Git-backed [`Repository`] implementation.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use linguasync_addons::AddonError;
use linguasync_addons::host::Repository;
use tracing::debug;

const GIT_TARGET: &str = "linguasync::git";

/// Working tree queried through the `git` executable.
#[derive(Debug, Clone)]
pub(crate) struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    pub(crate) const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn git(&self, args: &[&str]) -> Result<Vec<u8>, AddonError> {
        debug!(target: GIT_TARGET, ?args, "running git");
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()
            .map_err(|error| AddonError::Repository {
                message: format!("cannot run git: {error}"),
            })?;
        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(AddonError::Repository {
                message: format!(
                    "git {} failed: {}",
                    args.join(" "),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            })
        }
    }
}

impl Repository for GitRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn last_revision(&self) -> Result<String, AddonError> {
        let stdout = self.git(&["rev-parse", "HEAD"])?;
        Ok(String::from_utf8_lossy(&stdout).trim().to_owned())
    }

    fn list_changed_files(&self, from: &str) -> Result<BTreeSet<String>, AddonError> {
        let range = format!("{from}..HEAD");
        let stdout = self.git(&["diff", "--name-only", "--no-renames", "-z", &range, "--"])?;
        Ok(parse_name_list(&stdout))
    }

    fn resolve_symlinks(&self, path: &str) -> Result<PathBuf, AddonError> {
        let invalid = |message: String| AddonError::InvalidPath {
            path: path.to_owned(),
            message,
        };
        let root = fs::canonicalize(&self.root).map_err(|error| invalid(error.to_string()))?;
        let resolved =
            fs::canonicalize(self.root.join(path)).map_err(|error| invalid(error.to_string()))?;
        if resolved.starts_with(&root) {
            Ok(resolved)
        } else {
            Err(invalid("resolves outside the repository".to_owned()))
        }
    }
}

/// Splits NUL-separated `git --name-only -z` output.
fn parse_name_list(stdout: &[u8]) -> BTreeSet<String> {
    stdout
        .split(|byte| *byte == 0)
        .filter(|name| !name.is_empty())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect()
}
