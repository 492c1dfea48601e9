//! External tool invocation.
//!
//! Addons drive gettext tools through the [`ToolExecutor`] trait. An
//! executor never fails: spawn errors, non-zero exits and timeouts are all
//! reported as a [`ToolOutcome`] whose `succeeded` flag is `false`, so the
//! caller can turn them into alerts and carry on with the next item.
//!
//! [`ProcessExecutor`] spawns real child processes. [`replace_artifact`]
//! wraps a tool that writes one output file so that the output only replaces
//! the existing artefact when it changed materially.

mod artifact;
mod process;

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use self::artifact::{ReplaceOutcome, replace_artifact};
pub use self::process::ProcessExecutor;

/// Default upper bound on the run time of one tool invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Description of one external tool run.
///
/// # Example
///
/// ```
/// use linguasync_addons::tool::ToolInvocation;
///
/// let invocation = ToolInvocation::new("msgmerge")
///     .arg("--previous")
///     .args(["de.po", "demo pot"]);
/// assert_eq!(invocation.command_line(), "msgmerge --previous de.po 'demo pot'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    executable: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Duration,
}

impl ToolInvocation {
    /// Creates an invocation with no arguments and the default timeout.
    #[must_use]
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            working_dir: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Appends a path argument.
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    /// Sets the working directory of the child process.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Overrides the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the executable name or path.
    #[must_use]
    pub const fn executable(&self) -> &str {
        self.executable.as_str()
    }

    /// Returns the arguments.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Returns the working directory, if set.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Returns the timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Renders the invocation as a shell-like command line for diagnostics.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.executable.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote(word: &str) -> String {
    if !word.is_empty() && !word.contains(|c: char| c.is_whitespace() || c == '\'' || c == '"') {
        return word.to_owned();
    }
    format!("'{}'", word.replace('\'', "'\\''"))
}

/// Result of running an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    succeeded: bool,
    command: String,
    output: String,
    diagnostic: String,
}

impl ToolOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub fn success(command: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            command: command.into(),
            output: output.into(),
            diagnostic: String::new(),
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failure(
        command: impl Into<String>,
        output: impl Into<String>,
        diagnostic: impl Into<String>,
    ) -> Self {
        Self {
            succeeded: false,
            command: command.into(),
            output: output.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// Returns `true` when the tool exited successfully.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Returns the command line that was run.
    #[must_use]
    pub const fn command(&self) -> &str {
        self.command.as_str()
    }

    /// Returns the captured standard output and error.
    #[must_use]
    pub const fn output(&self) -> &str {
        self.output.as_str()
    }

    /// Returns the failure description, empty on success.
    #[must_use]
    pub const fn diagnostic(&self) -> &str {
        self.diagnostic.as_str()
    }
}

/// Trait abstracting tool execution for testability.
///
/// The production implementation is [`ProcessExecutor`]. Test code can
/// implement this trait to return canned outcomes without gettext installed.
///
/// # Example
///
/// ```
/// use linguasync_addons::tool::{ToolExecutor, ToolInvocation, ToolOutcome};
///
/// struct AlwaysFails;
///
/// impl ToolExecutor for AlwaysFails {
///     fn execute(&self, invocation: &ToolInvocation) -> ToolOutcome {
///         ToolOutcome::failure(invocation.command_line(), "", "not today")
///     }
/// }
///
/// let outcome = AlwaysFails.execute(&ToolInvocation::new("xgettext"));
/// assert!(!outcome.succeeded());
/// ```
pub trait ToolExecutor: Send + Sync {
    /// Runs the tool to completion and reports how it went.
    fn execute(&self, invocation: &ToolInvocation) -> ToolOutcome;

    /// Locates `name` so eligibility checks can tell whether the tool is
    /// installed.
    fn locate(&self, name: &str) -> Option<PathBuf> {
        find_executable(name)
    }
}

/// Locates an executable on `PATH`.
///
/// Names containing a path separator are checked directly.
#[must_use]
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|path| is_executable(path))
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}
