//! Test doubles for the host collaborators.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use mockall::mock;
use tempfile::TempDir;

use crate::alert::{Alert, AlertKind};
use crate::error::AddonError;
use crate::host::{Component, FileFormat, MoCompiler, Repository, Translation};
use crate::tool::{ToolExecutor, ToolInvocation, ToolOutcome};

mock! {
    pub Executor {}
    impl ToolExecutor for Executor {
        fn execute(&self, invocation: &ToolInvocation) -> ToolOutcome;
        fn locate(&self, name: &str) -> Option<PathBuf>;
    }
}

/// Builds a mock executor that reports every tool as installed and never
/// expects to run anything.
pub fn installed_executor() -> MockExecutor {
    let mut executor = MockExecutor::new();
    executor
        .expect_locate()
        .returning(|name| Some(PathBuf::from("/usr/bin").join(name)));
    executor
}

/// Working tree backed by a temporary directory.
pub struct FakeRepository {
    dir: TempDir,
    changed: Option<BTreeSet<String>>,
    queries: AtomicUsize,
}

impl Repository for FakeRepository {
    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn last_revision(&self) -> Result<String, AddonError> {
        Ok("head".to_owned())
    }

    fn list_changed_files(&self, _from: &str) -> Result<BTreeSet<String>, AddonError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.changed.clone().ok_or_else(|| AddonError::Repository {
            message: "unknown revision".to_owned(),
        })
    }

    fn resolve_symlinks(&self, path: &str) -> Result<PathBuf, AddonError> {
        let invalid = |message: String| AddonError::InvalidPath {
            path: path.to_owned(),
            message,
        };
        let root = fs::canonicalize(self.dir.path()).map_err(|err| invalid(err.to_string()))?;
        let resolved =
            fs::canonicalize(self.dir.path().join(path)).map_err(|err| invalid(err.to_string()))?;
        if resolved.starts_with(&root) {
            Ok(resolved)
        } else {
            Err(invalid("outside repository".to_owned()))
        }
    }
}

/// Component whose answers are configured by the test.
pub struct FakeComponent {
    repository: FakeRepository,
    format: FileFormat,
    codes: BTreeSet<String>,
    new_base: Option<String>,
    filemask: String,
    translations: Vec<Translation>,
    bug_address: Option<String>,
    pending: Mutex<BTreeSet<AlertKind>>,
    triggered: Mutex<Vec<(AlertKind, Vec<Alert>)>>,
}

impl FakeComponent {
    pub fn new() -> Self {
        Self {
            repository: FakeRepository {
                dir: TempDir::new().expect("temp dir"),
                changed: Some(BTreeSet::new()),
                queries: AtomicUsize::new(0),
            },
            format: FileFormat::Po,
            codes: BTreeSet::new(),
            new_base: None,
            filemask: "po/*.po".to_owned(),
            translations: Vec::new(),
            bug_address: None,
            pending: Mutex::new(BTreeSet::new()),
            triggered: Mutex::new(Vec::new()),
        }
    }

    pub fn with_changed_files(mut self, files: &[&str]) -> Self {
        self.repository.changed = Some(files.iter().map(|file| (*file).to_owned()).collect());
        self
    }

    pub fn with_failing_diff(mut self) -> Self {
        self.repository.changed = None;
        self
    }

    pub fn with_pending_alert(self, kind: AlertKind) -> Self {
        self.pending.lock().expect("pending lock").insert(kind);
        self
    }

    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_codes(mut self, codes: &[&str]) -> Self {
        self.codes = codes.iter().map(|code| (*code).to_owned()).collect();
        self
    }

    pub fn with_new_base(mut self, new_base: &str) -> Self {
        self.new_base = Some(new_base.to_owned());
        self
    }

    pub fn with_filemask(mut self, filemask: &str) -> Self {
        self.filemask = filemask.to_owned();
        self
    }

    pub fn with_bug_address(mut self, address: &str) -> Self {
        self.bug_address = Some(address.to_owned());
        self
    }

    /// Adds a translation whose file lives at `relative` below the root.
    pub fn with_translation(mut self, code: &str, relative: &str) -> Self {
        let path = self.root().join(relative);
        self.translations.push(Translation::new(code, path));
        self
    }

    /// Adds the source translation, optionally being the template itself.
    pub fn with_source(mut self, code: &str, relative: &str, is_template: bool) -> Self {
        let path = self.root().join(relative);
        self.translations
            .push(Translation::new(code, path).as_source(is_template));
        self
    }

    pub fn root(&self) -> &Path {
        self.repository.dir.path()
    }

    /// Writes `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        self.write_bytes(relative, content.as_bytes())
    }

    pub fn write_bytes(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, content).expect("write file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).expect("read file")
    }

    pub fn read_bytes(&self, relative: &str) -> Vec<u8> {
        fs::read(self.root().join(relative)).expect("read file")
    }

    pub fn translation(&self, code: &str) -> Translation {
        self.translations
            .iter()
            .find(|translation| translation.language_code() == code)
            .cloned()
            .expect("translation configured")
    }

    pub fn has_pending(&self, kind: AlertKind) -> bool {
        self.has_pending_alert(kind)
    }

    pub fn repository_queries(&self) -> usize {
        self.repository.queries.load(Ordering::SeqCst)
    }

    /// Returns every `trigger_alerts` call in order.
    pub fn triggered(&self) -> Vec<(AlertKind, Vec<Alert>)> {
        self.triggered.lock().expect("triggered lock").clone()
    }

    /// Returns the alerts of the most recent batch of `kind`.
    pub fn last_alerts(&self, kind: AlertKind) -> Option<Vec<Alert>> {
        self.triggered()
            .into_iter()
            .rev()
            .find(|(triggered, _)| *triggered == kind)
            .map(|(_, alerts)| alerts)
    }
}

impl Component for FakeComponent {
    fn repository(&self) -> &dyn Repository {
        &self.repository
    }

    fn file_format(&self) -> FileFormat {
        self.format.clone()
    }

    fn language_codes(&self) -> BTreeSet<String> {
        self.codes.clone()
    }

    fn new_base(&self) -> Option<&str> {
        self.new_base.as_deref()
    }

    fn filemask(&self) -> &str {
        &self.filemask
    }

    fn translations(&self) -> Vec<Translation> {
        self.translations.clone()
    }

    fn report_source_bugs(&self) -> Option<&str> {
        self.bug_address.as_deref()
    }

    fn has_pending_alert(&self, kind: AlertKind) -> bool {
        self.pending.lock().expect("pending lock").contains(&kind)
    }

    fn trigger_alerts(&self, kind: AlertKind, alerts: Vec<Alert>) -> Result<(), AddonError> {
        let mut pending = self.pending.lock().expect("pending lock");
        if alerts.is_empty() {
            pending.remove(&kind);
        } else {
            pending.insert(kind);
        }
        self.triggered
            .lock()
            .expect("triggered lock")
            .push((kind, alerts));
        Ok(())
    }
}

/// Compiler producing a recognisable payload per translation.
pub struct FakeCompiler;

impl FakeCompiler {
    pub fn payload(translation: &Translation, include_fuzzy: bool) -> Vec<u8> {
        format!("MO {} fuzzy={include_fuzzy}", translation.language_code()).into_bytes()
    }
}

impl MoCompiler for FakeCompiler {
    fn compile(
        &self,
        translation: &Translation,
        include_fuzzy: bool,
    ) -> Result<Vec<u8>, AddonError> {
        Ok(Self::payload(translation, include_fuzzy))
    }
}

/// Executor that writes canned output to the file the tool was asked to
/// produce and records every invocation.
pub struct ScriptedExecutor {
    output: Vec<u8>,
    fail_when: Option<String>,
    invocations: Mutex<Vec<ToolInvocation>>,
}

impl ScriptedExecutor {
    pub fn writing(output: &str) -> Self {
        Self::writing_bytes(output.as_bytes())
    }

    pub fn writing_bytes(output: &[u8]) -> Self {
        Self {
            output: output.to_vec(),
            fail_when: None,
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Fails every invocation with an argument containing `needle`.
    pub fn failing_when(mut self, needle: &str) -> Self {
        self.fail_when = Some(needle.to_owned());
        self
    }

    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.invocations.lock().expect("invocations lock").clone()
    }
}

fn output_file(invocation: &ToolInvocation) -> Option<PathBuf> {
    let args = invocation.arguments();
    args.iter()
        .find_map(|arg| arg.strip_prefix("--output-file="))
        .map(PathBuf::from)
        .or_else(|| {
            args.iter()
                .position(|arg| arg == "-o")
                .and_then(|index| args.get(index + 1))
                .map(PathBuf::from)
        })
}

impl ToolExecutor for ScriptedExecutor {
    fn execute(&self, invocation: &ToolInvocation) -> ToolOutcome {
        self.invocations
            .lock()
            .expect("invocations lock")
            .push(invocation.clone());
        let command = invocation.command_line();
        if let Some(needle) = &self.fail_when {
            if invocation.arguments().iter().any(|arg| arg.contains(needle.as_str())) {
                return ToolOutcome::failure(command, "", format!("cannot process {needle}"));
            }
        }
        if let Some(path) = output_file(invocation) {
            fs::write(path, &self.output).expect("write tool output");
        }
        ToolOutcome::success(command, "")
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/usr/bin").join(name))
    }
}
