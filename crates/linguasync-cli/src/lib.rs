//! Command-line runtime for linguasync.
//!
//! The binary loads `linguasync.json`, builds the configured addons against
//! the translation tree found through the component file mask, raises one
//! lifecycle event, and prints a JSON report of the files each addon changed
//! together with how the host should commit them. Diagnostics go to stderr
//! through `tracing`.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use linguasync_addons::addon::{AddonEvent, Eligibility};
use linguasync_addons::host::{Component, Translation};
use linguasync_addons::tool::{ProcessExecutor, ToolExecutor};
use linguasync_addons::{
    AddonEntry, AddonKind, AddonRegistry, AlertKind, CommitMode, EventKind, Services,
};
use linguasync_config::{CONFIG_FILE_NAME, Config, ConfigError, ConfigOverrides, StatePaths};

mod alerts;
mod cli;
mod compiler;
mod component;
mod errors;
mod git;
mod lock;
mod telemetry;

use alerts::AlertStore;
use cli::{Cli, CliCommand};
use compiler::MsgfmtCompiler;
use component::DirectoryComponent;
use errors::AppError;
use git::GitRepository;
use lock::RunLock;

const CLI_TARGET: &str = "linguasync::cli";

/// Parses `args`, runs the requested command and reports the outcome.
///
/// JSON reports go to `stdout`; usage errors and failures go to `stderr`.
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) if !error.use_stderr() => {
            let _ = write!(stdout, "{}", error.render());
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            let _ = write!(stderr, "{}", AppError::CliUsage(error));
            return ExitCode::from(2);
        }
    };

    match execute(cli, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "linguasync: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Everything a command needs once configuration is loaded.
struct Runtime {
    config: Config,
    state: StatePaths,
    component: DirectoryComponent,
    services: Services,
}

fn execute<W: Write>(cli: Cli, stdout: &mut W) -> Result<(), AppError> {
    let runtime = bootstrap(&cli)?;
    match cli.command {
        CliCommand::List => list(&runtime, stdout),
        CliCommand::Run {
            event,
            previous_head,
            translation,
            author,
        } => {
            let _lock = RunLock::acquire(runtime.state.lock_path())?;
            let request = EventRequest {
                kind: event.into(),
                previous_head: previous_head.as_deref(),
                translation: translation.as_deref(),
                author: author.as_deref(),
            };
            run_event(&runtime, &request, stdout)
        }
    }
}

fn bootstrap(cli: &Cli) -> Result<Runtime, AppError> {
    let root = fs::canonicalize(&cli.repo).map_err(|source| AppError::Root {
        path: cli.repo.clone(),
        source: Arc::new(source),
    })?;
    let config_file = cli
        .config
        .clone()
        .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
    let config_path = Utf8PathBuf::from_path_buf(config_file).map_err(|path| {
        ConfigError::NonUtf8Path {
            path: path.display().to_string(),
        }
    })?;
    let config = Config::load(&config_path)?.with_overrides(ConfigOverrides {
        log_filter: cli.log_filter.clone(),
        log_format: cli.log_format,
        tool_timeout_secs: cli.tool_timeout,
    })?;
    telemetry::initialise(&config)?;
    info!(
        target: CLI_TARGET,
        root = %root.display(),
        config = %config_path,
        "configuration loaded"
    );

    let state = StatePaths::from_config(&config, &root)?;
    let alerts = AlertStore::load(state.alerts_path())?;
    let component = DirectoryComponent::new(
        GitRepository::new(root),
        config.component.clone(),
        alerts,
    );

    let executor: Arc<dyn ToolExecutor> = Arc::new(ProcessExecutor);
    let compiler = Arc::new(MsgfmtCompiler::new(
        Arc::clone(&executor),
        config.tool_timeout(),
    ));
    let services = Services::new(executor, compiler).with_tool_timeout(config.tool_timeout());

    Ok(Runtime {
        config,
        state,
        component,
        services,
    })
}

#[derive(Debug, Serialize)]
struct ListEntry {
    addon: AddonKind,
    description: &'static str,
    events: &'static [EventKind],
    enabled: bool,
    eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn list<W: Write>(runtime: &Runtime, stdout: &mut W) -> Result<(), AppError> {
    let entries: Vec<ListEntry> =
        AddonRegistry::install_checks(&runtime.component, &runtime.services)
            .into_iter()
            .map(|check| {
                let reason = match check.eligibility {
                    Eligibility::Eligible => None,
                    Eligibility::Ineligible { reason } => Some(reason),
                };
                ListEntry {
                    addon: check.kind,
                    description: check.kind.description(),
                    events: check.kind.events(),
                    enabled: runtime
                        .config
                        .addons
                        .iter()
                        .any(|addon| addon.name.trim() == check.kind.name()),
                    eligible: reason.is_none(),
                    reason,
                }
            })
            .collect();
    write_json(stdout, &entries)
}

/// Event payload as given on the command line.
struct EventRequest<'a> {
    kind: EventKind,
    previous_head: Option<&'a str>,
    translation: Option<&'a str>,
    author: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AddonOutput {
    addon: AddonKind,
    files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commit: Option<CommitMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct RunOutput {
    event: EventKind,
    addons: Vec<AddonOutput>,
    pending_alerts: Vec<AlertKind>,
}

fn run_event<W: Write>(
    runtime: &Runtime,
    request: &EventRequest<'_>,
    stdout: &mut W,
) -> Result<(), AppError> {
    let entries: Vec<AddonEntry> = runtime
        .config
        .addons
        .iter()
        .map(|addon| AddonEntry::new(addon.name.as_str(), addon.settings.clone()))
        .collect();
    let registry = AddonRegistry::from_entries(&runtime.component, &entries, &runtime.services)?;

    let translation = request
        .translation
        .map(|path| find_translation(&runtime.component, path))
        .transpose()?;
    let event = build_event(request, translation.as_ref())?;
    info!(
        target: CLI_TARGET,
        event = %request.kind,
        addons = ?registry.kinds(),
        "dispatching event"
    );

    let mut failed = 0_usize;
    let addons: Vec<AddonOutput> = registry
        .dispatch(&runtime.component, &event)
        .into_iter()
        .map(|dispatched| match dispatched.result {
            Ok(report) => AddonOutput {
                addon: dispatched.kind,
                files: report.files().to_vec(),
                commit: (!report.is_empty()).then_some(report.commit()),
                error: None,
            },
            Err(error) => {
                failed += 1;
                warn!(target: CLI_TARGET, addon = dispatched.kind.name(), %error, "addon failed");
                AddonOutput {
                    addon: dispatched.kind,
                    files: Vec::new(),
                    commit: None,
                    error: Some(error.to_string()),
                }
            }
        })
        .collect();

    write_json(
        stdout,
        &RunOutput {
            event: request.kind,
            addons,
            pending_alerts: runtime.component.pending_alerts(),
        },
    )?;
    if failed == 0 {
        Ok(())
    } else {
        Err(AppError::AddonsFailed { failed })
    }
}

fn build_event<'a>(
    request: &EventRequest<'a>,
    translation: Option<&'a Translation>,
) -> Result<AddonEvent<'a>, AppError> {
    let require_translation = |event: &'static str| {
        translation.ok_or(AppError::MissingArgument {
            event,
            argument: "translation",
        })
    };
    Ok(match request.kind {
        EventKind::PostAdd => AddonEvent::PostAdd {
            translation: require_translation("post-add")?,
        },
        EventKind::Daily => AddonEvent::Daily,
        EventKind::PreCommit => AddonEvent::PreCommit {
            translation: require_translation("pre-commit")?,
            author: request.author.ok_or(AppError::MissingArgument {
                event: "pre-commit",
                argument: "author",
            })?,
        },
        EventKind::PostUpdate => AddonEvent::PostUpdate {
            previous_head: request.previous_head,
        },
    })
}

fn find_translation(component: &dyn Component, path: &str) -> Result<Translation, AppError> {
    let wanted = component.repository().root().join(Path::new(path));
    component
        .translations()
        .into_iter()
        .find(|translation| translation.filename() == wanted)
        .ok_or_else(|| AppError::UnknownTranslation(path.to_owned()))
}

fn write_json<W: Write, T: Serialize>(stdout: &mut W, value: &T) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
