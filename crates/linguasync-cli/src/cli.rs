//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use linguasync_addons::EventKind;
use linguasync_config::LogFormat;

/// Runs gettext maintenance addons against a translation tree.
#[derive(Parser, Debug)]
#[command(name = "linguasync", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Root of the repository working tree.
    #[arg(long, global = true, default_value = ".")]
    pub(crate) repo: PathBuf,
    /// Configuration file; defaults to `linguasync.json` in the repository.
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,
    /// Overrides the configured `tracing` filter.
    #[arg(long, global = true)]
    pub(crate) log_filter: Option<String>,
    /// Overrides the configured log format (`compact` or `json`).
    #[arg(long, global = true)]
    pub(crate) log_format: Option<LogFormat>,
    /// Overrides the per-tool timeout, in seconds.
    #[arg(long, global = true)]
    pub(crate) tool_timeout: Option<u64>,
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Lists every addon and whether it can operate on the component.
    List,
    /// Raises one lifecycle event and runs the subscribed addons.
    Run {
        /// Event to raise.
        #[arg(value_enum)]
        event: EventArg,
        /// Revision before the update, for `post-update`.
        #[arg(long)]
        previous_head: Option<String>,
        /// Repository-relative catalogue, for `post-add` and `pre-commit`.
        #[arg(long)]
        translation: Option<String>,
        /// Commit author, for `pre-commit`.
        #[arg(long)]
        author: Option<String>,
    },
}

/// Event names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum EventArg {
    /// A translation was added.
    PostAdd,
    /// Periodic maintenance.
    Daily,
    /// A translation is about to be committed.
    PreCommit,
    /// The repository was updated from upstream.
    PostUpdate,
}

impl From<EventArg> for EventKind {
    fn from(value: EventArg) -> Self {
        match value {
            EventArg::PostAdd => Self::PostAdd,
            EventArg::Daily => Self::Daily,
            EventArg::PreCommit => Self::PreCommit,
            EventArg::PostUpdate => Self::PostUpdate,
        }
    }
}
