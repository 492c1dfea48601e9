//! Repository synchronisation addons for gettext translation trees.
//!
//! The `linguasync-addons` crate keeps the auxiliary files of a gettext tree
//! consistent with its translations: `LINGUAS`, the `ALL_LINGUAS` variable
//! of autoconf scripts, the `.pot` template, the merged `.po` catalogues and
//! the compiled `.mo` binaries.
//!
//! # Architecture
//!
//! The host owns the repository, the translation database and the commit
//! machinery. It exposes them through the traits in [`host`] and raises
//! lifecycle events ([`addon::AddonEvent`]). An [`AddonRegistry`] built once
//! from configuration routes each event to the subscribed addons in
//! [`orchestrator`], which:
//!
//! 1. consult the [`gate`] to skip work when nothing relevant changed,
//! 2. edit files with the pure algorithms from `linguasync-text`, or run
//!    `msgmerge`/`xgettext` through a [`tool::ToolExecutor`],
//! 3. report the files they changed in an [`AddonReport`] and surface
//!    expected failures as [`Alert`]s on the component.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use linguasync_addons::addon::AddonEvent;
//! use linguasync_addons::host::{Component, MoCompiler};
//! use linguasync_addons::registry::{AddonEntry, AddonRegistry, Services};
//! use linguasync_addons::tool::ProcessExecutor;
//!
//! fn daily(
//!     component: &dyn Component,
//!     compiler: Arc<dyn MoCompiler>,
//! ) -> Result<(), linguasync_addons::AddonError> {
//!     let services = Services::new(Arc::new(ProcessExecutor), compiler);
//!     let entries = [AddonEntry::new("gettext.linguas", serde_json::Value::Null)];
//!     let registry = AddonRegistry::from_entries(component, &entries, &services)?;
//!     for outcome in registry.dispatch(component, &AddonEvent::Daily) {
//!         let report = outcome.result?;
//!         println!("{}: {:?}", outcome.kind, report.files());
//!     }
//!     Ok(())
//! }
//! ```

pub mod addon;
pub mod alert;
pub mod error;
pub mod gate;
pub mod host;
pub mod orchestrator;
pub mod registry;
pub mod settings;
pub mod template;
pub mod tool;

#[cfg(test)]
mod tests;

pub use self::addon::{Addon, AddonKind, AddonReport, CommitMode, EventKind};
pub use self::alert::{Alert, AlertKind, AlertLog};
pub use self::error::AddonError;
pub use self::registry::{AddonEntry, AddonRegistry, Services};
