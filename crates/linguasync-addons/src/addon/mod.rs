//! The addon capability interface.
//!
//! Every gettext integration is one variant of the closed [`AddonKind`]
//! enum and one implementation of the [`Addon`] trait. An addon declares the
//! [`EventKind`]s it reacts to; the registry only hands it those events.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AddonError;
use crate::host::{Component, FileFormat, Translation};

/// Closed set of gettext addons.
///
/// # Example
///
/// ```
/// use linguasync_addons::addon::{AddonKind, EventKind};
///
/// let kind: AddonKind = "gettext.linguas".parse()?;
/// assert_eq!(kind, AddonKind::UpdateLinguas);
/// assert!(kind.handles(EventKind::Daily));
/// # Ok::<(), linguasync_addons::AddonError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AddonKind {
    /// Compiles MO files for changed catalogues.
    #[serde(rename = "gettext.mo")]
    GenerateMo,
    /// Keeps `LINGUAS` in sync with the translations.
    #[serde(rename = "gettext.linguas")]
    UpdateLinguas,
    /// Keeps `ALL_LINGUAS` in `configure` scripts in sync.
    #[serde(rename = "gettext.configure")]
    UpdateConfigure,
    /// Merges the template into every catalogue.
    #[serde(rename = "gettext.msgmerge")]
    Msgmerge,
    /// Customises gettext tool output.
    #[serde(rename = "gettext.customize")]
    Customize,
    /// Records contributors in the catalogue header.
    #[serde(rename = "gettext.authors")]
    AuthorComments,
    /// Regenerates the template from sources.
    #[serde(rename = "gettext.xgettext")]
    Xgettext,
}

impl AddonKind {
    /// Every addon kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::GenerateMo,
        Self::UpdateLinguas,
        Self::UpdateConfigure,
        Self::Msgmerge,
        Self::Customize,
        Self::AuthorComments,
        Self::Xgettext,
    ];

    /// Returns the canonical addon name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GenerateMo => "gettext.mo",
            Self::UpdateLinguas => "gettext.linguas",
            Self::UpdateConfigure => "gettext.configure",
            Self::Msgmerge => "gettext.msgmerge",
            Self::Customize => "gettext.customize",
            Self::AuthorComments => "gettext.authors",
            Self::Xgettext => "gettext.xgettext",
        }
    }

    /// Returns a one-line description for listings.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::GenerateMo => "Generate MO files for changed PO files",
            Self::UpdateLinguas => "Update the LINGUAS file",
            Self::UpdateConfigure => "Update ALL_LINGUAS in the configure script",
            Self::Msgmerge => "Update PO files to match the POT file (msgmerge)",
            Self::Customize => "Customize gettext output",
            Self::AuthorComments => "Contributors in the PO header comment",
            Self::Xgettext => "Update the POT file (xgettext)",
        }
    }

    /// Returns the events this addon reacts to.
    #[must_use]
    pub const fn events(self) -> &'static [EventKind] {
        match self {
            Self::GenerateMo | Self::AuthorComments => &[EventKind::PreCommit],
            Self::UpdateLinguas | Self::UpdateConfigure => &[EventKind::PostAdd, EventKind::Daily],
            Self::Msgmerge | Self::Xgettext => &[EventKind::PostUpdate],
            Self::Customize => &[],
        }
    }

    /// Returns `true` when the addon reacts to `event`.
    #[must_use]
    pub fn handles(self, event: EventKind) -> bool {
        self.events().contains(&event)
    }
}

impl fmt::Display for AddonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AddonKind {
    type Err = AddonError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name.trim())
            .ok_or_else(|| AddonError::UnknownAddon {
                name: name.to_owned(),
            })
    }
}

/// Lifecycle events the host raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// A translation was added to the component.
    PostAdd,
    /// Periodic maintenance.
    Daily,
    /// A translation is about to be committed.
    PreCommit,
    /// The repository was updated from upstream.
    PostUpdate,
}

impl EventKind {
    /// Returns the event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostAdd => "post-add",
            Self::Daily => "daily",
            Self::PreCommit => "pre-commit",
            Self::PostUpdate => "post-update",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event together with its payload.
#[derive(Debug, Clone, Copy)]
pub enum AddonEvent<'a> {
    /// A translation was added.
    PostAdd {
        /// The new translation.
        translation: &'a Translation,
    },
    /// Periodic maintenance of the whole component.
    Daily,
    /// A translation is about to be committed by `author`.
    PreCommit {
        /// The translation being committed.
        translation: &'a Translation,
        /// Commit author, usually `Name <email>`.
        author: &'a str,
    },
    /// The repository was updated.
    PostUpdate {
        /// Revision before the update; `None` on the first update.
        previous_head: Option<&'a str>,
    },
}

impl AddonEvent<'_> {
    /// Returns the kind of the event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::PostAdd { .. } => EventKind::PostAdd,
            Self::Daily => EventKind::Daily,
            Self::PreCommit { .. } => EventKind::PreCommit,
            Self::PostUpdate { .. } => EventKind::PostUpdate,
        }
    }

    /// Returns how files changed in response to this event are committed.
    #[must_use]
    pub const fn commit_mode(&self) -> CommitMode {
        match self {
            Self::PostAdd { .. } | Self::PreCommit { .. } => CommitMode::WithTranslation,
            Self::Daily | Self::PostUpdate { .. } => CommitMode::Standalone,
        }
    }
}

/// How the host should commit the files an addon changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitMode {
    /// Add the files to the pending translation commit.
    WithTranslation,
    /// Commit and push the files on their own.
    Standalone,
}

/// Files an addon changed while handling one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonReport {
    files: Vec<String>,
    commit: CommitMode,
}

impl AddonReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new(commit: CommitMode) -> Self {
        Self {
            files: Vec::new(),
            commit,
        }
    }

    /// Creates an empty report for `event`.
    #[must_use]
    pub const fn for_event(event: &AddonEvent<'_>) -> Self {
        Self::new(event.commit_mode())
    }

    /// Records a repository-relative path to commit.
    pub fn push(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.files.contains(&path) {
            self.files.push(path);
        }
    }

    /// Returns the changed repository-relative paths.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Returns the commit mode.
    #[must_use]
    pub const fn commit(&self) -> CommitMode {
        self.commit
    }

    /// Returns `true` when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Whether an addon can operate on a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// The addon can be installed.
    Eligible,
    /// The addon cannot be installed.
    Ineligible {
        /// Why not.
        reason: String,
    },
}

impl Eligibility {
    /// Creates an ineligible verdict.
    #[must_use]
    pub fn ineligible(reason: impl Into<String>) -> Self {
        Self::Ineligible {
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`Eligibility::Eligible`].
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// Returns the first ineligible verdict of `self` and `next`.
    #[must_use]
    pub fn and_then(self, next: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Eligible => next(),
            ineligible @ Self::Ineligible { .. } => ineligible,
        }
    }
}

/// Baseline eligibility shared by every gettext addon.
#[must_use]
pub fn gettext_eligibility(component: &dyn Component) -> Eligibility {
    match component.file_format() {
        FileFormat::Po | FileFormat::PoMono => Eligibility::Eligible,
        FileFormat::Other(id) => {
            Eligibility::ineligible(format!("file format '{id}' is not gettext PO"))
        }
    }
}

/// An installable unit reacting to lifecycle events.
pub trait Addon: Send + Sync {
    /// Returns the addon kind.
    fn kind(&self) -> AddonKind;

    /// Checks whether the addon can operate on `component`.
    fn can_install(&self, component: &dyn Component) -> Eligibility {
        gettext_eligibility(component)
    }

    /// Handles one event.
    ///
    /// Expected failures such as a failing tool or a missing template are
    /// reported as alerts through the component, not as errors.
    ///
    /// # Errors
    ///
    /// Returns an [`AddonError`] for unexpected I/O or host failures.
    fn on_event(
        &self,
        component: &dyn Component,
        event: &AddonEvent<'_>,
    ) -> Result<AddonReport, AddonError>;
}

/// Extra command-line arguments one addon contributes to another's tools.
pub trait ArgumentContributor: Send + Sync {
    /// Arguments appended to `msgmerge` invocations.
    fn msgmerge_args(&self) -> Vec<String>;

    /// Arguments appended to `xgettext` invocations.
    fn xgettext_args(&self) -> Vec<String>;
}
