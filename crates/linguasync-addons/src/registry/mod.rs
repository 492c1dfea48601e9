//! Static addon registry.
//!
//! The registry is built once from the configured addon entries. Each entry
//! names an [`AddonKind`] and carries raw JSON settings; building validates
//! the settings, checks install eligibility against the component, and wires
//! the customize addon into the tool-driving addons as an explicit
//! [`ArgumentContributor`].

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::addon::{
    Addon, AddonEvent, AddonKind, AddonReport, ArgumentContributor, Eligibility,
};
use crate::error::AddonError;
use crate::host::{Component, MoCompiler};
use crate::orchestrator::{
    AuthorComments, Customize, GenerateMo, Msgmerge, UpdateConfigure, UpdateLinguas, Xgettext,
};
use crate::settings::{self, NoSettings};
use crate::tool::{DEFAULT_TIMEOUT, ToolExecutor};

const REGISTRY_TARGET: &str = "linguasync_addons::registry";

/// One configured addon.
#[derive(Debug, Clone, PartialEq)]
pub struct AddonEntry {
    name: String,
    settings: Value,
}

impl AddonEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(name: impl Into<String>, settings: Value) -> Self {
        Self {
            name: name.into(),
            settings,
        }
    }

    /// Returns the configured addon name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the raw settings.
    #[must_use]
    pub const fn settings(&self) -> &Value {
        &self.settings
    }
}

/// Host services the addons are built with.
#[derive(Clone)]
pub struct Services {
    executor: Arc<dyn ToolExecutor>,
    compiler: Arc<dyn MoCompiler>,
    tool_timeout: Duration,
    contribution_year: Option<i32>,
}

impl Services {
    /// Bundles the tool executor and the MO compiler.
    #[must_use]
    pub fn new(executor: Arc<dyn ToolExecutor>, compiler: Arc<dyn MoCompiler>) -> Self {
        Self {
            executor,
            compiler,
            tool_timeout: DEFAULT_TIMEOUT,
            contribution_year: None,
        }
    }

    /// Overrides the per-invocation tool timeout.
    #[must_use]
    pub const fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// Pins the year recorded in contributor comments.
    #[must_use]
    pub const fn with_contribution_year(mut self, year: i32) -> Self {
        self.contribution_year = Some(year);
        self
    }
}

/// Eligibility of one addon kind for a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCheck {
    /// Addon kind.
    pub kind: AddonKind,
    /// Verdict of the addon's eligibility check.
    pub eligibility: Eligibility,
}

/// Outcome of one addon handling one event.
#[derive(Debug)]
pub struct DispatchResult {
    /// Addon that handled the event.
    pub kind: AddonKind,
    /// Its report, or the unexpected error it hit.
    pub result: Result<AddonReport, AddonError>,
}

/// Registered addons in configuration order.
pub struct AddonRegistry {
    addons: Vec<Box<dyn Addon>>,
}

impl AddonRegistry {
    /// Builds the registry for `component`.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::UnknownAddon`] for unknown names,
    /// [`AddonError::AlreadyRegistered`] for duplicates,
    /// [`AddonError::Settings`] for invalid settings and
    /// [`AddonError::NotInstallable`] when an addon cannot operate on the
    /// component.
    pub fn from_entries(
        component: &dyn Component,
        entries: &[AddonEntry],
        services: &Services,
    ) -> Result<Self, AddonError> {
        let mut seen = BTreeSet::new();
        let mut kinds = Vec::with_capacity(entries.len());
        for entry in entries {
            let kind: AddonKind = entry.name().parse()?;
            if !seen.insert(kind) {
                return Err(AddonError::AlreadyRegistered {
                    name: kind.name().to_owned(),
                });
            }
            kinds.push((kind, entry.settings()));
        }

        let contributor = kinds
            .iter()
            .find(|(kind, _)| *kind == AddonKind::Customize)
            .map(|(_, value)| customize(value))
            .transpose()?;

        let mut addons = Vec::with_capacity(kinds.len());
        for (kind, value) in kinds {
            let addon = build(kind, value, services, contributor.as_ref())?;
            if let Eligibility::Ineligible { reason } = addon.can_install(component) {
                return Err(AddonError::NotInstallable {
                    name: kind.name().to_owned(),
                    reason,
                });
            }
            debug!(target: REGISTRY_TARGET, addon = kind.name(), "addon registered");
            addons.push(addon);
        }
        info!(target: REGISTRY_TARGET, count = addons.len(), "addon registry built");
        Ok(Self { addons })
    }

    /// Checks every addon kind, with default settings, against `component`.
    #[must_use]
    pub fn install_checks(component: &dyn Component, services: &Services) -> Vec<InstallCheck> {
        AddonKind::ALL
            .into_iter()
            .map(|kind| {
                let eligibility = match build(kind, &Value::Null, services, None) {
                    Ok(addon) => addon.can_install(component),
                    Err(err) => Eligibility::ineligible(err.to_string()),
                };
                InstallCheck { kind, eligibility }
            })
            .collect()
    }

    /// Returns the registered kinds in dispatch order.
    #[must_use]
    pub fn kinds(&self) -> Vec<AddonKind> {
        self.addons.iter().map(|addon| addon.kind()).collect()
    }

    /// Runs every addon subscribed to `event`.
    ///
    /// One addon's error does not stop the others.
    #[must_use]
    pub fn dispatch(
        &self,
        component: &dyn Component,
        event: &AddonEvent<'_>,
    ) -> Vec<DispatchResult> {
        let event_kind = event.kind();
        self.addons
            .iter()
            .filter(|addon| addon.kind().handles(event_kind))
            .map(|addon| {
                let kind = addon.kind();
                debug!(
                    target: REGISTRY_TARGET,
                    addon = kind.name(),
                    event = %event_kind,
                    "dispatching"
                );
                let result = addon.on_event(component, event);
                if let Err(err) = &result {
                    warn!(target: REGISTRY_TARGET, addon = kind.name(), %err, "addon failed");
                }
                DispatchResult { kind, result }
            })
            .collect()
    }
}

fn customize(value: &Value) -> Result<Arc<dyn ArgumentContributor>, AddonError> {
    let settings = settings::parse(AddonKind::Customize.name(), value)?;
    Ok(Arc::new(Customize::new(settings)))
}

fn build(
    kind: AddonKind,
    value: &Value,
    services: &Services,
    contributor: Option<&Arc<dyn ArgumentContributor>>,
) -> Result<Box<dyn Addon>, AddonError> {
    let name = kind.name();
    let addon: Box<dyn Addon> = match kind {
        AddonKind::GenerateMo => Box::new(GenerateMo::new(
            settings::parse(name, value)?,
            Arc::clone(&services.compiler),
        )?),
        AddonKind::UpdateLinguas => {
            settings::parse::<NoSettings>(name, value)?;
            Box::new(UpdateLinguas)
        }
        AddonKind::UpdateConfigure => {
            settings::parse::<NoSettings>(name, value)?;
            Box::new(UpdateConfigure::default())
        }
        AddonKind::Msgmerge => {
            let mut addon =
                Msgmerge::new(settings::parse(name, value)?, Arc::clone(&services.executor))
                    .with_timeout(services.tool_timeout);
            if let Some(contributor) = contributor {
                addon = addon.with_contributor(Arc::clone(contributor));
            }
            Box::new(addon)
        }
        AddonKind::Customize => Box::new(Customize::new(settings::parse(name, value)?)),
        AddonKind::AuthorComments => {
            let mut addon = AuthorComments::new(settings::parse(name, value)?);
            if let Some(year) = services.contribution_year {
                addon = addon.with_year(year);
            }
            Box::new(addon)
        }
        AddonKind::Xgettext => {
            let mut addon =
                Xgettext::new(settings::parse(name, value)?, Arc::clone(&services.executor))
                    .with_timeout(services.tool_timeout);
            if let Some(contributor) = contributor {
                addon = addon.with_contributor(Arc::clone(contributor));
            }
            Box::new(addon)
        }
    };
    Ok(addon)
}
