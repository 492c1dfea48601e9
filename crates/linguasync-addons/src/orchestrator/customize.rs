//! Output customisation shared with the tool-driving addons.

use crate::addon::{Addon, AddonEvent, AddonKind, AddonReport, ArgumentContributor};
use crate::error::AddonError;
use crate::host::Component;
use crate::settings::{CustomizeSettings, DEFAULT_WIDTH};

/// Passes output formatting preferences to `msgmerge` and `xgettext`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Customize {
    settings: CustomizeSettings,
}

impl Customize {
    /// Creates the addon from validated settings.
    #[must_use]
    pub const fn new(settings: CustomizeSettings) -> Self {
        Self { settings }
    }

    fn wrap_args(&self) -> Vec<String> {
        if self.settings.width() == DEFAULT_WIDTH {
            Vec::new()
        } else {
            vec!["--no-wrap".to_owned()]
        }
    }
}

impl Addon for Customize {
    fn kind(&self) -> AddonKind {
        AddonKind::Customize
    }

    fn on_event(
        &self,
        _component: &dyn Component,
        event: &AddonEvent<'_>,
    ) -> Result<AddonReport, AddonError> {
        Ok(AddonReport::for_event(event))
    }
}

impl ArgumentContributor for Customize {
    fn msgmerge_args(&self) -> Vec<String> {
        self.wrap_args()
    }

    fn xgettext_args(&self) -> Vec<String> {
        self.wrap_args()
    }
}
