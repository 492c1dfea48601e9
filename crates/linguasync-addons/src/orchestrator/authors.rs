//! Contributor lines in catalogue headers.

use linguasync_text::LineDocument;
use linguasync_text::contributors::{Contributor, update_contributor};
use time::OffsetDateTime;
use tracing::{debug, info};

use super::ADDON_TARGET;
use crate::addon::{Addon, AddonEvent, AddonKind, AddonReport};
use crate::error::AddonError;
use crate::host::Component;
use crate::settings::AuthorsSettings;

/// Records the committing author in the PO header comments.
#[derive(Debug, Clone, Default)]
pub struct AuthorComments {
    settings: AuthorsSettings,
    year: Option<i32>,
}

impl AuthorComments {
    /// Creates the addon; contributions are dated with the current year.
    #[must_use]
    pub const fn new(settings: AuthorsSettings) -> Self {
        Self {
            settings,
            year: None,
        }
    }

    /// Pins the contribution year.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    fn year(&self) -> i32 {
        self.year
            .unwrap_or_else(|| OffsetDateTime::now_utc().year())
    }
}

impl Addon for AuthorComments {
    fn kind(&self) -> AddonKind {
        AddonKind::AuthorComments
    }

    fn on_event(
        &self,
        component: &dyn Component,
        event: &AddonEvent<'_>,
    ) -> Result<AddonReport, AddonError> {
        let mut report = AddonReport::for_event(event);
        let AddonEvent::PreCommit { translation, author } = event else {
            return Ok(report);
        };
        if author.trim().is_empty() || self.settings.is_ignored(author) {
            debug!(target: ADDON_TARGET, author, "author not recorded");
            return Ok(report);
        }
        let path = translation.filename();
        if !path.is_file() {
            return Ok(report);
        }

        let contributor = Contributor::parse(author);
        let document = LineDocument::read(path)?;
        let updated = update_contributor(document.into_lines(), &contributor, self.year());
        if updated.write_if_changed(path)? {
            info!(
                target: ADDON_TARGET,
                path = %path.display(),
                author = contributor.name(),
                "recorded contributor"
            );
            report.push(component.repository_path(path));
        }
        Ok(report)
    }
}
