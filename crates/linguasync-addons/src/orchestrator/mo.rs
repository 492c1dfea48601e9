//! Binary catalogue generation.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use linguasync_text::potfiles::cleanup_path;
use linguasync_text::write_atomically;
use tracing::{debug, info, warn};

use super::ADDON_TARGET;
use crate::addon::{Addon, AddonEvent, AddonKind, AddonReport};
use crate::error::AddonError;
use crate::host::{Component, MoCompiler, Translation};
use crate::settings::MoSettings;
use crate::template::PathTemplate;

/// Compiles an MO file next to every committed catalogue.
pub struct GenerateMo {
    settings: MoSettings,
    template: PathTemplate,
    compiler: Arc<dyn MoCompiler>,
}

impl GenerateMo {
    /// Creates the addon.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Settings`] when the path template is invalid.
    pub fn new(settings: MoSettings, compiler: Arc<dyn MoCompiler>) -> Result<Self, AddonError> {
        let template = settings.template().map_err(|message| AddonError::Settings {
            name: AddonKind::GenerateMo.name().to_owned(),
            message,
        })?;
        Ok(Self {
            settings,
            template,
            compiler,
        })
    }

    /// Resolves the MO path for `translation`.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::InvalidPath`] when the template renders to an
    /// empty path or one outside the repository.
    pub fn output_path(
        &self,
        component: &dyn Component,
        translation: &Translation,
    ) -> Result<PathBuf, AddonError> {
        let filename = component.repository_path(translation.filename());
        let vars = BTreeMap::from([
            ("filename", filename.as_str()),
            ("language_code", translation.language_code()),
        ]);
        let rendered = self
            .template
            .render(&vars)
            .map_err(|err| AddonError::InvalidPath {
                path: self.template.source().to_owned(),
                message: err.to_string(),
            })?;
        let cleaned = cleanup_path(&rendered);
        if rendered.starts_with('/')
            || cleaned.is_empty()
            || cleaned.split('/').any(|part| part == "..")
        {
            return Err(AddonError::InvalidPath {
                path: rendered,
                message: "path must stay inside the repository".to_owned(),
            });
        }
        Ok(component.repository().root().join(cleaned))
    }
}

impl Addon for GenerateMo {
    fn kind(&self) -> AddonKind {
        AddonKind::GenerateMo
    }

    fn on_event(
        &self,
        component: &dyn Component,
        event: &AddonEvent<'_>,
    ) -> Result<AddonReport, AddonError> {
        let mut report = AddonReport::for_event(event);
        let AddonEvent::PreCommit { translation, .. } = event else {
            return Ok(report);
        };

        let output = match self.output_path(component, translation) {
            Ok(output) => output,
            Err(err) => {
                warn!(target: ADDON_TARGET, %err, "MO output path rejected, skipped");
                return Ok(report);
            }
        };

        let compiled = self.compiler.compile(translation, self.settings.fuzzy())?;
        if fs::read(&output).is_ok_and(|existing| existing == compiled) {
            debug!(target: ADDON_TARGET, path = %output.display(), "MO file unchanged");
            return Ok(report);
        }
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|err| AddonError::io(parent, err))?;
        }
        write_atomically(&output, &compiled)?;
        info!(
            target: ADDON_TARGET,
            path = %output.display(),
            language = translation.language_code(),
            "generated MO file"
        );
        report.push(component.repository_path(&output));
        Ok(report)
    }
}
