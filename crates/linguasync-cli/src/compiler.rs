//! Binary catalogue compilation through `msgfmt`.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use linguasync_addons::AddonError;
use linguasync_addons::host::{MoCompiler, Translation};
use linguasync_addons::tool::{ToolExecutor, ToolInvocation};

/// Compiles catalogues by running `msgfmt` into a scratch file.
pub(crate) struct MsgfmtCompiler {
    executor: Arc<dyn ToolExecutor>,
    timeout: Duration,
}

impl MsgfmtCompiler {
    pub(crate) const fn new(executor: Arc<dyn ToolExecutor>, timeout: Duration) -> Self {
        Self { executor, timeout }
    }

    fn invocation(
        &self,
        translation: &Translation,
        include_fuzzy: bool,
        output: &Path,
    ) -> ToolInvocation {
        let mut invocation = ToolInvocation::new("msgfmt").with_timeout(self.timeout);
        if include_fuzzy {
            invocation = invocation.arg("--use-fuzzy");
        }
        invocation
            .arg(format!("--output-file={}", output.display()))
            .path_arg(translation.filename())
    }
}

impl MoCompiler for MsgfmtCompiler {
    fn compile(
        &self,
        translation: &Translation,
        include_fuzzy: bool,
    ) -> Result<Vec<u8>, AddonError> {
        let compile_error = |message: String| AddonError::Compile {
            path: translation.filename().to_path_buf(),
            message,
        };
        let scratch = tempfile::Builder::new()
            .prefix(".linguasync-")
            .suffix(".mo")
            .tempfile()
            .map_err(|error| compile_error(error.to_string()))?
            .into_temp_path();

        let outcome = self
            .executor
            .execute(&self.invocation(translation, include_fuzzy, &scratch));
        if !outcome.succeeded() {
            return Err(compile_error(outcome.diagnostic().to_owned()));
        }
        fs::read(&scratch).map_err(|error| AddonError::io(scratch.to_path_buf(), error))
    }
}
