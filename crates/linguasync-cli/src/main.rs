//! CLI entrypoint for linguasync.
//!
//! The binary delegates to [`linguasync::run`], which loads configuration,
//! dispatches one lifecycle event to the configured addons, and prints the
//! files they changed.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    linguasync::run(std::env::args_os(), &mut stdout, &mut stderr)
}
