//! Child-process based tool execution.
//!
//! [`ProcessExecutor`] spawns the tool with piped output, drains stdout and
//! stderr on helper threads so a chatty tool cannot block on a full pipe,
//! and polls the child until it exits or the invocation timeout elapses.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::{ToolExecutor, ToolInvocation, ToolOutcome};

/// Tracing target for tool process operations.
const TOOL_TARGET: &str = "linguasync_addons::tool";

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Executes tools as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ToolExecutor for ProcessExecutor {
    fn execute(&self, invocation: &ToolInvocation) -> ToolOutcome {
        run_process(invocation)
    }
}

enum Exit {
    Finished(ExitStatus),
    TimedOut,
    WaitFailed(std::io::Error),
}

fn run_process(invocation: &ToolInvocation) -> ToolOutcome {
    let command_line = invocation.command_line();
    let mut command = Command::new(invocation.executable());
    command.args(invocation.arguments());
    if let Some(dir) = invocation.working_dir() {
        command.current_dir(dir);
    }
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    debug!(
        target: TOOL_TARGET,
        command = %command_line,
        timeout_secs = invocation.timeout().as_secs(),
        "spawning tool process"
    );

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) => {
            warn!(target: TOOL_TARGET, command = %command_line, %err, "tool failed to start");
            return ToolOutcome::failure(
                command_line,
                String::new(),
                format!("failed to start {}: {err}", invocation.executable()),
            );
        }
    };

    let stdout_reader = child.stdout.take().map(drain);
    let stderr_reader = child.stderr.take().map(drain);
    let exit = wait_for_exit(&mut child, invocation.timeout());
    let stdout = collect(stdout_reader);
    let stderr = collect(stderr_reader);
    let output = combine(&stdout, &stderr);

    match exit {
        Exit::Finished(status) if status.success() => {
            debug!(target: TOOL_TARGET, command = %command_line, "tool succeeded");
            ToolOutcome::success(command_line, output)
        }
        Exit::Finished(status) => {
            let diagnostic = if stderr.trim().is_empty() {
                format!(
                    "{} exited with status {}",
                    invocation.executable(),
                    status.code().unwrap_or(-1)
                )
            } else {
                stderr.trim().to_owned()
            };
            warn!(target: TOOL_TARGET, command = %command_line, ?status, "tool failed");
            ToolOutcome::failure(command_line, output, diagnostic)
        }
        Exit::TimedOut => {
            let timeout_secs = invocation.timeout().as_secs();
            warn!(target: TOOL_TARGET, command = %command_line, timeout_secs, "tool timed out");
            ToolOutcome::failure(
                command_line,
                output,
                format!("{} timed out after {timeout_secs}s", invocation.executable()),
            )
        }
        Exit::WaitFailed(err) => ToolOutcome::failure(
            command_line,
            output,
            format!("failed to wait for {}: {err}", invocation.executable()),
        ),
    }
}

/// Reads a pipe to the end on a helper thread.
fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        drop(reader.read_to_end(&mut buffer));
        buffer
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn combine(stdout: &str, stderr: &str) -> String {
    match (stdout.is_empty(), stderr.is_empty()) {
        (true, _) => stderr.to_owned(),
        (_, true) => stdout.to_owned(),
        _ => format!("{stdout}{stderr}"),
    }
}

/// Waits for the child to exit, killing it once the timeout elapses.
fn wait_for_exit(child: &mut Child, timeout: Duration) -> Exit {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Exit::Finished(status),
            Ok(None) => {
                if start.elapsed() > timeout {
                    drop(child.kill());
                    drop(child.wait());
                    return Exit::TimedOut;
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(err) => return Exit::WaitFailed(err),
        }
    }
}
