//! Execution of tool commands.
//!
//! Everything that shells out goes through [`ToolRunner`], so the pipeline
//! can be driven by a scripted runner in tests.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::orchestrator::CancelHandle;

use super::command::ToolCommand;
use super::types::{ToolError, ToolOutput, ToolResult};

/// Poll interval while waiting on a child process.
const WAIT_POLL: Duration = Duration::from_millis(100);

/// Something that can run a [`ToolCommand`] to completion.
pub trait ToolRunner: Send + Sync {
    /// Run the command and capture its output.
    ///
    /// A non-zero exit is not an error at this level; use [`run_checked`]
    /// for that.
    fn run(&self, command: &ToolCommand) -> ToolResult<ToolOutput>;
}

/// Run a command and turn a non-zero exit into [`ToolError::Failed`].
pub fn run_checked(runner: &dyn ToolRunner, command: &ToolCommand) -> ToolResult<ToolOutput> {
    let output = runner.run(command)?;
    if !output.is_success() {
        return Err(ToolError::failed(
            command.tool,
            output.exit_code.unwrap_or(-1),
            output.stderr_lossy(),
        ));
    }
    Ok(output)
}

/// Runs tools as blocking child processes.
///
/// With a cancel handle attached, a cancellation request kills the
/// in-flight child.
#[derive(Default)]
pub struct SystemRunner {
    cancel: Option<CancelHandle>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill in-flight children when `handle` is cancelled.
    pub fn with_cancel(mut self, handle: CancelHandle) -> Self {
        self.cancel = Some(handle);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|c| c.is_cancelled())
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> ToolResult<ToolOutput> {
        let tool = command.tool;
        if self.is_cancelled() {
            return Err(ToolError::Cancelled { tool });
        }

        tracing::debug!("Running: {}", command.display());

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ToolError::Spawn { tool, source })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if self.is_cancelled() => {
                    kill(&mut child);
                    return Err(ToolError::Cancelled { tool });
                }
                Ok(None) => thread::sleep(WAIT_POLL),
                Err(source) => {
                    kill(&mut child);
                    return Err(ToolError::Spawn { tool, source });
                }
            }
        };

        // An interrupt reaches the child too, so it may exit on its own
        // before the next poll sees the request.
        if self.is_cancelled() {
            tracing::debug!("{} exited with {:?} after cancellation", tool, status.code());
            return Err(ToolError::Cancelled { tool });
        }

        let output = ToolOutput {
            exit_code: status.code(),
            stdout: collect(stdout),
            stderr: collect(stderr),
        };
        tracing::debug!("{} exited with {:?}", tool, output.exit_code);
        Ok(output)
    }
}

/// Read a pipe to the end on its own thread so the child never blocks on a
/// full pipe buffer.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

fn kill(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::warn!("Failed to kill child process: {}", e);
    }
    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tool;

    #[test]
    fn missing_executable_is_spawn_error() {
        let cmd = ToolCommand::new(Tool::Demucs, "definitely-not-a-real-tool-8c1f").arg("-h");
        let err = SystemRunner::new().run(&cmd).unwrap_err();
        assert!(matches!(err, ToolError::Spawn { tool: Tool::Demucs, .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn cancelled_runner_refuses_to_start() {
        let handle = CancelHandle::new();
        handle.cancel();

        let runner = SystemRunner::new().with_cancel(handle);
        let cmd = ToolCommand::new(Tool::Ffmpeg, "ffmpeg").arg("-version");
        assert!(matches!(
            runner.run(&cmd),
            Err(ToolError::Cancelled { tool: Tool::Ffmpeg })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn captures_exit_code_and_streams() {
        let cmd = ToolCommand::new(Tool::Ffmpeg, "sh")
            .arg("-c")
            .arg("printf out; printf err >&2; exit 3");
        let output = SystemRunner::new().run(&cmd).unwrap();

        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout, b"out");
        assert_eq!(output.stderr_lossy(), "err");

        let err = run_checked(&SystemRunner::new(), &cmd).unwrap_err();
        assert!(matches!(err, ToolError::Failed { exit_code: 3, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn cancel_kills_running_child() {
        use std::time::Instant;

        let handle = CancelHandle::new();
        let runner = SystemRunner::new().with_cancel(handle.clone());
        let cmd = ToolCommand::new(Tool::Demucs, "sh").arg("-c").arg("exec sleep 5");

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            handle.cancel();
        });
        let started = Instant::now();
        let result = runner.run(&cmd);
        canceller.join().unwrap();

        assert!(matches!(result, Err(ToolError::Cancelled { tool: Tool::Demucs })));
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
