//! Types shared by the external tool layer.

use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

use crate::models::Tool;

/// Error type for external tool invocations.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The executable could not be started (usually not installed).
    #[error("Failed to start {tool}: {source}")]
    Spawn {
        tool: Tool,
        #[source]
        source: io::Error,
    },

    /// The tool ran and exited with a non-zero status.
    #[error("{tool} failed with exit code {exit_code}: {stderr}")]
    Failed {
        tool: Tool,
        exit_code: i32,
        stderr: String,
    },

    /// The tool reported success but its expected output is absent.
    #[error("{tool} exited successfully but did not create {}", .path.display())]
    MissingOutput { tool: Tool, path: PathBuf },

    /// The run was cancelled and the child process was killed.
    #[error("{tool} was cancelled")]
    Cancelled { tool: Tool },
}

impl ToolError {
    /// Create a failed error from a captured exit code and stderr.
    pub fn failed(tool: Tool, exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::Failed {
            tool,
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Create a missing output error.
    pub fn missing_output(tool: Tool, path: impl Into<PathBuf>) -> Self {
        Self::MissingOutput {
            tool,
            path: path.into(),
        }
    }

    /// Tool that produced the error.
    pub fn tool(&self) -> Tool {
        match self {
            ToolError::Spawn { tool, .. }
            | ToolError::Failed { tool, .. }
            | ToolError::MissingOutput { tool, .. }
            | ToolError::Cancelled { tool } => *tool,
        }
    }

    /// Whether a batch may skip the current video and carry on.
    ///
    /// A tool that ran and failed is a per-file problem. A tool that could
    /// not be started, or a cancelled run, stops the batch.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ToolError::Failed { .. } | ToolError::MissingOutput { .. })
    }
}

/// Result type for tool invocations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Captured result of one finished tool process.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code, `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Output of a process that exited with status 0.
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Output of a process that exited with a non-zero status.
    pub fn failure(exit_code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout decoded as UTF-8.
    pub fn stdout_utf8(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.stdout)
    }

    /// Stderr decoded lossily, trimmed.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_error_displays_context() {
        let err = ToolError::failed(Tool::Ffmpeg, 1, "Invalid data found");
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Invalid data found"));
    }

    #[test]
    fn recoverability_follows_failure_kind() {
        assert!(ToolError::failed(Tool::Ffprobe, 1, "").is_recoverable());
        assert!(ToolError::missing_output(Tool::Demucs, "/x/vocals.mp3").is_recoverable());
        assert!(!ToolError::Cancelled { tool: Tool::Demucs }.is_recoverable());

        let spawn = ToolError::Spawn {
            tool: Tool::Demucs,
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(!spawn.is_recoverable());
        assert_eq!(spawn.tool(), Tool::Demucs);
    }

    #[test]
    fn output_helpers() {
        let ok = ToolOutput::success("{}");
        assert!(ok.is_success());
        assert_eq!(ok.stdout_utf8().unwrap(), "{}");

        let bad = ToolOutput::failure(2, " boom \n");
        assert!(!bad.is_success());
        assert_eq!(bad.stderr_lossy(), "boom");

        let invalid = ToolOutput::success(vec![0xff, 0xfe]);
        assert!(invalid.stdout_utf8().is_err());
    }
}
