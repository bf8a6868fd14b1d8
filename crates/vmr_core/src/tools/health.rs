//! Availability check for the external tools.

use crate::models::Tool;

use super::command::{ToolCommand, Toolchain};
use super::runner::ToolRunner;

/// Outcome of probing one tool.
#[derive(Debug, Clone)]
pub struct ToolCheck {
    pub tool: Tool,
    pub available: bool,
    /// First line of the tool's output, or the failure reason.
    pub detail: String,
}

/// Outcome of probing every tool.
#[derive(Debug, Clone, Default)]
pub struct HealthReport {
    pub checks: Vec<ToolCheck>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(|c| c.available)
    }

    /// Tools that could not be run.
    pub fn missing(&self) -> Vec<Tool> {
        self.checks
            .iter()
            .filter(|c| !c.available)
            .map(|c| c.tool)
            .collect()
    }
}

/// Command used to verify that `tool` is installed.
pub fn probe_command(tools: &Toolchain, tool: Tool) -> ToolCommand {
    match tool {
        Tool::Ffmpeg | Tool::Ffprobe => tools.command(tool).arg("-version"),
        Tool::Demucs => tools.command(tool).arg("-h"),
    }
}

/// Run every tool once and report which ones respond.
pub fn check_tools(runner: &dyn ToolRunner, tools: &Toolchain) -> HealthReport {
    let checks = Tool::ALL
        .iter()
        .map(|&tool| {
            let command = probe_command(tools, tool);
            match runner.run(&command) {
                Ok(output) if output.is_success() => ToolCheck {
                    tool,
                    available: true,
                    detail: String::from_utf8_lossy(&output.stdout)
                        .lines()
                        .next()
                        .unwrap_or_default()
                        .to_string(),
                },
                Ok(output) => ToolCheck {
                    tool,
                    available: false,
                    detail: format!(
                        "exited with code {}: {}",
                        output.exit_code.unwrap_or(-1),
                        output.stderr_lossy()
                    ),
                },
                Err(e) => ToolCheck {
                    tool,
                    available: false,
                    detail: e.to_string(),
                },
            }
        })
        .collect();

    HealthReport { checks }
}
