//! Tool command lines and the configured tool locations.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::config::ToolSettings;
use crate::models::Tool;

/// A fully built command line for one external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Which tool this invokes.
    pub tool: Tool,
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments, in order.
    pub args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(tool: Tool, program: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Arguments as strings (lossy), for logging and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Index of the first argument equal to `value`.
    pub fn position_of(&self, value: &str) -> Option<usize> {
        self.args.iter().position(|a| a == value)
    }

    /// Shell-like rendering of the command line.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args_lossy().into_iter().map(|a| {
            if a.contains(' ') {
                format!("\"{}\"", a)
            } else {
                a
            }
        }));
        parts.join(" ")
    }
}

/// Executables used for each external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    pub demucs: PathBuf,
}

impl Toolchain {
    /// Build from configured tool paths.
    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            ffmpeg: PathBuf::from(&settings.ffmpeg),
            ffprobe: PathBuf::from(&settings.ffprobe),
            demucs: PathBuf::from(&settings.demucs),
        }
    }

    /// Executable configured for `tool`.
    pub fn program(&self, tool: Tool) -> &PathBuf {
        match tool {
            Tool::Ffmpeg => &self.ffmpeg,
            Tool::Ffprobe => &self.ffprobe,
            Tool::Demucs => &self.demucs,
        }
    }

    /// Start a command line for `tool`.
    pub fn command(&self, tool: Tool) -> ToolCommand {
        ToolCommand::new(tool, self.program(tool))
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from(Tool::Ffmpeg.default_program()),
            ffprobe: PathBuf::from(Tool::Ffprobe.default_program()),
            demucs: PathBuf::from(Tool::Demucs.default_program()),
        }
    }
}
