//! External tool layer (ffmpeg, ffprobe, demucs).
//!
//! Command lines are built as [`ToolCommand`] values and executed through a
//! [`ToolRunner`]. [`SystemRunner`] spawns real processes.

mod command;
mod health;
mod runner;
mod types;

pub use command::{ToolCommand, Toolchain};
pub use health::{check_tools, probe_command, HealthReport, ToolCheck};
pub use runner::{run_checked, SystemRunner, ToolRunner};
pub use types::{ToolError, ToolOutput, ToolResult};
