//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::{SeparationModel, StemFormat, Tool};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Separation model settings.
    #[serde(default)]
    pub separation: SeparationSettings,

    /// Batch processing policy.
    #[serde(default)]
    pub processing: ProcessingSettings,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Which model separates the audio and how its output is encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparationSettings {
    #[serde(default)]
    pub model: SeparationModel,

    #[serde(default)]
    pub stem_format: StemFormat,
}

/// What happens around each processed video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// Delete the source video after its output was written.
    #[serde(default)]
    pub delete_original: bool,
}

/// Executables for the external tools. Bare names are looked up on PATH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,

    #[serde(default = "default_demucs")]
    pub demucs: String,
}

fn default_ffmpeg() -> String {
    Tool::Ffmpeg.default_program().to_string()
}

fn default_ffprobe() -> String {
    Tool::Ffprobe.default_program().to_string()
}

fn default_demucs() -> String {
    Tool::Demucs.default_program().to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            ffprobe: default_ffprobe(),
            demucs: default_demucs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for the run log and console diagnostics.
    #[serde(default)]
    pub level: LogLevel,
}

/// Configuration sections for atomic updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Separation,
    Processing,
    Tools,
    Logging,
}

impl ConfigSection {
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Separation,
        ConfigSection::Processing,
        ConfigSection::Tools,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Separation => "separation",
            ConfigSection::Processing => "processing",
            ConfigSection::Tools => "tools",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Separation => "Vocal separation model",
            ConfigSection::Processing => "Batch processing policy",
            ConfigSection::Tools => "External tool executables",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}
