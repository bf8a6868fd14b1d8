//! Configuration management for Video Music Remover.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use vmr_core::config::{ConfigManager, ConfigSection};
//! use vmr_core::models::SeparationModel;
//!
//! let mut config = ConfigManager::new("video-music-remover.toml");
//! config.load_or_create().unwrap();
//!
//! config.settings_mut().separation.model = SeparationModel::HtDemucsFt;
//! config.update_section(ConfigSection::Separation).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, LoggingSettings, ProcessingSettings, SeparationSettings, Settings,
    ToolSettings,
};
