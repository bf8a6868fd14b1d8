//! Data models for Video Music Remover.
//!
//! - Enums for separation models, stem formats and external tools
//! - Audio stream descriptors produced by the probe
//! - Video jobs pairing a source with its output path

mod enums;
mod jobs;
mod media;

pub use enums::{SeparationModel, StemFormat, Tool};
pub use jobs::VideoJob;
pub use media::{AudioStream, StreamTags};
