//! Audio stream probing and extraction.
//!
//! This module provides:
//! - ffprobe based listing of a video's audio streams
//! - Per-stream extraction into standalone files with ffmpeg

mod probe;
mod tracks;
mod types;

pub use probe::{parse_probe_json, probe_audio_streams, probe_command};
pub use tracks::{extract_audio_streams, extract_command, extracted_file_name};
pub use types::{ExtractionError, ExtractionResult};
