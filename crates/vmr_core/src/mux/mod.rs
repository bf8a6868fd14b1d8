//! Remuxing a video with replacement audio streams.
//!
//! - **options_builder**: ffmpeg command tokens for the stream swap
//! - **remux**: runs the command and moves the result into place atomically

mod options_builder;
mod remux;

pub use options_builder::RemuxOptionsBuilder;
pub use remux::{replace_audio_streams, MuxError, MuxResult};
