//! Audio replacement with an atomic output write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::AudioStream;
use crate::tools::{run_checked, ToolError, ToolRunner, Toolchain};

use super::options_builder::RemuxOptionsBuilder;

/// Errors from remuxing.
#[derive(Error, Debug)]
pub enum MuxError {
    #[error("Got {audios} replacement audio files but the video has only {streams} audio streams")]
    TooManyAudioFiles { audios: usize, streams: usize },

    #[error("Video path has no file name: {}", .0.display())]
    InvalidVideoPath(PathBuf),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("I/O error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl MuxError {
    fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Whether a batch may skip the video and continue.
    pub fn is_recoverable(&self) -> bool {
        match self {
            MuxError::Tool(e) => e.is_recoverable(),
            _ => false,
        }
    }
}

/// Result type for mux operations.
pub type MuxResult<T> = Result<T, MuxError>;

/// Replace the audio streams of `video` with `audios` and write the result
/// to `output_dir/<video file name>`.
///
/// `audios[i]` replaces `streams[i]` and inherits its language/title tags.
/// The new file is written next to the destination under a temporary name
/// and renamed into place only after ffmpeg succeeds, so the destination
/// holds either the previous file or the complete new one. An existing
/// output is replaced.
pub fn replace_audio_streams(
    runner: &dyn ToolRunner,
    tools: &Toolchain,
    video: &Path,
    streams: &[AudioStream],
    audios: &[PathBuf],
    output_dir: &Path,
) -> MuxResult<PathBuf> {
    if audios.len() > streams.len() {
        return Err(MuxError::TooManyAudioFiles {
            audios: audios.len(),
            streams: streams.len(),
        });
    }

    let file_name = video
        .file_name()
        .ok_or_else(|| MuxError::InvalidVideoPath(video.to_path_buf()))?;
    let output_path = output_dir.join(file_name);

    let suffix = video
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let prefix = format!(".{}.", video.file_stem().unwrap_or(file_name).to_string_lossy());

    // Dropped without persisting on failure, which removes the partial file.
    let temp_path = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(&suffix)
        .tempfile_in(output_dir)
        .map_err(|e| {
            MuxError::io(format!("creating temporary file in {}", output_dir.display()), e)
        })?
        .into_temp_path();
    // Only the name is reserved. ffmpeg creates the file itself so the output
    // gets the usual umask-derived mode instead of the 0600 of a temp file.
    fs::remove_file(&temp_path).map_err(|e| {
        MuxError::io(format!("releasing temporary name {}", temp_path.display()), e)
    })?;

    let command = RemuxOptionsBuilder::new(video, streams, audios, &temp_path).build(tools);
    tracing::debug!("Remuxing {} with {} new audio streams", video.display(), audios.len());
    run_checked(runner, &command)?;

    temp_path.persist(&output_path).map_err(|e| {
        MuxError::io(format!("moving output into place at {}", output_path.display()), e.error)
    })?;

    Ok(output_path)
}
