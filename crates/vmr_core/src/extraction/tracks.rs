//! Per-stream audio extraction using ffmpeg.

use std::path::{Path, PathBuf};

use crate::models::{AudioStream, Tool};
use crate::tools::{run_checked, ToolCommand, ToolRunner, Toolchain};

use super::types::ExtractionResult;

/// Scratch file name for the audio stream at `index` of `video`.
///
/// Keeps the video's container extension so the muxer accepts the codec.
pub fn extracted_file_name(video: &Path, index: usize) -> String {
    match video.extension() {
        Some(ext) => format!("input_{}.{}", index, ext.to_string_lossy()),
        None => format!("input_{}", index),
    }
}

/// Build the ffmpeg command copying audio stream `index` of `video` to `output`.
pub fn extract_command(
    tools: &Toolchain,
    video: &Path,
    index: usize,
    output: &Path,
) -> ToolCommand {
    tools
        .command(Tool::Ffmpeg)
        .arg("-i")
        .arg(video)
        .arg("-map")
        .arg(format!("0:a:{}", index))
        .args(["-c", "copy", "-y"])
        .arg(output)
}

/// Extract every audio stream of `video` into `dir`, one file per stream.
///
/// The returned paths are in the same order as `streams`. Existing files
/// with the same name are overwritten.
pub fn extract_audio_streams(
    runner: &dyn ToolRunner,
    tools: &Toolchain,
    video: &Path,
    streams: &[AudioStream],
    dir: &Path,
) -> ExtractionResult<Vec<PathBuf>> {
    let mut files = Vec::with_capacity(streams.len());

    for stream in streams {
        let output = dir.join(extracted_file_name(video, stream.index));
        tracing::debug!(
            "Extracting audio stream {} ({}) to {}",
            stream.index,
            stream.codec_name,
            output.display()
        );

        run_checked(runner, &extract_command(tools, video, stream.index, &output))?;
        files.push(output);
    }

    Ok(files)
}
