//! Audio stream probing using ffprobe.

use std::path::Path;

use serde::Deserialize;

use crate::models::{AudioStream, StreamTags, Tool};
use crate::tools::{run_checked, ToolCommand, ToolRunner, Toolchain};

use super::types::{ExtractionError, ExtractionResult};

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    index: usize,
    codec_name: String,
    codec_type: String,
    #[serde(default)]
    start_pts: Option<i64>,
    #[serde(default)]
    start_time: Option<NumberOrText>,
    #[serde(default)]
    tags: StreamTags,
}

/// ffprobe prints `start_time` as a string; accept either form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Build the ffprobe command listing the audio streams of `video`.
pub fn probe_command(tools: &Toolchain, video: &Path) -> ToolCommand {
    tools
        .command(Tool::Ffprobe)
        .args(["-v", "quiet", "-select_streams", "a", "-show_streams"])
        .args(["-print_format", "json", "-i"])
        .arg(video)
}

/// Probe `video` and return its audio streams in container order.
pub fn probe_audio_streams(
    runner: &dyn ToolRunner,
    tools: &Toolchain,
    video: &Path,
) -> ExtractionResult<Vec<AudioStream>> {
    tracing::debug!("Probing audio streams: {}", video.display());

    let output = run_checked(runner, &probe_command(tools, video))?;
    let text = output
        .stdout_utf8()
        .map_err(|source| ExtractionError::Encoding {
            tool: Tool::Ffprobe,
            source,
        })?;

    parse_probe_json(text, video)
}

/// Parse ffprobe JSON into audio streams.
///
/// Streams keep the order ffprobe reports them in and are given contiguous
/// audio-relative indices, matching `0:a:<n>` stream specifiers.
pub fn parse_probe_json(text: &str, video: &Path) -> ExtractionResult<Vec<AudioStream>> {
    let parsed: ProbeOutput = serde_json::from_str(text)
        .map_err(|e| ExtractionError::parse(Tool::Ffprobe, video, e.to_string()))?;

    parsed
        .streams
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            if raw.codec_type != "audio" {
                return Err(ExtractionError::parse(
                    Tool::Ffprobe,
                    video,
                    format!(
                        "stream {} has codec_type '{}', expected 'audio'",
                        raw.index, raw.codec_type
                    ),
                ));
            }
            Ok(AudioStream {
                index,
                stream_index: raw.index,
                codec_name: raw.codec_name,
                codec_type: raw.codec_type,
                start_pts: raw.start_pts,
                start_time: raw.start_time.as_ref().and_then(NumberOrText::as_f64),
                tags: raw.tags,
            })
        })
        .collect()
}
