//! ffmpeg remux options builder.
//!
//! Builds the command that swaps every audio stream of a video for new
//! audio files while copying all other streams untouched.
//!
//! # Stream layout
//!
//! - Input 0 is the original video; inputs 1..=N are the replacement audios.
//! - `-map 0 -map -0:a` keeps every non-audio stream of input 0 in order.
//! - `-map <i+1>:a:0` appends replacement `i` as output audio stream `i`.
//! - Language/title tags of original stream `i` are written to output
//!   audio stream `i`.

use std::path::{Path, PathBuf};

use crate::models::{AudioStream, Tool};
use crate::tools::{ToolCommand, Toolchain};

/// Builder for the audio replacement ffmpeg command.
pub struct RemuxOptionsBuilder<'a> {
    video: &'a Path,
    streams: &'a [AudioStream],
    audios: &'a [PathBuf],
    output_path: &'a Path,
}

impl<'a> RemuxOptionsBuilder<'a> {
    pub fn new(
        video: &'a Path,
        streams: &'a [AudioStream],
        audios: &'a [PathBuf],
        output_path: &'a Path,
    ) -> Self {
        Self {
            video,
            streams,
            audios,
            output_path,
        }
    }

    /// Build the complete ffmpeg command.
    pub fn build(&self, tools: &Toolchain) -> ToolCommand {
        let mut cmd = tools.command(Tool::Ffmpeg);

        cmd = self.add_inputs(cmd);
        cmd = cmd.arg("-y");
        cmd = self.add_codec_options(cmd);
        cmd = self.add_mappings(cmd);
        cmd = self.add_metadata(cmd);

        cmd.arg(self.output_path)
    }

    fn add_inputs(&self, mut cmd: ToolCommand) -> ToolCommand {
        cmd = cmd.arg("-i").arg(self.video);
        for audio in self.audios {
            cmd = cmd.arg("-i").arg(audio);
        }
        cmd
    }

    /// Matroska holds any of the separated stem codecs, so everything can be
    /// copied. Other containers copy only the non-audio stream types and let
    /// ffmpeg pick an audio encoder the container supports.
    fn add_codec_options(&self, cmd: ToolCommand) -> ToolCommand {
        if is_matroska(self.video) {
            cmd.args(["-c", "copy"])
        } else {
            cmd.args(["-c:v", "copy", "-c:s", "copy", "-c:d", "copy", "-c:t", "copy"])
        }
    }

    fn add_mappings(&self, mut cmd: ToolCommand) -> ToolCommand {
        cmd = cmd.args(["-map", "0", "-map", "-0:a"]);
        for input in 1..=self.audios.len() {
            cmd = cmd.arg("-map").arg(format!("{}:a:0", input));
        }
        cmd
    }

    fn add_metadata(&self, mut cmd: ToolCommand) -> ToolCommand {
        // Only streams that receive a replacement exist in the output.
        for (index, stream) in self.streams.iter().take(self.audios.len()).enumerate() {
            let specifier = format!("-metadata:s:a:{}", index);
            if let Some(language) = stream.language() {
                cmd = cmd.arg(&specifier).arg(format!("language={}", language));
            }
            if let Some(title) = stream.title() {
                cmd = cmd.arg(&specifier).arg(format!("title={}", title));
            }
        }
        cmd
    }
}

fn is_matroska(video: &Path) -> bool {
    video
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("mkv"))
}
