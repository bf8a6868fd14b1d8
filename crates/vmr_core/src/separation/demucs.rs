//! demucs backend.

use std::path::{Path, PathBuf};

use crate::models::{SeparationModel, StemFormat, Tool};
use crate::tools::{run_checked, ToolCommand, ToolError, ToolResult, ToolRunner, Toolchain};

use super::{no_music_sound_path, MusicRemover};

/// Build the demucs command separating `audio` into vocals and the rest.
pub fn separate_command(
    tools: &Toolchain,
    model: SeparationModel,
    format: StemFormat,
    audio: &Path,
    output_dir: &Path,
) -> ToolCommand {
    tools
        .command(Tool::Demucs)
        .args(["--two-stems=vocals", "-n", model.model_id(), "-o"])
        .arg(output_dir)
        .arg(format.flag())
        .arg(audio)
}

/// Runs demucs with one pretrained model in two-stem mode and keeps the
/// vocals stem.
#[derive(Debug, Clone)]
pub struct DemucsMusicRemover {
    model: SeparationModel,
    format: StemFormat,
    tools: Toolchain,
}

impl DemucsMusicRemover {
    pub fn new(model: SeparationModel, format: StemFormat, tools: Toolchain) -> Self {
        Self {
            model,
            format,
            tools,
        }
    }
}

impl MusicRemover for DemucsMusicRemover {
    fn model(&self) -> SeparationModel {
        self.model
    }

    fn no_music_sound_path(&self, audio: &Path, output_dir: &Path) -> PathBuf {
        no_music_sound_path(output_dir, self.model, audio, self.format)
    }

    fn remove_music(
        &self,
        runner: &dyn ToolRunner,
        audio: &Path,
        output_dir: &Path,
    ) -> ToolResult<PathBuf> {
        let expected = self.no_music_sound_path(audio, output_dir);
        let command = separate_command(&self.tools, self.model, self.format, audio, output_dir);

        run_checked(runner, &command)?;

        if !expected.is_file() {
            return Err(ToolError::missing_output(Tool::Demucs, expected));
        }
        Ok(expected)
    }
}
