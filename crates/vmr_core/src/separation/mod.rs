//! Vocal separation backends.
//!
//! A [`MusicRemover`] takes one audio file and produces a copy with the
//! music removed. Where that copy lands is a pure function of the output
//! root, the model and the input's file stem, so callers know the path
//! before the tool runs.
//!
//! The separation tool does not reliably signal failure through its exit
//! code. After every run the expected output is checked and its absence is
//! reported as
//! [`ToolError::MissingOutput`](crate::tools::ToolError::MissingOutput).

mod demucs;

use std::path::{Path, PathBuf};

use crate::config::SeparationSettings;
use crate::models::{SeparationModel, StemFormat};
use crate::tools::{ToolResult, ToolRunner, Toolchain};

pub use demucs::{separate_command, DemucsMusicRemover};

/// Capability of removing music from a single audio file.
pub trait MusicRemover: Send + Sync {
    /// Model this backend runs.
    fn model(&self) -> SeparationModel;

    /// Path the separated audio for `audio` will be written to.
    fn no_music_sound_path(&self, audio: &Path, output_dir: &Path) -> PathBuf;

    /// Separate `audio` into `output_dir` and return the music-free file.
    fn remove_music(
        &self,
        runner: &dyn ToolRunner,
        audio: &Path,
        output_dir: &Path,
    ) -> ToolResult<PathBuf>;
}

/// `{output_root}/{model_id}/{stem}/vocals.{ext}`
pub fn no_music_sound_path(
    output_root: &Path,
    model: SeparationModel,
    audio: &Path,
    format: StemFormat,
) -> PathBuf {
    let stem = audio.file_stem().unwrap_or(audio.as_os_str());
    output_root
        .join(model.model_id())
        .join(stem)
        .join(format!("vocals.{}", format.extension()))
}

/// Create the backend for the configured model.
pub fn create_music_remover(
    settings: &SeparationSettings,
    tools: &Toolchain,
) -> Box<dyn MusicRemover> {
    Box::new(DemucsMusicRemover::new(
        settings.model,
        settings.stem_format,
        tools.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_is_pure_function_of_inputs() {
        let path = no_music_sound_path(
            Path::new("/scratch/intermediate"),
            SeparationModel::HtDemucsFt,
            Path::new("/scratch/input/input_1.mkv"),
            StemFormat::Mp3,
        );
        assert_eq!(
            path,
            PathBuf::from("/scratch/intermediate/htdemucs_ft/input_1/vocals.mp3")
        );

        let flac = no_music_sound_path(
            Path::new("/r"),
            SeparationModel::MdxExtraQ,
            Path::new("input_0.mp4"),
            StemFormat::Flac,
        );
        assert_eq!(flac, PathBuf::from("/r/mdx_extra_q/input_0/vocals.flac"));
    }

    #[test]
    fn factory_honours_configured_model() {
        let settings = SeparationSettings {
            model: SeparationModel::Mdx,
            ..SeparationSettings::default()
        };
        let remover = create_music_remover(&settings, &Toolchain::default());
        assert_eq!(remover.model(), SeparationModel::Mdx);
    }
}
