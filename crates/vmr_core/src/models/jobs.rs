//! Job structures describing one unit of work.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A source video paired with the path its music-free copy is written to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoJob {
    /// Source video.
    pub original_video: PathBuf,
    /// Destination of the recombined video.
    pub no_music_video: PathBuf,
}

impl VideoJob {
    /// Job for a video found while scanning `base_dir`.
    ///
    /// The output mirrors the video's location relative to `base_dir`.
    /// A video outside `base_dir` falls back to its file name.
    pub fn in_directory(video: impl Into<PathBuf>, base_dir: &Path, output_dir: &Path) -> Self {
        let original_video = video.into();
        let relative = original_video
            .strip_prefix(base_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| file_name_of(&original_video));
        Self {
            no_music_video: output_dir.join(relative),
            original_video,
        }
    }

    /// Job for a single video given directly. Output is `output_dir/<file name>`.
    pub fn single(video: impl Into<PathBuf>, output_dir: &Path) -> Self {
        let original_video = video.into();
        Self {
            no_music_video: output_dir.join(file_name_of(&original_video)),
            original_video,
        }
    }

    /// Display name used in progress messages.
    pub fn name(&self) -> String {
        self.original_video
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.original_video.display().to_string())
    }

    /// Directory the recombined video is written into.
    pub fn output_dir(&self) -> &Path {
        self.no_music_video.parent().unwrap_or_else(|| Path::new("."))
    }
}

fn file_name_of(path: &Path) -> PathBuf {
    path.file_name().map(PathBuf::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_job_mirrors_relative_path() {
        let job = VideoJob::in_directory(
            "/in/season1/ep1.mkv",
            Path::new("/in"),
            Path::new("/out"),
        );
        assert_eq!(job.no_music_video, PathBuf::from("/out/season1/ep1.mkv"));
        assert_eq!(job.output_dir(), Path::new("/out/season1"));
        assert_eq!(job.name(), "ep1.mkv");
    }

    #[test]
    fn single_job_uses_file_name_only() {
        let job = VideoJob::single("/somewhere/deep/a.mp4", Path::new("/out"));
        assert_eq!(job.no_music_video, PathBuf::from("/out/a.mp4"));
    }

    #[test]
    fn video_outside_base_falls_back_to_name() {
        let job = VideoJob::in_directory("/other/a.webm", Path::new("/in"), Path::new("/out"));
        assert_eq!(job.no_music_video, PathBuf::from("/out/a.webm"));
    }
}
