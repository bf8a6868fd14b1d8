//! Discovery of videos still waiting to be processed.
//!
//! Nothing is persisted between runs. A video counts as done when its
//! output file exists, so an interrupted batch resumes where it stopped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::models::VideoJob;
use crate::validation::has_supported_extension;

/// Scans an input tree for videos whose output is missing.
#[derive(Debug, Clone)]
pub struct VideoDiscovery {
    input_root: PathBuf,
    output_root: PathBuf,
}

impl VideoDiscovery {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Job for `video`, with its output mirrored under the output root.
    pub fn job_for(&self, video: &Path) -> VideoJob {
        VideoJob::in_directory(video, &self.input_root, &self.output_root)
    }

    /// Every supported video below the input root, in traversal order.
    ///
    /// Unreadable entries are logged and skipped.
    pub fn videos(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.input_root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry during scan: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| has_supported_extension(path))
    }

    /// First video that is not excluded and has no output yet.
    pub fn next_job(&self, excluded: &HashSet<PathBuf>) -> Option<VideoJob> {
        self.videos()
            .filter(|video| !excluded.contains(video))
            .map(|video| self.job_for(&video))
            .find(|job| !job.no_music_video.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn finds_supported_videos_recursively() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        touch(&input.path().join("a.mp4"));
        touch(&input.path().join("notes.txt"));
        touch(&input.path().join("season1/b.mkv"));
        touch(&input.path().join("season1/extras/c.webm"));

        let discovery = VideoDiscovery::new(input.path(), output.path());
        let mut found: Vec<PathBuf> = discovery
            .videos()
            .map(|p| p.strip_prefix(input.path()).unwrap().to_path_buf())
            .collect();
        found.sort();

        assert_eq!(
            found,
            vec![
                PathBuf::from("a.mp4"),
                PathBuf::from("season1/b.mkv"),
                PathBuf::from("season1/extras/c.webm"),
            ]
        );
    }

    #[test]
    fn mirrors_directory_structure_in_output() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        touch(&input.path().join("season1/b.mkv"));

        let discovery = VideoDiscovery::new(input.path(), output.path());
        let job = discovery.next_job(&HashSet::new()).unwrap();

        assert_eq!(job.original_video, input.path().join("season1/b.mkv"));
        assert_eq!(job.no_music_video, output.path().join("season1/b.mkv"));
    }

    #[test]
    fn never_reselects_video_with_existing_output() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        touch(&input.path().join("a.mp4"));
        touch(&output.path().join("a.mp4"));

        let discovery = VideoDiscovery::new(input.path(), output.path());
        assert!(discovery.next_job(&HashSet::new()).is_none());
    }

    #[test]
    fn skips_excluded_videos() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let a = input.path().join("a.mp4");
        let b = input.path().join("b.mkv");
        touch(&a);
        touch(&b);

        let discovery = VideoDiscovery::new(input.path(), output.path());
        let excluded: HashSet<PathBuf> = [a.clone()].into_iter().collect();
        assert_eq!(discovery.next_job(&excluded).unwrap().original_video, b);

        let excluded: HashSet<PathBuf> = [a, b].into_iter().collect();
        assert!(discovery.next_job(&excluded).is_none());
    }

    #[test]
    fn empty_directory_has_no_work() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let discovery = VideoDiscovery::new(input.path(), output.path());
        assert!(discovery.next_job(&HashSet::new()).is_none());
    }
}
