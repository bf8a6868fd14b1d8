//! Lifecycle events emitted while removing music.

use std::path::{Path, PathBuf};

use crate::logging::LogLevel;

/// One milestone of a processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoverEvent {
    MassProcessingStarted { directory: PathBuf },
    ScanDirectory { directory: PathBuf },
    /// `None` when nothing is left to process.
    ScanResult { candidate: Option<PathBuf> },
    VideoProcessingStarted { original_video: PathBuf },
    /// `counter` is 1-based.
    AudioProcessingStarted {
        original_video: PathBuf,
        counter: usize,
        total: usize,
    },
    AudioProcessingFinished {
        original_video: PathBuf,
        counter: usize,
        total: usize,
    },
    CreatingNewVideoStarted {
        original_video: PathBuf,
        new_video: PathBuf,
    },
    CreatingNewVideoFinished {
        original_video: PathBuf,
        new_video: PathBuf,
    },
    SkippingFailedFile { original_video: PathBuf, error: String },
    VideoProcessingFinished {
        original_video: PathBuf,
        new_video: PathBuf,
    },
    DeleteOriginalVideoStarted { original_video: PathBuf },
    DeleteOriginalVideoFinished { original_video: PathBuf },
    MassProcessingFinished { directory: PathBuf },
}

impl RemoverEvent {
    /// Human readable progress line.
    pub fn message(&self) -> String {
        match self {
            RemoverEvent::MassProcessingStarted { .. } => "Mass processing started".to_string(),
            RemoverEvent::ScanDirectory { directory } => {
                format!("Scanning \"{}\" for videos to process", directory.display())
            }
            RemoverEvent::ScanResult { candidate: Some(video) } => {
                format!("Next video to process: \"{}\"", video.display())
            }
            RemoverEvent::ScanResult { candidate: None } => {
                "No more videos left to process".to_string()
            }
            RemoverEvent::VideoProcessingStarted { original_video } => {
                format!("Processing file \"{}\"", name(original_video))
            }
            RemoverEvent::AudioProcessingStarted {
                original_video,
                counter,
                total,
            } => format!(
                "\"{}\": start separating vocal... {}/{}",
                name(original_video),
                counter,
                total
            ),
            RemoverEvent::AudioProcessingFinished {
                original_video,
                counter,
                total,
            } => format!(
                "\"{}\": vocal separated successfully {}/{}",
                name(original_video),
                counter,
                total
            ),
            RemoverEvent::CreatingNewVideoStarted { original_video, .. } => {
                format!("\"{}\": creating a new video with no music...", name(original_video))
            }
            RemoverEvent::CreatingNewVideoFinished { original_video, .. } => format!(
                "\"{}\": a new video with no music has been created",
                name(original_video)
            ),
            RemoverEvent::SkippingFailedFile {
                original_video,
                error,
            } => format!(
                "an error occurred while processing file {}, skipping the file. error: {}",
                original_video.display(),
                error
            ),
            RemoverEvent::VideoProcessingFinished { original_video, .. } => {
                format!("\"{}\": Processing finished", name(original_video))
            }
            RemoverEvent::DeleteOriginalVideoStarted { original_video } => format!(
                "\"{}\": Post-Processing(optional): deleting original video...",
                name(original_video)
            ),
            RemoverEvent::DeleteOriginalVideoFinished { original_video } => format!(
                "\"{}\": Post-Processing(optional): original video deleted successfully",
                name(original_video)
            ),
            RemoverEvent::MassProcessingFinished { .. } => "Mass processing finished".to_string(),
        }
    }

    /// Severity used by log sinks.
    pub fn level(&self) -> LogLevel {
        match self {
            RemoverEvent::SkippingFailedFile { .. } => LogLevel::Error,
            RemoverEvent::ScanDirectory { .. } | RemoverEvent::ScanResult { .. } => {
                LogLevel::Debug
            }
            _ => LogLevel::Info,
        }
    }
}

fn name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_use_file_name() {
        let event = RemoverEvent::AudioProcessingStarted {
            original_video: PathBuf::from("/in/show/a.mp4"),
            counter: 1,
            total: 2,
        };
        assert_eq!(event.message(), "\"a.mp4\": start separating vocal... 1/2");
        assert_eq!(event.level(), LogLevel::Info);
    }

    #[test]
    fn skip_message_carries_full_path_and_error() {
        let event = RemoverEvent::SkippingFailedFile {
            original_video: PathBuf::from("/in/b.mkv"),
            error: "demucs exited successfully but did not create x".to_string(),
        };
        let msg = event.message();
        assert!(msg.contains("/in/b.mkv"));
        assert!(msg.contains("did not create x"));
        assert_eq!(event.level(), LogLevel::Error);
    }
}
