//! Fan-out of lifecycle events to registered observers.

use std::path::Path;

use super::types::RemoverEvent;

/// Receives lifecycle events.
pub trait MusicRemoverObserver: Send + Sync {
    fn on_event(&self, event: &RemoverEvent);
}

/// Ordered list of observers.
///
/// Each hook builds one [`RemoverEvent`] and hands it to every observer,
/// synchronously and in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    observers: Vec<Box<dyn MusicRemoverObserver>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn attach(&mut self, observer: Box<dyn MusicRemoverObserver>) {
        self.observers.push(observer);
    }

    /// Register an observer (builder pattern).
    pub fn with_observer<O: MusicRemoverObserver + 'static>(mut self, observer: O) -> Self {
        self.attach(Box::new(observer));
        self
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver an event to every observer.
    pub fn dispatch(&self, event: RemoverEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    pub fn mass_processing_started(&self, directory: &Path) {
        self.dispatch(RemoverEvent::MassProcessingStarted {
            directory: directory.to_path_buf(),
        });
    }

    pub fn scan_directory(&self, directory: &Path) {
        self.dispatch(RemoverEvent::ScanDirectory {
            directory: directory.to_path_buf(),
        });
    }

    pub fn scan_result(&self, candidate: Option<&Path>) {
        self.dispatch(RemoverEvent::ScanResult {
            candidate: candidate.map(Path::to_path_buf),
        });
    }

    pub fn video_processing_started(&self, original_video: &Path) {
        self.dispatch(RemoverEvent::VideoProcessingStarted {
            original_video: original_video.to_path_buf(),
        });
    }

    pub fn audio_processing_started(&self, original_video: &Path, counter: usize, total: usize) {
        self.dispatch(RemoverEvent::AudioProcessingStarted {
            original_video: original_video.to_path_buf(),
            counter,
            total,
        });
    }

    pub fn audio_processing_finished(&self, original_video: &Path, counter: usize, total: usize) {
        self.dispatch(RemoverEvent::AudioProcessingFinished {
            original_video: original_video.to_path_buf(),
            counter,
            total,
        });
    }

    pub fn creating_new_video_started(&self, original_video: &Path, new_video: &Path) {
        self.dispatch(RemoverEvent::CreatingNewVideoStarted {
            original_video: original_video.to_path_buf(),
            new_video: new_video.to_path_buf(),
        });
    }

    pub fn creating_new_video_finished(&self, original_video: &Path, new_video: &Path) {
        self.dispatch(RemoverEvent::CreatingNewVideoFinished {
            original_video: original_video.to_path_buf(),
            new_video: new_video.to_path_buf(),
        });
    }

    pub fn skipping_failed_file(&self, original_video: &Path, error: &dyn std::error::Error) {
        self.dispatch(RemoverEvent::SkippingFailedFile {
            original_video: original_video.to_path_buf(),
            error: error.to_string(),
        });
    }

    pub fn video_processing_finished(&self, original_video: &Path, new_video: &Path) {
        self.dispatch(RemoverEvent::VideoProcessingFinished {
            original_video: original_video.to_path_buf(),
            new_video: new_video.to_path_buf(),
        });
    }

    pub fn delete_original_video_started(&self, original_video: &Path) {
        self.dispatch(RemoverEvent::DeleteOriginalVideoStarted {
            original_video: original_video.to_path_buf(),
        });
    }

    pub fn delete_original_video_finished(&self, original_video: &Path) {
        self.dispatch(RemoverEvent::DeleteOriginalVideoFinished {
            original_video: original_video.to_path_buf(),
        });
    }

    pub fn mass_processing_finished(&self, directory: &Path) {
        self.dispatch(RemoverEvent::MassProcessingFinished {
            directory: directory.to_path_buf(),
        });
    }
}
