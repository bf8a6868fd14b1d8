//! Core types for the orchestrator pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::events::EventDispatcher;
use crate::models::{AudioStream, VideoJob};
use crate::separation::MusicRemover;
use crate::tools::{ToolRunner, Toolchain};

use super::pipeline::CancelHandle;

/// Read-only context passed to pipeline steps.
///
/// Holds the video being processed and the shared collaborators. Mutable
/// results go in `JobState`.
pub struct Context {
    /// Source video and its destination.
    pub job: VideoJob,
    /// Scratch directory owned by this video's run.
    pub work_dir: PathBuf,
    /// Tool executables.
    pub tools: Toolchain,
    /// Runs external tools.
    pub runner: Arc<dyn ToolRunner>,
    /// Separation backend.
    pub remover: Arc<dyn MusicRemover>,
    /// Progress observers.
    pub events: Arc<EventDispatcher>,
    /// Cancellation flag shared with the pipeline.
    pub cancel: CancelHandle,
}

impl Context {
    /// Directory receiving the extracted audio streams.
    pub fn input_dir(&self) -> PathBuf {
        self.work_dir.join("input")
    }

    /// Directory the separation backend writes into.
    pub fn intermediate_dir(&self) -> PathBuf {
        self.work_dir.join("intermediate")
    }

    /// Source video path.
    pub fn video(&self) -> &Path {
        &self.job.original_video
    }

    /// Name used in errors and logs.
    pub fn job_name(&self) -> String {
        self.job.name()
    }
}

/// Results accumulated by the steps of one video.
///
/// Each step writes its own section. Later steps read earlier sections but
/// never overwrite them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobState {
    /// When processing of the video started.
    pub started_at: Option<String>,
    /// Extraction results (from Extract step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract: Option<ExtractOutput>,
    /// Separation results (from Separate step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separate: Option<SeparateOutput>,
    /// Recombination results (from Recombine step).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recombine: Option<RecombineOutput>,
}

impl JobState {
    pub fn new() -> Self {
        Self {
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Check if extraction has been completed.
    pub fn has_extraction(&self) -> bool {
        self.extract.is_some()
    }

    /// Check if separation has been completed.
    pub fn has_separation(&self) -> bool {
        self.separate.is_some()
    }

    /// Path of the recombined video, once written.
    pub fn output_path(&self) -> Option<&Path> {
        self.recombine.as_ref().map(|r| r.output_path.as_path())
    }
}

/// Output from the Extract step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractOutput {
    /// Audio streams of the source, in container order.
    pub streams: Vec<AudioStream>,
    /// One extracted file per stream, same order.
    pub files: Vec<PathBuf>,
}

/// Output from the Separate step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeparateOutput {
    /// Music-free audio, one per extracted file, same order.
    pub files: Vec<PathBuf>,
}

/// Output from the Recombine step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecombineOutput {
    /// Final video path.
    pub output_path: PathBuf,
    /// Number of audio streams written.
    pub audio_streams: usize,
}

/// Result of executing a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed successfully.
    Success,
    /// Step was skipped (not an error).
    Skipped(String),
}
