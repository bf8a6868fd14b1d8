//! Processor that runs videos through the standard pipeline.
//!
//! A directory run is a loop: scan for the next video without output,
//! process it, repeat. Videos that fail recoverably go into an exclusion
//! set for the rest of the run; anything else aborts the run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Settings;
use crate::events::EventDispatcher;
use crate::jobs::VideoDiscovery;
use crate::models::VideoJob;
use crate::separation::{create_music_remover, MusicRemover};
use crate::tools::{ToolRunner, Toolchain};
use crate::validation::{validate_input, validate_output};

use super::errors::{PipelineError, PipelineResult};
use super::pipeline::{CancelHandle, Pipeline};
use super::types::{Context, JobState};
use super::create_standard_pipeline;

/// Prefix of the per-video scratch directory.
const SCRATCH_PREFIX: &str = "music-remover-";

/// A video left behind by a directory run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedVideo {
    /// Source video that failed.
    pub video: PathBuf,
    /// Rendered error.
    pub error: String,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Output videos written, in processing order.
    pub processed: Vec<PathBuf>,
    /// Videos skipped after a recoverable failure.
    pub skipped: Vec<SkippedVideo>,
}

impl RunSummary {
    /// Whether every video that was attempted succeeded.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Runs the standard pipeline for single videos and whole directories.
///
/// # Example
///
/// ```ignore
/// let runner = Arc::new(SystemRunner::new());
/// let processor = Processor::new(&settings, runner, events);
/// let summary = processor.process(&input, &output)?;
/// ```
pub struct Processor {
    tools: Toolchain,
    runner: Arc<dyn ToolRunner>,
    remover: Arc<dyn MusicRemover>,
    events: Arc<EventDispatcher>,
    delete_original: bool,
    pipeline: Pipeline,
}

impl Processor {
    /// Create a processor from settings.
    ///
    /// The separation backend is picked from `settings.separation`.
    pub fn new(settings: &Settings, runner: Arc<dyn ToolRunner>, events: EventDispatcher) -> Self {
        let tools = Toolchain::from_settings(&settings.tools);
        let remover = create_music_remover(&settings.separation, &tools);
        Self {
            tools,
            runner,
            remover: Arc::from(remover),
            events: Arc::new(events),
            delete_original: settings.processing.delete_original,
            pipeline: create_standard_pipeline(),
        }
    }

    /// Use a specific separation backend.
    pub fn with_remover(mut self, remover: Arc<dyn MusicRemover>) -> Self {
        self.remover = remover;
        self
    }

    /// Share `handle` with the pipeline.
    pub fn with_cancel_handle(mut self, handle: CancelHandle) -> Self {
        self.pipeline = self.pipeline.with_cancel_handle(handle);
        self
    }

    /// Handle that stops the run at the next step or stream boundary.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.pipeline.cancel_handle()
    }

    /// Validate both paths, then process a directory or a single video.
    pub fn process(&self, input: &Path, output: &Path) -> PipelineResult<RunSummary> {
        let input = validate_input(input)?;
        let output = validate_output(output, &input)?;

        if input.is_dir() {
            self.process_directory(&input, &output)
        } else {
            let written = self.process_file(&input, &output)?;
            Ok(RunSummary {
                processed: vec![written],
                skipped: Vec::new(),
            })
        }
    }

    /// Process every video below `input_root` that has no output yet.
    ///
    /// Output paths mirror the input tree under `output_root`.
    pub fn process_directory(
        &self,
        input_root: &Path,
        output_root: &Path,
    ) -> PipelineResult<RunSummary> {
        let discovery = VideoDiscovery::new(input_root, output_root);
        let mut excluded: HashSet<PathBuf> = HashSet::new();
        let mut summary = RunSummary::default();

        self.events.mass_processing_started(input_root);

        loop {
            self.events.scan_directory(input_root);
            let job = discovery.next_job(&excluded);
            self.events
                .scan_result(job.as_ref().map(|j| j.original_video.as_path()));

            let Some(job) = job else {
                break;
            };

            match self.process_video(&job) {
                Ok(written) => summary.processed.push(written),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("Skipping {}: {}", job.original_video.display(), e);
                    self.events.skipping_failed_file(&job.original_video, &e);
                    summary.skipped.push(SkippedVideo {
                        video: job.original_video.clone(),
                        error: e.to_string(),
                    });
                    excluded.insert(job.original_video);
                }
                Err(e) => return Err(e),
            }
        }

        self.events.mass_processing_finished(input_root);
        tracing::info!(
            "Run finished: {} processed, {} skipped",
            summary.processed.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    /// Process one video into `output_dir/<file name>`. Errors propagate.
    pub fn process_file(&self, video: &Path, output_dir: &Path) -> PipelineResult<PathBuf> {
        self.process_video(&VideoJob::single(video, output_dir))
    }

    /// Run the pipeline for one job and return the written output.
    ///
    /// The scratch directory is removed before this returns. The original
    /// is deleted only after the output is in place.
    pub fn process_video(&self, job: &VideoJob) -> PipelineResult<PathBuf> {
        let name = job.name();
        self.events.video_processing_started(&job.original_video);

        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .map_err(|e| {
                PipelineError::setup_failed(&name, format!("creating scratch directory: {e}"))
            })?;

        let ctx = Context {
            job: job.clone(),
            work_dir: scratch.path().to_path_buf(),
            tools: self.tools.clone(),
            runner: Arc::clone(&self.runner),
            remover: Arc::clone(&self.remover),
            events: Arc::clone(&self.events),
            cancel: self.pipeline.cancel_handle(),
        };
        for dir in [ctx.input_dir(), ctx.intermediate_dir()] {
            fs::create_dir_all(&dir).map_err(|e| {
                PipelineError::setup_failed(&name, format!("creating {}: {e}", dir.display()))
            })?;
        }

        let mut state = JobState::new();
        let run = self.pipeline.run(&ctx, &mut state)?;
        tracing::debug!("{}: steps completed {:?}", name, run.steps_completed);

        if let Err(e) = scratch.close() {
            tracing::warn!("{}: failed to remove scratch directory: {}", name, e);
        }

        let written = state
            .output_path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| job.no_music_video.clone());
        self.events
            .video_processing_finished(&job.original_video, &job.no_music_video);

        if self.delete_original {
            self.delete_original(&job.original_video)?;
        }

        Ok(written)
    }

    fn delete_original(&self, video: &Path) -> PipelineResult<()> {
        self.events.delete_original_video_started(video);
        fs::remove_file(video).map_err(|source| PipelineError::DeleteFailed {
            path: video.to_path_buf(),
            source,
        })?;
        self.events.delete_original_video_finished(video);
        Ok(())
    }
}
