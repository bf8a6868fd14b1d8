//! Recombine step - write the video back with the separated audio.

use std::fs;

use crate::mux::replace_audio_streams;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, RecombineOutput, StepOutcome};

/// Remuxes the source with the separated audio into the job's output path.
pub struct RecombineStep;

impl RecombineStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RecombineStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for RecombineStep {
    fn name(&self) -> &str {
        "Recombine"
    }

    fn description(&self) -> &str {
        "Create the video with music-free audio"
    }

    fn validate_input(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if !state.has_extraction() {
            return Err(StepError::invalid_input("Extraction has not run"));
        }
        if !state.has_separation() {
            return Err(StepError::invalid_input("Separation has not run"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let (Some(extract), Some(separate)) = (&state.extract, &state.separate) else {
            return Err(StepError::invalid_input("Missing extraction or separation"));
        };

        let new_video = &ctx.job.no_music_video;
        ctx.events
            .creating_new_video_started(ctx.video(), new_video);

        let output_dir = ctx.job.output_dir();
        fs::create_dir_all(output_dir)
            .map_err(|e| StepError::io_error("creating output directory", e))?;

        let output_path = replace_audio_streams(
            ctx.runner.as_ref(),
            &ctx.tools,
            ctx.video(),
            &extract.streams,
            &separate.files,
            output_dir,
        )?;

        ctx.events
            .creating_new_video_finished(ctx.video(), new_video);

        let audio_streams = separate.files.len();
        state.recombine = Some(RecombineOutput {
            output_path,
            audio_streams,
        });
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, ctx: &Context, state: &JobState) -> StepResult<()> {
        match state.output_path() {
            Some(path) if path == ctx.job.no_music_video && path.is_file() => Ok(()),
            Some(path) => Err(StepError::invalid_output(format!(
                "Output not written where expected: {}",
                path.display()
            ))),
            None => Err(StepError::invalid_output("Recombination not recorded")),
        }
    }
}
