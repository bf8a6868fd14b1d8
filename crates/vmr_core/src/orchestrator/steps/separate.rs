//! Separate step - remove the music from every extracted stream.

use std::fs;

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, SeparateOutput, StepOutcome};

/// Runs the separation backend on each extracted file, in stream order.
pub struct SeparateStep;

impl SeparateStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeparateStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for SeparateStep {
    fn name(&self) -> &str {
        "Separate"
    }

    fn description(&self) -> &str {
        "Separate vocals from each audio stream"
    }

    fn validate_input(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if !state.has_extraction() {
            return Err(StepError::invalid_input("Extraction has not run"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let inputs = state
            .extract
            .as_ref()
            .map(|e| e.files.clone())
            .unwrap_or_default();

        if inputs.is_empty() {
            state.separate = Some(SeparateOutput { files: Vec::new() });
            return Ok(StepOutcome::Skipped("no audio streams".to_string()));
        }

        let intermediate = ctx.intermediate_dir();
        fs::create_dir_all(&intermediate)
            .map_err(|e| StepError::io_error("creating scratch intermediate directory", e))?;

        let total = inputs.len();
        let mut files = Vec::with_capacity(total);

        for (index, audio) in inputs.iter().enumerate() {
            if ctx.cancel.is_cancelled() {
                return Err(StepError::Cancelled);
            }

            let counter = index + 1;
            ctx.events
                .audio_processing_started(ctx.video(), counter, total);

            let separated = ctx
                .remover
                .remove_music(ctx.runner.as_ref(), audio, &intermediate)?;

            ctx.events
                .audio_processing_finished(ctx.video(), counter, total);
            files.push(separated);
        }

        state.separate = Some(SeparateOutput { files });
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let expected = state.extract.as_ref().map(|e| e.files.len()).unwrap_or(0);
        match &state.separate {
            Some(out) if out.files.len() == expected => Ok(()),
            Some(out) => Err(StepError::invalid_output(format!(
                "{} separated files for {} extracted streams",
                out.files.len(),
                expected
            ))),
            None => Err(StepError::invalid_output("Separation not recorded")),
        }
    }
}
