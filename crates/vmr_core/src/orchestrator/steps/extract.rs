//! Extract step - probe the audio layout and split each stream out.

use std::fs;

use crate::extraction::{extract_audio_streams, probe_audio_streams};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, ExtractOutput, JobState, StepOutcome};

/// Probes the source and writes one file per audio stream into the
/// scratch `input` directory.
pub struct ExtractStep;

impl ExtractStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExtractStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ExtractStep {
    fn name(&self) -> &str {
        "Extract"
    }

    fn description(&self) -> &str {
        "Probe audio streams and extract each one"
    }

    fn validate_input(&self, ctx: &Context, _state: &JobState) -> StepResult<()> {
        if !ctx.video().is_file() {
            return Err(StepError::invalid_input(format!(
                "Source video not found: {}",
                ctx.video().display()
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let streams = probe_audio_streams(ctx.runner.as_ref(), &ctx.tools, ctx.video())?;
        tracing::debug!(
            "{}: {} audio stream(s) found",
            ctx.job_name(),
            streams.len()
        );

        let input_dir = ctx.input_dir();
        fs::create_dir_all(&input_dir)
            .map_err(|e| StepError::io_error("creating scratch input directory", e))?;

        let files = extract_audio_streams(
            ctx.runner.as_ref(),
            &ctx.tools,
            ctx.video(),
            &streams,
            &input_dir,
        )?;

        state.extract = Some(ExtractOutput { streams, files });
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let extract = state
            .extract
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("Extraction not recorded"))?;

        if extract.files.len() != extract.streams.len() {
            return Err(StepError::invalid_output(format!(
                "{} files extracted for {} audio streams",
                extract.files.len(),
                extract.streams.len()
            )));
        }
        for file in &extract.files {
            if !file.exists() {
                return Err(StepError::invalid_output(format!(
                    "Extracted audio missing: {}",
                    file.display()
                )));
            }
        }
        Ok(())
    }
}
