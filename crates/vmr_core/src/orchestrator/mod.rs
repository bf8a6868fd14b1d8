//! Pipeline orchestrator for coordinating per-video processing.
//!
//! Each video runs through a fixed sequence of steps that validate,
//! execute, and record their results in a [`JobState`]. The [`Processor`]
//! drives that pipeline for a single file or for every pending video of a
//! directory.
//!
//! # Architecture
//!
//! ```text
//! Processor
//!     └── Pipeline (per video, scratch TempDir)
//!             ├── Step: Extract
//!             ├── Step: Separate
//!             └── Step: Recombine
//! ```
//!
//! # Example
//!
//! ```ignore
//! use vmr_core::orchestrator::Processor;
//!
//! let processor = Processor::new(&settings, runner, events);
//! let summary = processor.process(&input, &output)?;
//! println!("Processed: {:?}", summary.processed);
//! ```

mod errors;
mod pipeline;
mod processor;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{CancelHandle, Pipeline, PipelineRunResult};
pub use processor::{Processor, RunSummary, SkippedVideo};
pub use step::PipelineStep;
pub use steps::{ExtractStep, RecombineStep, SeparateStep};
pub use types::{
    Context, ExtractOutput, JobState, RecombineOutput, SeparateOutput, StepOutcome,
};

/// Create a standard pipeline with all steps in the correct order.
///
/// The standard pipeline executes these steps:
/// 1. Extract - probe the audio streams and extract each one
/// 2. Separate - remove the music from every extracted stream
/// 3. Recombine - write the video back with the separated audio
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(ExtractStep::new())
        .with_step(SeparateStep::new())
        .with_step(RecombineStep::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pipeline_order() {
        let pipeline = create_standard_pipeline();
        assert_eq!(
            pipeline.step_names(),
            vec!["Extract", "Separate", "Recombine"]
        );
    }
}
