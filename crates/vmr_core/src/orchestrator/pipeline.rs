//! Pipeline runner that executes steps in sequence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::errors::{PipelineError, PipelineResult, StepError};
use super::step::PipelineStep;
use super::types::{Context, JobState, StepOutcome};

/// Pipeline that runs a sequence of steps.
///
/// The pipeline executes steps in order, running validation before
/// and after each step. It handles cancellation and tracks which
/// steps were executed. One pipeline is reused for every video of a run.
pub struct Pipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
    /// Cancellation flag.
    cancelled: Arc<AtomicBool>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share an existing cancellation flag, so a runner created before the
    /// pipeline can observe the same cancellation.
    pub fn with_cancel_handle(mut self, handle: CancelHandle) -> Self {
        self.cancelled = handle.flag;
        self
    }

    /// Add a step to the pipeline.
    pub fn add_step<S: PipelineStep + 'static>(&mut self, step: S) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.add_step(step);
        self
    }

    /// Get a cancellation handle.
    ///
    /// Call `cancel()` on the returned handle to stop the pipeline
    /// at the next step boundary.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancelled),
        }
    }

    /// Check if pipeline has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Run the pipeline with the given context and state.
    ///
    /// Executes each step in order:
    /// 1. Check for cancellation
    /// 2. Run `validate_input`
    /// 3. Run `execute`
    /// 4. Run `validate_output` (if execute returned Success)
    pub fn run(&self, ctx: &Context, state: &mut JobState) -> PipelineResult<PipelineRunResult> {
        let mut result = PipelineRunResult {
            steps_completed: Vec::new(),
            steps_skipped: Vec::new(),
        };
        let video = ctx.job_name();

        for step in &self.steps {
            let step_name = step.name();

            if self.is_cancelled() {
                tracing::warn!("{}: cancelled before step '{}'", video, step_name);
                return Err(PipelineError::cancelled(&video));
            }

            tracing::debug!("{}: {} - {}", video, step_name, step.description());

            let fail = |e: StepError| {
                if e.is_cancellation() {
                    tracing::warn!("{}: cancelled during '{}'", video, step_name);
                    PipelineError::cancelled(&video)
                } else {
                    tracing::debug!("{}: '{}' failed: {}", video, step_name, e);
                    PipelineError::step_failed(&video, step_name, e)
                }
            };

            step.validate_input(ctx, state).map_err(fail)?;
            let outcome = step.execute(ctx, state).map_err(fail)?;

            match outcome {
                StepOutcome::Success => {
                    step.validate_output(ctx, state).map_err(fail)?;
                    result.steps_completed.push(step_name.to_string());
                }
                StepOutcome::Skipped(reason) => {
                    tracing::info!("{}: {} skipped: {}", video, step_name, reason);
                    result.steps_skipped.push(step_name.to_string());
                }
            }
        }

        Ok(result)
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for cancelling a running pipeline.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Create a handle that is not attached to any pipeline yet.
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Cancel the pipeline.
    ///
    /// The pipeline stops at the next step or stream boundary, and a
    /// [`SystemRunner`](crate::tools::SystemRunner) sharing this handle
    /// kills its running child.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRunResult {
    /// Steps that completed successfully.
    pub steps_completed: Vec<String>,
    /// Steps that were skipped.
    pub steps_skipped: Vec<String>,
}

impl PipelineRunResult {
    /// Check if all steps completed (none skipped).
    pub fn all_completed(&self) -> bool {
        self.steps_skipped.is_empty()
    }

    /// Total number of steps that ran.
    pub fn total_steps(&self) -> usize {
        self.steps_completed.len() + self.steps_skipped.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::errors::StepResult;
    use crate::testing::test_context;
    use std::sync::atomic::AtomicUsize;

    struct CountingStep {
        name: &'static str,
        execute_count: Arc<AtomicUsize>,
        outcome: StepOutcome,
    }

    impl CountingStep {
        fn new(name: &'static str, execute_count: &Arc<AtomicUsize>) -> Self {
            Self {
                name,
                execute_count: Arc::clone(execute_count),
                outcome: StepOutcome::Success,
            }
        }
    }

    impl PipelineStep for CountingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn validate_input(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut JobState) -> StepResult<StepOutcome> {
            self.execute_count.fetch_add(1, Ordering::SeqCst);
            Ok(self.outcome.clone())
        }

        fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }
    }

    struct FailingStep;

    impl PipelineStep for FailingStep {
        fn name(&self) -> &str {
            "Fails"
        }

        fn validate_input(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut JobState) -> StepResult<StepOutcome> {
            Err(StepError::invalid_output("nothing written"))
        }

        fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }
    }

    #[test]
    fn pipeline_builds_correctly() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(CountingStep::new("Step1", &count))
            .with_step(CountingStep::new("Step2", &count));

        assert_eq!(pipeline.step_count(), 2);
        assert_eq!(pipeline.step_names(), vec!["Step1", "Step2"]);
    }

    #[test]
    fn runs_steps_in_order_and_records_outcomes() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut skipped = CountingStep::new("Step2", &count);
        skipped.outcome = StepOutcome::Skipped("nothing to do".to_string());
        let pipeline = Pipeline::new()
            .with_step(CountingStep::new("Step1", &count))
            .with_step(skipped);

        let (ctx, _scratch) = test_context(&pipeline);
        let result = pipeline.run(&ctx, &mut JobState::new()).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(result.steps_completed, vec!["Step1"]);
        assert_eq!(result.steps_skipped, vec!["Step2"]);
        assert!(!result.all_completed());
        assert_eq!(result.total_steps(), 2);
    }

    #[test]
    fn failure_stops_pipeline_with_step_context() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(FailingStep)
            .with_step(CountingStep::new("After", &count));

        let (ctx, _scratch) = test_context(&pipeline);
        let err = pipeline.run(&ctx, &mut JobState::new()).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::StepFailed { ref step_name, .. } if step_name == "Fails"
        ));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancel_handle_works() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().with_step(CountingStep::new("Step1", &count));
        let handle = pipeline.cancel_handle();

        assert!(!pipeline.is_cancelled());
        handle.cancel();
        assert!(pipeline.is_cancelled());
        assert!(handle.is_cancelled());

        let (ctx, _scratch) = test_context(&pipeline);
        let err = pipeline.run(&ctx, &mut JobState::new()).unwrap_err();
        assert!(matches!(err, PipelineError::Cancelled { .. }));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn shared_handle_cancels_pipeline() {
        let handle = CancelHandle::new();
        let pipeline = Pipeline::new().with_cancel_handle(handle.clone());

        handle.cancel();
        assert!(pipeline.is_cancelled());
        assert!(pipeline.cancel_handle().is_cancelled());
    }
}
