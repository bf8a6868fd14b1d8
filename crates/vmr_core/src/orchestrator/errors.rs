//! Error types for the orchestrator pipeline.
//!
//! Errors carry context that chains through layers:
//! Video → Step → Operation → Detail

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::mux::MuxError;
use crate::tools::ToolError;
use crate::validation::ValidationError;

/// Top-level pipeline error with video context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Paths were rejected before anything ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A step failed during execution.
    #[error("'{video}' failed at step '{step_name}': {source}")]
    StepFailed {
        video: String,
        step_name: String,
        #[source]
        source: StepError,
    },

    /// Failed to set up the video (scratch directory, output directory).
    #[error("'{video}' setup failed: {message}")]
    SetupFailed { video: String, message: String },

    /// The output was written but the original could not be removed.
    #[error("Failed to delete original video {}: {source}", .path.display())]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Pipeline was cancelled.
    #[error("'{video}' was cancelled")]
    Cancelled { video: String },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        video: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            video: video.into(),
            step_name: step_name.into(),
            source,
        }
    }

    /// Create a setup failed error.
    pub fn setup_failed(video: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            video: video.into(),
            message: message.into(),
        }
    }

    /// Create a cancelled error.
    pub fn cancelled(video: impl Into<String>) -> Self {
        Self::Cancelled {
            video: video.into(),
        }
    }

    /// Whether a directory run may skip the video and continue.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PipelineError::StepFailed { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Error from a pipeline step with operation context.
#[derive(Error, Debug)]
pub enum StepError {
    /// Probing or extracting the audio streams failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// An external tool failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Remuxing failed.
    #[error(transparent)]
    Mux(#[from] MuxError),

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// The run was cancelled inside a step.
    #[error("Cancelled")]
    Cancelled,
}

impl StepError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Create an I/O error with context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source,
        }
    }

    /// Whether the failure is confined to the current video.
    ///
    /// Tool failures and undecodable tool output are. Malformed probe
    /// output, I/O trouble, broken step invariants and missing executables
    /// are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StepError::Extraction(e) => e.is_recoverable(),
            StepError::Tool(e) => e.is_recoverable(),
            StepError::Mux(e) => e.is_recoverable(),
            StepError::IoError { .. }
            | StepError::InvalidInput(_)
            | StepError::InvalidOutput(_)
            | StepError::Cancelled => false,
        }
    }

    /// Whether this error comes from a cancellation request.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            StepError::Cancelled
                | StepError::Tool(ToolError::Cancelled { .. })
                | StepError::Extraction(ExtractionError::Tool(ToolError::Cancelled { .. }))
                | StepError::Mux(MuxError::Tool(ToolError::Cancelled { .. }))
        )
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
