//! Error types for probing and stream extraction.

use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

use crate::models::Tool;
use crate::tools::ToolError;

/// Error type for extraction operations.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// External tool failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Tool output was not valid UTF-8.
    #[error("{tool} produced output that is not valid UTF-8: {source}")]
    Encoding {
        tool: Tool,
        #[source]
        source: Utf8Error,
    },

    /// Tool output did not have the expected shape.
    #[error("Failed to parse {tool} output for {}: {message}", .path.display())]
    Parse {
        tool: Tool,
        path: PathBuf,
        message: String,
    },
}

impl ExtractionError {
    pub fn parse(tool: Tool, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            tool,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether a batch may skip the video and continue.
    ///
    /// Malformed probe output points at a tool/environment mismatch rather
    /// than a bad file, so it is not recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ExtractionError::Tool(e) => e.is_recoverable(),
            ExtractionError::Encoding { .. } => true,
            ExtractionError::Parse { .. } => false,
        }
    }
}

/// Result type for extraction operations.
pub type ExtractionResult<T> = Result<T, ExtractionError>;
