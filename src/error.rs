//! # Worker Errors
//!
//! Error taxonomy for a single task invocation.
//!
//! None of these are retried inside the worker. A fatal error aborts the
//! invocation with no partial [`TaskResult`](crate::models::TaskResult); retry
//! policy belongs to the orchestrator.

use crate::config::ConfigurationError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    /// Selection produced no inputs for a task whose policy is fatal
    #[error("No compatible input files for task '{task}'")]
    NoCompatibleInput { task: String },

    /// Staging directory creation, linking, or removal failed
    #[error("Staging failure during {operation} at '{}': {reason}", path.display())]
    StagingFailure {
        operation: String,
        path: PathBuf,
        reason: String,
    },

    /// The external tool could not be launched or supervised
    #[error("Failed to execute '{}': {reason}", binary.display())]
    ToolExecutionFailure { binary: PathBuf, reason: String },

    /// The tool exited but the pre-allocated output is missing or empty
    #[error("Tool produced no output at '{}'", path.display())]
    EmptyOutput { path: PathBuf },

    #[error("Task '{task}' was cancelled")]
    Cancelled { task: String },

    #[error("Task '{task}' exceeded its deadline of {}s", timeout.as_secs())]
    TimedOut { task: String, timeout: Duration },

    #[error("Task registration error: {reason}")]
    Registration { reason: String },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WorkerError {
    pub fn staging(operation: impl Into<String>, path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::StagingFailure {
            operation: operation.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn tool(binary: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ToolExecutionFailure {
            binary: binary.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable code reported to the orchestrator alongside the message
    pub fn error_code(&self) -> &'static str {
        match self {
            WorkerError::NoCompatibleInput { .. } => "NO_COMPATIBLE_INPUT",
            WorkerError::StagingFailure { .. } => "STAGING_FAILURE",
            WorkerError::ToolExecutionFailure { .. } => "TOOL_EXECUTION_FAILURE",
            WorkerError::EmptyOutput { .. } => "EMPTY_OUTPUT",
            WorkerError::Cancelled { .. } => "CANCELLED",
            WorkerError::TimedOut { .. } => "TIMED_OUT",
            WorkerError::Registration { .. } => "REGISTRATION_ERROR",
            WorkerError::Configuration(_) => "CONFIGURATION_ERROR",
            WorkerError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        let err = WorkerError::NoCompatibleInput {
            task: "csv_timeline".to_string(),
        };
        assert_eq!(err.error_code(), "NO_COMPATIBLE_INPUT");

        let err = WorkerError::EmptyOutput {
            path: PathBuf::from("/out/abc.csv"),
        };
        assert_eq!(err.error_code(), "EMPTY_OUTPUT");
        assert_eq!(err.to_string(), "Tool produced no output at '/out/abc.csv'");
    }

    #[test]
    fn test_staging_helper_formats_context() {
        let err = WorkerError::staging("link", "/out/stage/a.evtx", "File exists");
        assert_eq!(err.error_code(), "STAGING_FAILURE");
        assert_eq!(
            err.to_string(),
            "Staging failure during link at '/out/stage/a.evtx': File exists"
        );
    }
}
