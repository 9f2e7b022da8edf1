//! # Task Models
//!
//! Descriptors exchanged with the orchestrator: the artifacts flowing in and
//! out of an invocation, the request that starts one, and the manifest
//! returned when it finishes.

pub mod artifact;
pub mod request;
pub mod task_result;

pub use artifact::{InputArtifact, OutputArtifact};
pub use request::{TaskConfig, TaskRequest};
pub use task_result::TaskResult;
