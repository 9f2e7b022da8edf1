use super::artifact::OutputArtifact;
use serde::{Deserialize, Serialize};

/// Manifest returned to the orchestrator exactly once per invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    pub output_files: Vec<OutputArtifact>,
    pub workflow_id: Option<String>,
    /// Executed command line joined by spaces; empty when the tool never ran
    pub command: String,
}

impl TaskResult {
    /// Graceful no-op result: no outputs, no command
    pub fn empty(workflow_id: Option<String>) -> Self {
        Self {
            output_files: Vec::new(),
            workflow_id,
            command: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.output_files.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
