use super::artifact::InputArtifact;
use super::task_result::TaskResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Operation-specific configuration bag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Custom display name for the produced artifact
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One invocation as handed over by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Result of the upstream task, if this invocation is piped
    #[serde(default)]
    pub pipe_result: Option<TaskResult>,
    #[serde(default)]
    pub input_files: Vec<InputArtifact>,
    /// Output root; staging directories and outputs are created here
    pub output_path: PathBuf,
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub task_config: TaskConfig,
}

impl TaskRequest {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            pipe_result: None,
            input_files: Vec::new(),
            output_path: output_path.into(),
            workflow_id: None,
            task_config: TaskConfig::default(),
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<InputArtifact>) -> Self {
        self.input_files = inputs;
        self
    }

    pub fn with_workflow_id(mut self, workflow_id: impl Into<String>) -> Self {
        self.workflow_id = Some(workflow_id.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.task_config.display_name = Some(display_name.into());
        self
    }

    pub fn with_pipe_result(mut self, pipe_result: TaskResult) -> Self {
        self.pipe_result = Some(pipe_result);
        self
    }

    /// Candidate inputs before filtering: the upstream outputs when piped,
    /// otherwise the explicit input list
    pub fn candidate_inputs(&self) -> Vec<InputArtifact> {
        match &self.pipe_result {
            Some(upstream) => upstream
                .output_files
                .iter()
                .cloned()
                .map(InputArtifact::from)
                .collect(),
            None => self.input_files.clone(),
        }
    }
}
