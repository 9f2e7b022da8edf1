//! # Task Runner
//!
//! Lifecycle of one invocation, strictly sequential:
//!
//! ```text
//! select inputs ─▶ allocate output ─▶ stage ─▶ invoke ─▶ monitor ─▶ release staging ─▶ package
//!       │                                  │                                   ▲
//!       └─ none: empty result or error     └────── any failure ────────────────┘
//! ```
//!
//! The staging directory is owned by a [`StagingArea`] guard, so it is gone
//! after every exit path: tool crash, cancellation, deadline, missing output,
//! or a panic unwinding through the runner. A failed invocation also removes
//! whatever the tool left at the output path, so the orchestrator never sees
//! a half-written artifact.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hayabusa_worker::config::WorkerConfig;
//! use hayabusa_worker::events::EventPublisher;
//! use hayabusa_worker::models::{InputArtifact, TaskRequest};
//! use hayabusa_worker::tasks::csv_timeline;
//! use hayabusa_worker::worker::TaskRunner;
//! use tokio_util::sync::CancellationToken;
//!
//! # tokio_test::block_on(async {
//! let runner = TaskRunner::new(&WorkerConfig::default(), EventPublisher::default());
//! let request = TaskRequest::new("/data/output")
//!     .with_inputs(vec![InputArtifact::new("/data/input/Security.evtx")])
//!     .with_workflow_id("wf-1");
//!
//! let result = runner
//!     .run(&csv_timeline::definition(), request, &CancellationToken::new())
//!     .await
//!     .unwrap();
//! println!("{}", result.command);
//! # });
//! ```

use crate::config::WorkerConfig;
use crate::error::{Result, WorkerError};
use crate::events::EventPublisher;
use crate::execution::{ProgressMonitor, ToolCommand, ToolInvocation, ToolInvoker};
use crate::logging::log_task_operation;
use crate::models::{InputArtifact, OutputArtifact, TaskRequest, TaskResult};
use crate::packaging;
use crate::selection::NoInputPolicy;
use crate::staging::StagingArea;
use crate::tasks::TaskDefinition;
use std::fs;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

/// Executes task definitions against requests; holds no per-invocation state
#[derive(Debug, Clone)]
pub struct TaskRunner {
    binary_path: PathBuf,
    detect_collisions: bool,
    monitor: ProgressMonitor,
    publisher: EventPublisher,
}

impl TaskRunner {
    pub fn new(config: &WorkerConfig, publisher: EventPublisher) -> Self {
        let monitor = ProgressMonitor::new(config.tool.poll_interval(), publisher.clone())
            .with_timeout(config.tool.timeout());

        Self {
            binary_path: config.tool.binary_path.clone(),
            detect_collisions: config.staging.detect_collisions,
            monitor,
            publisher,
        }
    }

    pub fn publisher(&self) -> &EventPublisher {
        &self.publisher
    }

    /// Run one invocation of `task` and report its manifest
    #[instrument(skip_all, fields(task_name = %task.name, workflow_id = ?request.workflow_id))]
    pub async fn run(
        &self,
        task: &TaskDefinition,
        request: TaskRequest,
        cancel: &CancellationToken,
    ) -> Result<TaskResult> {
        let workflow_id = request.workflow_id.clone();
        let candidates = request.candidate_inputs();
        let selected = task.compatible_inputs.select(&candidates);

        info!(
            candidates = candidates.len(),
            selected = selected.len(),
            "Input selection complete"
        );

        if selected.is_empty() {
            return match task.no_input_policy {
                NoInputPolicy::ReturnEmpty => {
                    log_task_operation("select_inputs", &task.name, workflow_id.as_deref(), "no_input", None);
                    Ok(TaskResult::empty(workflow_id))
                }
                NoInputPolicy::Fail => {
                    log_task_operation("select_inputs", &task.name, workflow_id.as_deref(), "failed", Some("no compatible input"));
                    Err(WorkerError::NoCompatibleInput {
                        task: task.name.clone(),
                    })
                }
            };
        }

        if cancel.is_cancelled() {
            return Err(WorkerError::Cancelled {
                task: task.name.clone(),
            });
        }

        let output = task
            .output
            .allocate(&request.output_path, request.task_config.display_name.as_deref());
        let staging = StagingArea::acquire(&request.output_path)?;

        let outcome = self
            .execute(task, &staging, &selected, &output, workflow_id.as_deref(), cancel)
            .await;

        let staging_dir = staging.path().to_path_buf();
        if let Err(e) = staging.release() {
            // The guard is consumed either way; surface the leak loudly
            error!(staging_dir = %staging_dir.display(), error = %e, "Staging directory was not removed");
        }

        let result = outcome.and_then(|invocation| {
            packaging::package(output.clone(), &invocation, workflow_id.clone())
        });

        match &result {
            Ok(task_result) => {
                log_task_operation(
                    "complete",
                    &task.name,
                    workflow_id.as_deref(),
                    "succeeded",
                    Some(&task_result.command),
                );
            }
            Err(e) => {
                discard_partial_output(&output);
                log_task_operation(
                    "complete",
                    &task.name,
                    workflow_id.as_deref(),
                    e.error_code(),
                    Some(&e.to_string()),
                );
            }
        }

        result
    }

    async fn execute(
        &self,
        task: &TaskDefinition,
        staging: &StagingArea,
        selected: &[InputArtifact],
        output: &OutputArtifact,
        workflow_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ToolInvocation> {
        staging.populate(selected, self.detect_collisions)?;

        let command = ToolCommand::build(task.mode, &self.binary_path, &output.path, staging.path());
        log_task_operation("invoke", &task.name, workflow_id, "started", Some(&command.command_line()));

        let running = ToolInvoker::spawn(command)?;
        let invocation = self
            .monitor
            .supervise(running, &task.name, workflow_id, cancel)
            .await?;

        if !invocation.succeeded() {
            // Judged by the output file, not the exit code
            warn!(
                exit_code = invocation.exit_status.code(),
                "External tool exited unsuccessfully"
            );
        }

        Ok(invocation)
    }
}

fn discard_partial_output(output: &OutputArtifact) {
    match fs::remove_file(&output.path) {
        Ok(()) => warn!(output = %output.path.display(), "Removed partial output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(output = %output.path.display(), error = %e, "Failed to remove partial output"),
    }
}
