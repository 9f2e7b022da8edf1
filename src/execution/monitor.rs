//! # Progress Monitor
//!
//! Polls the tool process at a fixed interval. Each poll that finds the
//! process still running publishes one heartbeat; the analyzer reports no
//! progress fraction, so the signal means "alive", never "N% done".
//!
//! Between polls the monitor sleeps, but the sleep also wakes for
//! cancellation and for the optional deadline. Either one kills the child
//! and reaps it before returning, so the caller's staging guard removes the
//! directory only after nothing is reading from it.

use super::invoker::{RunningTool, ToolInvocation};
use crate::error::{Result, WorkerError};
use crate::events::EventPublisher;
use std::time::Duration;
use tokio::process::Child;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ProgressMonitor {
    interval: Duration,
    timeout: Option<Duration>,
    publisher: EventPublisher,
}

impl ProgressMonitor {
    pub fn new(interval: Duration, publisher: EventPublisher) -> Self {
        Self {
            interval,
            timeout: None,
            publisher,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for the tool to exit, emitting heartbeats for `task_name`
    pub async fn supervise(
        &self,
        running: RunningTool,
        task_name: &str,
        workflow_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ToolInvocation> {
        let RunningTool {
            command,
            mut child,
            started_at,
        } = running;
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let mut heartbeats: u64 = 0;

        loop {
            let polled = child
                .try_wait()
                .map_err(|e| WorkerError::tool(command.program(), e))?;

            if let Some(exit_status) = polled {
                let elapsed = started_at.elapsed();
                info!(
                    task_name = %task_name,
                    exit_code = exit_status.code(),
                    heartbeats = heartbeats,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "External tool exited"
                );
                return Ok(ToolInvocation {
                    command,
                    exit_status,
                    elapsed,
                });
            }

            self.publisher.heartbeat(task_name, workflow_id);
            heartbeats += 1;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = cancel.cancelled() => {
                    warn!(task_name = %task_name, "Cancellation requested, terminating external tool");
                    terminate(&mut child).await;
                    return Err(WorkerError::Cancelled {
                        task: task_name.to_string(),
                    });
                }
                _ = wait_for_deadline(deadline) => {
                    let timeout = self.timeout.unwrap_or_default();
                    warn!(
                        task_name = %task_name,
                        timeout_secs = timeout.as_secs(),
                        "Deadline exceeded, terminating external tool"
                    );
                    terminate(&mut child).await;
                    return Err(WorkerError::TimedOut {
                        task: task_name.to_string(),
                        timeout,
                    });
                }
            }
        }
    }
}

async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Kill and reap; failures only mean the process is already gone
async fn terminate(child: &mut Child) {
    if let Err(e) = child.kill().await {
        debug!(error = %e, "External tool already exited before kill");
    }
}
