use super::command::ToolCommand;
use crate::error::{Result, WorkerError};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// A launched tool process that has not been reaped yet
#[derive(Debug)]
pub struct RunningTool {
    pub command: ToolCommand,
    pub child: Child,
    pub started_at: Instant,
}

/// Record of one finished tool run
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub command: ToolCommand,
    pub exit_status: ExitStatus,
    pub elapsed: Duration,
}

impl ToolInvocation {
    pub fn succeeded(&self) -> bool {
        self.exit_status.success()
    }
}

pub struct ToolInvoker;

impl ToolInvoker {
    /// Launch the tool. Output streams are inherited so the tool's own
    /// logging reaches the worker's log collector untouched.
    pub fn spawn(command: ToolCommand) -> Result<RunningTool> {
        debug!(command = %command, "Launching external tool");

        let child = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WorkerError::tool(command.program(), e))?;

        info!(
            pid = child.id(),
            program = %command.program().display(),
            "External tool started"
        );

        Ok(RunningTool {
            command,
            child,
            started_at: Instant::now(),
        })
    }
}
