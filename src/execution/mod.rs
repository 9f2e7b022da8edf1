//! # Tool Execution
//!
//! Builds the external tool's command line, launches it, and supervises the
//! child process until it exits.
//!
//! ```text
//! ToolCommand::build ──▶ ToolInvoker::spawn ──▶ ProgressMonitor::supervise ──▶ ToolInvocation
//!   (argument vector)      (child process)        (heartbeats, cancel, deadline)
//! ```
//!
//! The tool's stdout and stderr are inherited, never parsed. Only the exit
//! status and the file written at the output path matter.

pub mod command;
pub mod invoker;
pub mod monitor;

pub use command::{ToolCommand, ToolMode};
pub use invoker::{RunningTool, ToolInvocation, ToolInvoker};
pub use monitor::ProgressMonitor;
