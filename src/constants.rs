//! # Worker Constants
//!
//! Identifiers shared with the orchestrator and defaults for the wrapped tool.

/// Events emitted on the progress channel
pub mod events {
    /// Payload-free liveness signal sent while the tool is running
    pub const TASK_PROGRESS: &str = "task-progress";
}

/// Data-type tags attached to produced artifacts
pub mod data_types {
    pub const CSV_TIMELINE: &str = "openrelik:hayabusa:csv_timeline";
    pub const HTML_REPORT: &str = "openrelik:hayabusa:html_report";
}

/// Registered task identifiers
pub mod task_names {
    pub const CSV_TIMELINE: &str = "openrelik-worker-hayabusa.tasks.csv_timeline";
    pub const HTML_REPORT: &str = "openrelik-worker-hayabusa.tasks.html_report";
}

pub mod mime_types {
    pub const EVTX: &str = "application/x-ms-evtx";
}

/// Tool defaults
pub mod tool {
    pub const DEFAULT_BINARY_PATH: &str = "/hayabusa/hayabusa";
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
    pub const NULL_SINK: &str = "/dev/null";
    pub const TIMELINE_PROFILE: &str = "timesketch-verbose";
}

pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1000;
