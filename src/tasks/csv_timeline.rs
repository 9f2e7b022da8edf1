//! Timeline extraction: `.evtx` inputs in, one CSV timeline out.
//!
//! Requests without event logs are not an error here; the task returns an
//! empty result so a workflow fanning out over mixed evidence keeps going.

use super::{display_name_field, TaskDefinition};
use crate::constants::{data_types, mime_types, task_names};
use crate::execution::ToolMode;
use crate::packaging::OutputSpec;
use crate::selection::{CompatibilityFilter, NoInputPolicy};

const DEFAULT_DISPLAY_NAME: &str = "Hayabusa_CSV_timeline";

pub fn definition() -> TaskDefinition {
    TaskDefinition {
        name: task_names::CSV_TIMELINE.to_string(),
        display_name: "Hayabusa CSV timeline".to_string(),
        description: "Windows event log triage".to_string(),
        compatible_inputs: CompatibilityFilter::default()
            .with_mime_type(mime_types::EVTX)
            .with_filename_glob("*.evtx"),
        config_schema: vec![display_name_field(DEFAULT_DISPLAY_NAME)],
        no_input_policy: NoInputPolicy::ReturnEmpty,
        mode: ToolMode::CsvTimeline,
        output: OutputSpec::new("csv", data_types::CSV_TIMELINE, DEFAULT_DISPLAY_NAME),
    }
}
