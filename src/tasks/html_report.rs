//! HTML report: the analyzer's summary report over every input it is given.
//!
//! Inputs are not filtered, and a request with nothing to analyze fails so
//! the orchestrator surfaces it instead of recording an empty report.

use super::{display_name_field, TaskDefinition};
use crate::constants::{data_types, task_names};
use crate::execution::ToolMode;
use crate::packaging::OutputSpec;
use crate::selection::{CompatibilityFilter, NoInputPolicy};

const DEFAULT_DISPLAY_NAME: &str = "Hayabusa_HTML_report";

pub fn definition() -> TaskDefinition {
    TaskDefinition {
        name: task_names::HTML_REPORT.to_string(),
        display_name: "Hayabusa HTML report".to_string(),
        description: "Windows event log triage".to_string(),
        compatible_inputs: CompatibilityFilter::pass_through(),
        config_schema: vec![display_name_field(DEFAULT_DISPLAY_NAME)],
        no_input_policy: NoInputPolicy::Fail,
        mode: ToolMode::HtmlReport,
        output: OutputSpec::new("html", data_types::HTML_REPORT, DEFAULT_DISPLAY_NAME),
    }
}
