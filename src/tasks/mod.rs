//! # Task Definitions
//!
//! The operations this worker offers. A definition is plain data: what the
//! host registers with the orchestrator and what the
//! [`TaskRunner`](crate::worker::TaskRunner) needs to execute it.

pub mod csv_timeline;
pub mod html_report;

use crate::execution::ToolMode;
use crate::packaging::OutputSpec;
use crate::selection::{CompatibilityFilter, NoInputPolicy};
use serde::{Deserialize, Serialize};

/// One user-facing configuration field an operation accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigField {
    pub name: String,
    pub label: String,
    pub description: String,
    #[serde(rename = "type")]
    pub field_type: ConfigFieldType,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigFieldType {
    Text,
    Textarea,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Routing identifier, unique per registry
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub compatible_inputs: CompatibilityFilter,
    pub config_schema: Vec<ConfigField>,
    pub no_input_policy: NoInputPolicy,
    pub mode: ToolMode,
    pub output: OutputSpec,
}

impl TaskDefinition {
    /// Last dotted segment of the identifier, e.g. `csv_timeline`
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// Field shared by both operations
pub(crate) fn display_name_field(default: &str) -> ConfigField {
    ConfigField {
        name: "display_name".to_string(),
        label: "Output file name".to_string(),
        description: format!("Display name for the generated file (default: {default})"),
        field_type: ConfigFieldType::Text,
        required: false,
    }
}

/// Every operation this worker ships with
pub fn builtin_definitions() -> Vec<TaskDefinition> {
    vec![csv_timeline::definition(), html_report::definition()]
}
