//! # Output Packaging
//!
//! Allocates the destination artifact before the tool runs and turns it into
//! the result manifest afterwards.
//!
//! Output files are named `<uuid>.<extension>` under the output root; the
//! display name is cosmetic. Re-running an identical request therefore
//! produces a new artifact rather than reusing the previous one.

use crate::error::{Result, WorkerError};
use crate::execution::ToolInvocation;
use crate::models::{OutputArtifact, TaskResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use uuid::Uuid;

/// Shape of the single artifact an operation produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub extension: String,
    pub data_type: String,
    /// Display name stem used when the request does not supply one
    pub default_display_name: String,
}

impl OutputSpec {
    pub fn new(
        extension: impl Into<String>,
        data_type: impl Into<String>,
        default_display_name: impl Into<String>,
    ) -> Self {
        Self {
            extension: extension.into(),
            data_type: data_type.into(),
            default_display_name: default_display_name.into(),
        }
    }

    /// Pre-allocate the destination under `output_root`. Nothing is written.
    pub fn allocate(&self, output_root: &Path, custom_display_name: Option<&str>) -> OutputArtifact {
        let uuid = Uuid::new_v4().simple().to_string();
        let path = output_root.join(format!("{uuid}.{}", self.extension));
        let stem = custom_display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.default_display_name.as_str());

        OutputArtifact {
            uuid,
            path,
            display_name: normalize_display_name(stem, &self.extension),
            extension: self.extension.clone(),
            data_type: self.data_type.clone(),
        }
    }
}

/// Append `.<extension>` unless the name already ends with it (any case)
pub fn normalize_display_name(name: &str, extension: &str) -> String {
    let suffix = format!(".{extension}");
    let has_suffix = name.len() > suffix.len()
        && name
            .get(name.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(&suffix));

    if has_suffix {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

/// Confirm the tool wrote a non-empty file at the pre-allocated path and
/// wrap it into the manifest
pub fn package(
    output: OutputArtifact,
    invocation: &ToolInvocation,
    workflow_id: Option<String>,
) -> Result<TaskResult> {
    let size = match fs::metadata(&output.path) {
        Ok(metadata) if metadata.is_file() => metadata.len(),
        _ => 0,
    };

    if size == 0 {
        warn!(
            output = %output.path.display(),
            exit_code = invocation.exit_status.code(),
            "External tool produced no output"
        );
        return Err(WorkerError::EmptyOutput { path: output.path });
    }

    debug!(
        output = %output.path.display(),
        display_name = %output.display_name,
        bytes = size,
        "Output artifact collected"
    );

    Ok(TaskResult {
        output_files: vec![output],
        workflow_id,
        command: invocation.command.command_line(),
    })
}
