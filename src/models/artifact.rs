//! Artifact descriptors.
//!
//! Input artifacts are owned by the orchestrator and never mutated or removed
//! here. Output artifacts are allocated before the tool runs and point at the
//! file the tool is told to write.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Externally owned file reference handed to an invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputArtifact {
    pub path: PathBuf,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Name shown to users; falls back to the base name of `path`
    #[serde(default, alias = "display_name")]
    pub filename: Option<String>,
}

impl InputArtifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data_type: None,
            mime_type: None,
            filename: None,
        }
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Base name of the file on disk, used as the link name when staging
    pub fn base_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }

    /// Name matched against filename globs
    pub fn match_name(&self) -> Option<String> {
        self.filename
            .clone()
            .or_else(|| self.base_name().map(|name| name.to_string_lossy().into_owned()))
    }
}

/// Destination file pre-allocated for the tool to write into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputArtifact {
    pub uuid: String,
    pub path: PathBuf,
    pub display_name: String,
    pub extension: String,
    pub data_type: String,
}

impl OutputArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Outputs of a piped upstream task become inputs of the next one
impl From<OutputArtifact> for InputArtifact {
    fn from(output: OutputArtifact) -> Self {
        InputArtifact {
            path: output.path,
            data_type: Some(output.data_type),
            mime_type: None,
            filename: Some(output.display_name),
        }
    }
}
