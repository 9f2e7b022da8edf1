//! # Input Selection
//!
//! Narrows the candidate artifacts of a request down to the ones a task can
//! consume. Filtering is pure: it reads descriptors and never touches the
//! filesystem.
//!
//! An artifact is compatible when any non-empty criterion matches it:
//!
//! - `data_types`: exact match on the artifact's data type
//! - `mime_types`: exact match on the artifact's MIME type
//! - `filenames`: glob match (case-insensitive) on the artifact's filename
//!
//! A filter whose criteria are all empty passes every artifact through.

use crate::models::InputArtifact;
use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Declarative compatibility contract of a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityFilter {
    #[serde(default)]
    pub data_types: BTreeSet<String>,
    #[serde(default)]
    pub mime_types: BTreeSet<String>,
    #[serde(default, rename = "filenames")]
    pub filename_globs: BTreeSet<String>,
}

impl CompatibilityFilter {
    /// Filter that accepts every artifact
    pub fn pass_through() -> Self {
        Self::default()
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_types.insert(data_type.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_types.insert(mime_type.into());
        self
    }

    pub fn with_filename_glob(mut self, glob: impl Into<String>) -> Self {
        self.filename_globs.insert(glob.into());
        self
    }

    pub fn is_pass_through(&self) -> bool {
        self.data_types.is_empty() && self.mime_types.is_empty() && self.filename_globs.is_empty()
    }

    /// Reject glob patterns that cannot be compiled
    pub fn validate(&self) -> Result<(), String> {
        for glob in &self.filename_globs {
            Pattern::new(glob).map_err(|e| format!("invalid filename glob '{glob}': {e}"))?;
        }
        Ok(())
    }

    pub fn matches(&self, artifact: &InputArtifact) -> bool {
        if self.is_pass_through() {
            return true;
        }

        let data_type_match = artifact
            .data_type
            .as_ref()
            .is_some_and(|data_type| self.data_types.contains(data_type));

        let mime_type_match = artifact
            .mime_type
            .as_ref()
            .is_some_and(|mime_type| self.mime_types.contains(mime_type));

        let filename_match = artifact.match_name().is_some_and(|name| {
            self.filename_globs.iter().any(|glob| {
                Pattern::new(glob)
                    .map(|pattern| pattern.matches_with(&name, GLOB_OPTIONS))
                    .unwrap_or(false)
            })
        });

        data_type_match || mime_type_match || filename_match
    }

    /// Compatible subset of `candidates`, preserving order
    pub fn select(&self, candidates: &[InputArtifact]) -> Vec<InputArtifact> {
        candidates
            .iter()
            .filter(|artifact| self.matches(artifact))
            .cloned()
            .collect()
    }
}

/// What an invocation does when no input survives selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoInputPolicy {
    /// Return a well-formed result with no outputs and an empty command
    ReturnEmpty,
    /// Abort with `NoCompatibleInput`
    Fail,
}
