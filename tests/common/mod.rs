//! Shared fixtures for the worker integration tests

#![allow(dead_code)] // Each test binary uses a different subset

pub mod fake_tool;
pub mod strategies;

use hayabusa_worker::config::WorkerConfig;
use hayabusa_worker::models::InputArtifact;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration pointing at `binary` with a fast poll cadence
pub fn test_config(binary: &Path) -> WorkerConfig {
    let mut config = WorkerConfig::default();
    config.tool.binary_path = binary.to_path_buf();
    config.tool.poll_interval_ms = 50;
    config
}

/// Write an evidence file and describe it as an input artifact
pub fn evidence(dir: &Path, name: &str) -> InputArtifact {
    let path = dir.join(name);
    fs::write(&path, format!("evtx:{name}")).unwrap();
    InputArtifact::new(path)
}

/// Names of the entries directly under `dir`, sorted
pub fn entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    entries.sort();
    entries
}
