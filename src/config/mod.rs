//! # Worker Configuration
//!
//! Layered configuration for the worker process: built-in defaults, optional
//! TOML files under the configuration directory, then environment variables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hayabusa_worker::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let interval = manager.config().tool.poll_interval();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure mirroring `config/worker.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// External tool location and supervision cadence
    pub tool: ToolConfig,

    /// Progress channel settings
    pub events: EventsConfig,

    /// Staging area behavior
    pub staging: StagingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolConfig {
    pub binary_path: PathBuf,
    pub poll_interval_ms: u64,
    /// Upper bound on a single tool run; unbounded when absent
    pub timeout_seconds: Option<u64>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from(constants::tool::DEFAULT_BINARY_PATH),
            poll_interval_ms: constants::tool::DEFAULT_POLL_INTERVAL_MS,
            timeout_seconds: None,
        }
    }
}

impl ToolConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EventsConfig {
    pub channel_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: constants::DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Reject inputs that share a base filename instead of replacing the link
    pub detect_collisions: bool,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            detect_collisions: true,
        }
    }
}

impl WorkerConfig {
    /// Reject values that would make the worker misbehave at runtime
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tool.binary_path.as_os_str().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "tool.binary_path",
                "",
                "binary path must not be empty",
            ));
        }

        if self.tool.poll_interval_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "tool.poll_interval_ms",
                "0",
                "poll interval must be greater than zero",
            ));
        }

        if let Some(0) = self.tool.timeout_seconds {
            return Err(ConfigurationError::invalid_value(
                "tool.timeout_seconds",
                "0",
                "omit the timeout instead of setting it to zero",
            ));
        }

        if self.events.channel_capacity == 0 {
            return Err(ConfigurationError::invalid_value(
                "events.channel_capacity",
                "0",
                "broadcast channel capacity must be greater than zero",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tool_contract() {
        let config = WorkerConfig::default();
        assert_eq!(config.tool.binary_path, PathBuf::from("/hayabusa/hayabusa"));
        assert_eq!(config.tool.poll_interval(), Duration::from_secs(2));
        assert!(config.tool.timeout().is_none());
        assert!(config.staging.detect_collisions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = WorkerConfig::default();
        config.tool.poll_interval_ms = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidValue { ref field, .. } if field == "tool.poll_interval_ms"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = WorkerConfig::default();
        config.tool.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        config.tool.timeout_seconds = Some(3600);
        assert_eq!(config.tool.timeout(), Some(Duration::from_secs(3600)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: WorkerConfig = serde_json::from_value(serde_json::json!({
            "tool": { "binary_path": "/opt/hayabusa/hayabusa" }
        }))
        .unwrap();

        assert_eq!(config.tool.binary_path, PathBuf::from("/opt/hayabusa/hayabusa"));
        assert_eq!(config.tool.poll_interval_ms, 2000);
        assert_eq!(config.events.channel_capacity, 1000);
    }
}
