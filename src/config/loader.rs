//! Configuration Loader
//!
//! Environment-aware loading: `worker.toml`, then `worker.<environment>.toml`,
//! then `HAYABUSA_WORKER__*` variables. Every file is optional so a bare
//! container runs on defaults.

use super::error::{ConfigResult, ConfigurationError};
use super::WorkerConfig;
use config::{Config, Environment, File};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const ENV_PREFIX: &str = "HAYABUSA_WORKER";

pub struct ConfigManager {
    config: WorkerConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment.
    /// Tests use this to avoid touching process-wide variables.
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            environment = %environment,
            config_directory = %config_directory.display(),
            "Loading worker configuration"
        );

        let config = Self::load_layers(&config_directory, environment)?;
        config.validate()?;

        info!(
            environment = %environment,
            binary_path = %config.tool.binary_path.display(),
            poll_interval_ms = config.tool.poll_interval_ms,
            timeout_seconds = ?config.tool.timeout_seconds,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Wrap an already-built configuration, validating it first
    pub fn from_config(config: WorkerConfig, environment: &str) -> ConfigResult<Arc<ConfigManager>> {
        config.validate()?;
        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory: Self::default_config_directory(),
        }))
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    fn load_layers(config_directory: &Path, environment: &str) -> ConfigResult<WorkerConfig> {
        let base = config_directory.join("worker.toml");
        let overlay = config_directory.join(format!("worker.{environment}.toml"));

        let settings = Config::builder()
            .add_source(File::from(base).required(false))
            .add_source(File::from(overlay).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigurationError::LoadError {
                config_directory: config_directory.to_path_buf(),
                error: e.to_string(),
            })?;

        settings
            .try_deserialize::<WorkerConfig>()
            .map_err(|e| ConfigurationError::DeserializationError {
                error: e.to_string(),
            })
    }

    /// Detect current environment from environment variables
    fn detect_environment() -> String {
        env::var("WORKER_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }

    fn default_config_directory() -> PathBuf {
        env::var("HAYABUSA_WORKER_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"))
    }
}
