//! Configuration for the homeguard simulation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::image::DEFAULT_CONFIDENCE_THRESHOLD;

/// Main configuration for the controller and its simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the file repository keeps its state document
    pub state_path: PathBuf,

    /// Confidence threshold handed to the image classifier
    pub confidence_threshold: f32,

    /// Probability that the simulated classifier reports a threat
    pub detection_probability: f64,

    /// Seconds between simulated sensor triggers
    pub trigger_interval_secs: u64,

    /// Seconds between simulated camera scans
    pub scan_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_path: crate::repository::FileRepository::default_path(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            detection_probability: 0.5,
            trigger_interval_secs: 5,
            scan_interval_secs: 15,
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// defaults when no file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::Io(e.to_string()))?;
            let config: Config =
                serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(&config_path, content).map_err(|e| ConfigError::Io(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("homeguard")
            .join("config.json")
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
}
