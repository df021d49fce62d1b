use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LONG_TEXT_LIMIT: usize = 12;
pub const DEFAULT_TWIST_PROBABILITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u64,
    pub nation_a: String,
    pub nation_b: String,
    /// Texts with more characters than this turn the card Yellow.
    pub long_text_limit: usize,
    pub twist_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            nation_a: "Nation A".to_string(),
            nation_b: "Nation B".to_string(),
            long_text_limit: DEFAULT_LONG_TEXT_LIMIT,
            twist_probability: DEFAULT_TWIST_PROBABILITY,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("twist probability must be within 0.0..=1.0, got {0}")]
    TwistProbability(f64),
    #[error("nation names must not be empty")]
    EmptyNationName,
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.twist_probability) {
            return Err(ConfigError::TwistProbability(self.twist_probability));
        }
        if self.nation_a.trim().is_empty() || self.nation_b.trim().is_empty() {
            return Err(ConfigError::EmptyNationName);
        }
        Ok(())
    }
}
