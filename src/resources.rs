use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mancala_core::engine::config::{ConfigError, EngineConfig};
use mancala_core::logic::board::Side;
use serde::{Deserialize, Serialize};

/// Engine settings for each seat. Missing sides use the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub south: EngineConfig,
    pub north: EngineConfig,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("loading config file {}", path.display()))?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.south.validate()?;
        config.north.validate()?;
        Ok(config)
    }

    #[must_use]
    pub const fn for_side(&self, side: Side) -> &EngineConfig {
        match side {
            Side::South => &self.south,
            Side::North => &self.north,
        }
    }
}
