// Front desk configuration: where records go and which rooms exist

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Room, RoomCatalog};
use crate::sink::DEFAULT_SINK_PATH;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub room_type: String,
    pub rate: u32,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl From<&RoomConfig> for Room {
    fn from(cfg: &RoomConfig) -> Self {
        Room::new(cfg.room_type.clone(), cfg.rate, cfg.available)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub sink_path: PathBuf,
    pub rooms: Vec<RoomConfig>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            sink_path: PathBuf::from(DEFAULT_SINK_PATH),
            rooms: vec![
                RoomConfig {
                    room_type: "Standard Room".to_string(),
                    rate: 100,
                    available: true,
                },
                RoomConfig {
                    room_type: "Deluxe Room".to_string(),
                    rate: 150,
                    available: true,
                },
                RoomConfig {
                    room_type: "Suite".to_string(),
                    rate: 200,
                    available: false,
                },
            ],
        }
    }
}

impl DeskConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DeskConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rooms.is_empty() {
            return Err(ConfigError::Invalid("at least one room is required".into()));
        }
        if let Some(pos) = self.rooms.iter().position(|r| r.room_type.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "room {} has an empty room_type",
                pos
            )));
        }
        if self.sink_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("sink_path must not be empty".into()));
        }
        Ok(())
    }

    pub fn catalog(&self) -> RoomCatalog {
        self.rooms.iter().map(Room::from).collect()
    }
}
