//! wire settings, loadable from json

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    events::Key,
    transforms::{snap_to, PxPoint, PxVec, GRID_UNIT},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid unit must be positive, got {0}")]
    GridUnit(i32),
    #[error("wire thickness must not be negative, got {0}")]
    Thickness(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireConfig {
    /// grid spacing raw pointer positions snap to
    pub grid_unit: i32,
    /// rendered size of a wire across its direction
    pub thickness: i32,
    /// tooltip placement relative to the cursor when hovering starts
    pub tooltip_enter_offset: PxVec,
    /// tooltip placement relative to the cursor while it moves over the wire
    pub tooltip_track_offset: PxVec,
    /// keys that delete the hovered wire
    pub delete_keys: Vec<Key>,
}

impl Default for WireConfig {
    fn default() -> Self {
        WireConfig {
            grid_unit: GRID_UNIT,
            thickness: 4,
            tooltip_enter_offset: PxVec::new(-10, 0),
            tooltip_track_offset: PxVec::new(10, 0),
            delete_keys: vec![Key::Backspace],
        }
    }
}

impl WireConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: WireConfig = serde_json::from_str(s)?;
        config.validate()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_json(&s)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.grid_unit <= 0 {
            return Err(ConfigError::GridUnit(self.grid_unit));
        }
        if self.thickness < 0 {
            return Err(ConfigError::Thickness(self.thickness));
        }
        Ok(self)
    }

    pub fn is_delete_key(&self, key: &Key) -> bool {
        self.delete_keys.contains(key)
    }

    /// snap a raw pointer position onto this config's grid
    pub fn snap(&self, x: f64, y: f64) -> PxPoint {
        snap_to(x, y, self.grid_unit)
    }
}
