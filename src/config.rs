//! Raster configuration, stored as JSON

use crate::color::Color;
use crate::display::{DEFAULT_BLOCK_SIZE, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::RasterError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Display mode and presentation settings
///
/// Any field missing from the JSON falls back to its default, so `{}` is a
/// valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_block_size")]
    pub block_size: u32,
    #[serde(default = "default_clear_color")]
    pub clear_color: Color,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_block_size() -> u32 {
    DEFAULT_BLOCK_SIZE
}

fn default_clear_color() -> Color {
    Color::BLACK
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            block_size: DEFAULT_BLOCK_SIZE,
            clear_color: Color::BLACK,
        }
    }
}

impl RasterConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), RasterError> {
        if self.width == 0 || self.height == 0 {
            return Err(RasterError::InvalidConfig(format!(
                "raster size {}x{} has no pixels",
                self.width, self.height
            )));
        }
        if self.block_size == 0 {
            return Err(RasterError::InvalidConfig(
                "block_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, RasterError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RasterError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::info!(
            "loaded raster config from {}: {}x{} block {}",
            path.display(),
            config.width,
            config.height,
            config.block_size
        );
        Ok(config)
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!("saved raster config to {}", path.display());
        Ok(())
    }
}
