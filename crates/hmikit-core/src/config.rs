//! Editor configuration.

use crate::error::ConfigError;
use crate::tools::DEFAULT_PALETTE_WIDTH;
use crate::variables::Value;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Settings for an editor session. Every field has a default, so an empty
/// JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Window size in pixels; the canvas is everything right of the palette.
    pub canvas_size: Size,
    /// Width of the palette strip.
    pub palette_width: f64,
    /// File loaded by the image tool.
    pub image_path: PathBuf,
    /// Start with the sensor demo widgets.
    pub demo_screen: bool,
    /// Variables written to the store before any widget is created.
    pub variables: BTreeMap<String, Value>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(1200.0, 800.0),
            palette_width: DEFAULT_PALETTE_WIDTH,
            image_path: PathBuf::from("test_image.png"),
            demo_screen: true,
            variables: BTreeMap::new(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
