//! Configuration handling for symbol-painter
//!
//! Canvas size, brush radius, output directory and the label-switch policy.
//! Everything is read once at start-up from a TOML file; missing keys fall
//! back to the defaults below.

use crate::error::Error;
use crate::types::CanvasSize;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// What to do with unsaved images when a new label is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelSwitchPolicy {
    /// Flush them to the old label's file first.
    #[default]
    Save,
    /// Drop them.
    Discard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainterConfig {
    pub width: u32,
    pub height: u32,
    pub radius: u32,
    pub directory: PathBuf,
    pub on_label_switch: LabelSwitchPolicy,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            radius: 5,
            directory: PathBuf::from("symbols"),
            on_label_switch: LabelSwitchPolicy::Save,
        }
    }
}

impl PainterConfig {
    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("symbol-painter")
        } else {
            PathBuf::from(".config/symbol-painter")
        };

        config_dir.join("config.toml")
    }

    /// Load configuration from the default location.
    pub fn load_from_file() -> Result<Self, Error> {
        Self::load_from_path(&Self::get_config_path())
    }

    /// Load configuration from `path`, writing defaults there if it is missing.
    pub fn load_from_path(path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config: Self = toml::from_str(&content)?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let default_config = Self::default();
                default_config.save_to_path(path)?;
                Ok(default_config)
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Save configuration to `path`
    pub fn save_to_path(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::io(path, e))?;

        Ok(())
    }

    /// Reject sizes no brush stroke could ever be drawn on.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig("canvas width and height must be positive".into()));
        }
        if self.radius == 0 {
            return Err(Error::InvalidConfig("brush radius must be positive".into()));
        }
        // Smallest canvas that fits one disc: 2r+1 wide, 2r+2 tall.
        let r = self.radius as u64;
        if (self.width as u64) < 2 * r + 1 || (self.height as u64) < 2 * r + 2 {
            return Err(Error::InvalidConfig(format!(
                "brush radius {} does not fit a {}x{} canvas",
                self.radius, self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    pub fn brush_radius(&self) -> i32 {
        self.radius as i32
    }
}
