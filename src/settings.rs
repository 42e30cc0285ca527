//! Run settings
//!
//! Stored as JSON. Every field has a default so a partial file (or none at
//! all) still yields a playable configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FOV, LOOK_SENSITIVITY, MAX_FRAME_STEP};

/// Which level set to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Single floor, win by clearing every enemy
    Classic,
    /// Three-floor mansion, win by rescuing the princess
    #[default]
    Mansion,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Mansion => "Mansion",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "mansion" => Some(Variant::Mansion),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    /// Seed for pickup grant rolls
    pub seed: u64,

    // === View ===
    /// Rays cast per frame (one per screen column)
    pub columns: usize,
    /// Horizontal field of view (radians)
    pub fov: f32,
    /// Radians of yaw per pointer unit
    pub look_sensitivity: f32,

    // === Clock ===
    /// Largest dt a single tick may receive, in frames
    pub max_frame_step: f32,
    /// Frames simulated by the headless host
    pub frames: u32,

    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Mansion,
            seed: 0x5eed,

            columns: 120,
            fov: FOV,
            look_sensitivity: LOOK_SENSITIVITY,

            max_frame_step: MAX_FRAME_STEP,
            frames: 1800,

            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}); using default settings", e, path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
