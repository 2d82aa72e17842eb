use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::camera::CameraConfig;
use self::gallery::GalleryConfig;
use self::genai::GenaiConfig;
use self::network::NetworkConfig;
use self::ocr::OcrConfig;
use self::ui::UiConfig;

pub mod camera;
pub mod gallery;
pub mod genai;
pub mod network;
pub mod ocr;
pub mod profile;
pub mod ui;

pub use profile::{Profile, ProfileStore};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No config directory available on this platform")]
    NoConfigDir,

    #[error("Profile {0} already exists")]
    ProfileExists(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub genai: GenaiConfig,
    pub ocr: OcrConfig,
    pub camera: CameraConfig,
    pub gallery: GalleryConfig,
    pub ui: UiConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var("GLANCE_BASE_URL") {
            self.network.base_url = url;
        }

        if let Ok(value) = env::var("GLANCE_TIMEOUT_SECS") {
            self.network.timeout_seconds =
                value.parse().map_err(|_| ConfigError::InvalidEnv {
                    key: "GLANCE_TIMEOUT_SECS".to_string(),
                    value,
                })?;
        }

        if let Ok(language) = env::var("GLANCE_OCR_LANGUAGE") {
            self.ocr.language = language;
        }

        if let Ok(bin) = env::var("GLANCE_TESSERACT_BIN") {
            self.ocr.tesseract_bin = bin;
        }

        if let Ok(command) = env::var("GLANCE_CAMERA_COMMAND") {
            self.camera.capture_command = split_command(&command);
        }

        if let Ok(command) = env::var("GLANCE_GALLERY_COMMAND") {
            self.gallery.picker_command = split_command(&command);
        }

        Ok(())
    }
}

/// Whitespace split, no quoting support
fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}
