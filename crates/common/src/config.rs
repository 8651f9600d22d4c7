//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default frame rate used to interpret the frame field of a timecode.
pub const DEFAULT_TIMECODE_FPS: f64 = 60.0;

/// Playback rate written into every curve document.
pub const DEFAULT_PLAYBACK_FPS: u32 = 60;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Conversion defaults.
    pub conversion: ConversionDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default conversion parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionDefaults {
    /// Frame rate of the capture device's timecode frame field.
    pub timecode_fps: f64,

    /// Playback fps written to the output document.
    pub playback_fps: u32,

    /// Output file used when none is given.
    pub output: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "morphcurves=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for ConversionDefaults {
    fn default() -> Self {
        Self {
            timecode_fps: DEFAULT_TIMECODE_FPS,
            playback_fps: DEFAULT_PLAYBACK_FPS,
            output: PathBuf::from("morph_curves.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, e);
            }
        }
        Self::default()
    }

    /// Save config to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!((config.conversion.timecode_fps - 60.0).abs() < 1e-12);
        assert_eq!(config.conversion.playback_fps, 60);
        assert_eq!(config.conversion.output, PathBuf::from("morph_curves.json"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"conversion":{"timecode_fps":30.0}}"#).unwrap();
        assert!((parsed.conversion.timecode_fps - 30.0).abs() < 1e-12);
        assert_eq!(parsed.conversion.playback_fps, 60);
        assert!(!parsed.logging.json);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let path = std::env::temp_dir().join("morphcurves_no_such_config.json");
        let _ = std::fs::remove_file(&path);
        let config = AppConfig::load_from(&path);
        assert_eq!(config.conversion.playback_fps, 60);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join("morphcurves_test_config")
            .join("config.json");
        let mut config = AppConfig::default();
        config.conversion.timecode_fps = 24.0;
        config.logging.level = "debug".to_string();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert!((loaded.conversion.timecode_fps - 24.0).abs() < 1e-12);
        assert_eq!(loaded.logging.level, "debug");

        std::fs::remove_file(&path).ok();
    }
}
