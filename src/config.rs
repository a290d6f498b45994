//! Runner configuration
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields a working configuration:
//!
//! ```toml
//! clear_color = [0.2, 0.2, 0.3, 1.0]
//! log_filter = "info"
//! model_path = "assets/models/crate.obj"
//!
//! [window]
//! title = "xr-scenes"
//! width = 1200
//! height = 800
//!
//! [headless]
//! frames = 120
//! step_ms = 16
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "xr-scenes".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessConfig {
    pub frames: u64,
    pub step_ms: u64,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            step_ms: 16,
        }
    }
}

impl HeadlessConfig {
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub window: WindowConfig,
    pub headless: HeadlessConfig,
    pub clear_color: [f32; 4],
    pub log_filter: String,
    pub model_path: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            headless: HeadlessConfig::default(),
            clear_color: [0.2, 0.2, 0.3, 1.0],
            log_filter: "info".to_string(),
            model_path: PathBuf::from("assets/models/crate.obj"),
        }
    }
}

impl RunnerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = RunnerConfig::from_toml_str("").unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.headless.step(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = RunnerConfig::from_toml_str(
            r#"
            model_path = "models/teapot.obj"

            [window]
            width = 640

            [headless]
            frames = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.window.title, "xr-scenes");
        assert_eq!(config.headless.frames, 10);
        assert_eq!(config.headless.step_ms, 16);
        assert_eq!(config.model_path, PathBuf::from("models/teapot.obj"));
    }

    #[test]
    fn test_bad_types_are_parse_errors() {
        let result = RunnerConfig::from_toml_str("[window]\nwidth = \"wide\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = RunnerConfig::load("does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
