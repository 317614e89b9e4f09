// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Batch extraction configuration.
//!
//! Loaded from TOML; every key is optional and falls back to the defaults
//! below:
//!
//! ```toml
//! dataset = "data/open-eqa-v0.json"
//! scannet_root = "data/raw/scannet"
//! output_directory = "data/frames"
//! rgb_only = false
//! max_num_frames = 600
//! frame_skip = 1
//! color_format = "png"
//! jobs = 1
//! # image_size = { width = 640, height = 480 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::export::{ColorFormat, ExportOptions, ImageSize};

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`ExtractConfig`]
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config value '{key}': {reason}")]
    Invalid {
        /// Offending key
        key: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Settings for extracting every ScanNet scene referenced by the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// EQA dataset JSON
    pub dataset: PathBuf,
    /// ScanNet root holding `scans/` and `scans_test/`
    pub scannet_root: PathBuf,
    /// Frames are written to `<output_directory>/<episode_history>/`
    pub output_directory: PathBuf,
    /// Only extract color frames
    pub rgb_only: bool,
    /// Maximum frames to extract from a scene
    pub max_num_frames: usize,
    /// Export every n-th frame
    pub frame_skip: usize,
    /// Resize exported images
    pub image_size: Option<ImageSize>,
    /// Format of color frames
    pub color_format: ColorFormat,
    /// Scenes extracted concurrently
    pub jobs: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("data/open-eqa-v0.json"),
            scannet_root: PathBuf::from("data/raw/scannet"),
            output_directory: PathBuf::from("data/frames"),
            rgb_only: false,
            max_num_frames: 600,
            frame_skip: 1,
            image_size: None,
            color_format: ColorFormat::Png,
            jobs: 1,
        }
    }
}

impl ExtractConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values no extraction can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_skip == 0 {
            return Err(ConfigError::Invalid {
                key: "frame_skip",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.jobs == 0 {
            return Err(ConfigError::Invalid {
                key: "jobs",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(size) = self.image_size {
            if size.width == 0 || size.height == 0 {
                return Err(ConfigError::Invalid {
                    key: "image_size",
                    reason: format!("{size} has a zero dimension"),
                });
            }
        }
        Ok(())
    }

    /// Export options applied to every scene.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::default()
            .with_frame_skip(self.frame_skip)
            .with_max_frames(Some(self.max_num_frames))
            .with_image_size(self.image_size)
            .with_color_format(self.color_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ExtractConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExtractConfig::default());
        assert_eq!(config.max_num_frames, 600);
        assert_eq!(config.dataset, PathBuf::from("data/open-eqa-v0.json"));
    }

    #[test]
    fn test_overrides() {
        let config = ExtractConfig::from_toml_str(
            r#"
            scannet_root = "/data/scannet"
            rgb_only = true
            max_num_frames = 10
            color_format = "jpeg"
            jobs = 4
            image_size = { width = 320, height = 240 }
            "#,
        )
        .unwrap();
        assert_eq!(config.scannet_root, PathBuf::from("/data/scannet"));
        assert!(config.rgb_only);
        assert_eq!(config.jobs, 4);

        let options = config.export_options();
        assert_eq!(options.max_frames, Some(10));
        assert_eq!(options.color_format, ColorFormat::Jpeg);
        assert_eq!(options.image_size, Some(ImageSize::new(320, 240)));
    }

    #[test]
    fn test_color_format_spellings() {
        for spelling in ["jpg", "jpeg"] {
            let config =
                ExtractConfig::from_toml_str(&format!("color_format = \"{spelling}\"")).unwrap();
            assert_eq!(config.color_format, ColorFormat::Jpeg);
        }
        let config = ExtractConfig::from_toml_str("color_format = \"png\"").unwrap();
        assert_eq!(config.color_format, ColorFormat::Png);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ExtractConfig::from_toml_str("max_frames = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_invalid_values() {
        let err = ExtractConfig::from_toml_str("jobs = 0").unwrap_err();
        assert_eq!(err.to_string(), "invalid config value 'jobs': must be at least 1");
        assert!(ExtractConfig::from_toml_str("frame_skip = 0").is_err());
    }
}
