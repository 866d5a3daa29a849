use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::{
    encoder::EncoderOptions, image_data::DEFAULT_COMPRESSION_LEVEL, manifest::Platform,
    scanlines::Validation,
};

/// Settings for regenerating a project's icon set, usually read from a JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Project directory the icon paths are relative to.
    pub root: PathBuf,
    /// Passed to the encoder; anything below the default of 9 trades size for speed.
    pub compression_level: u8,
    pub strict_pixels: bool,
    pub platforms: Vec<Platform>,
    /// Name of the JSON report written under `root`; `None` skips it.
    pub report: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            strict_pixels: true,
            platforms: vec![Platform::Android, Platform::Ios, Platform::Web],
            report: Some(PathBuf::from("icon-report.json")),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse generator config.")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn encoder_options(&self) -> EncoderOptions {
        EncoderOptions {
            compression_level: self.compression_level,
            validation: if self.strict_pixels {
                Validation::Strict
            } else {
                Validation::Off
            },
        }
    }
}
