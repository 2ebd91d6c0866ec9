//! Configuration module.
//!
//! Handles loading and validating an optional `simple-scale.toml` defaults
//! file, and turns the resolved settings into the [`ScaleConfig`] the
//! transform pipeline runs with.
//!
//! Precedence, lowest to highest: stock defaults → config file → command-line
//! flags. The file is only read when `--config` is given.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! type = "jpg"              # jpg | png
//! quality = 80              # JPEG quality (1-100), ignored for png
//!
//! [scale]
//! # width = 1280            # Target width; omit or 0 for no scaling
//! # height = 720            # Crop to this height after scaling
//! crop = "top"              # top | center | bottom
//!
//! [processing]
//! # max_processes = 4       # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use crate::imaging::{Gravity, OutputFormat, Quality};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything the transform pipeline needs to know about one invocation.
///
/// Built once and shared read-only by every file in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleConfig {
    /// Target width in pixels. `0` disables scaling (and therefore cropping).
    pub output_width: u32,
    /// Crop the scaled image to this height when it is smaller than the
    /// scaled height.
    pub output_height: Option<u32>,
    pub output_format: OutputFormat,
    pub quality: Quality,
    /// Which rows survive a crop.
    pub gravity: Gravity,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            output_width: 0,
            output_height: None,
            output_format: OutputFormat::default(),
            quality: Quality::default(),
            gravity: Gravity::default(),
        }
    }
}

/// Resolved settings, loaded from `simple-scale.toml` and/or the command line.
///
/// All fields have sensible defaults. Config files need only specify the
/// values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Output encoding (format, quality).
    pub output: OutputSettings,
    /// Scaling and cropping.
    pub scale: ScaleSettings,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Settings {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.output.quality.is_valid() {
            return Err(ConfigError::Validation(format!(
                "output.quality must be {}-{}, got {}",
                Quality::MIN,
                Quality::MAX,
                self.output.quality.value()
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The pipeline configuration these settings describe.
    pub fn scale_config(&self) -> ScaleConfig {
        ScaleConfig {
            output_width: self.scale.width.unwrap_or(0),
            output_height: self.scale.height,
            output_format: self.output.format,
            quality: self.output.quality,
            gravity: self.scale.crop,
        }
    }
}

/// Output encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Output format, `"jpg"` or `"png"`.
    #[serde(rename = "type")]
    pub format: OutputFormat,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: Quality,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: Quality::default(),
        }
    }
}

/// Scale and crop settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleSettings {
    /// Target width. `None` or `0` leaves the size alone.
    pub width: Option<u32>,
    /// Height to crop to after scaling.
    pub height: Option<u32>,
    /// Crop anchor.
    pub crop: Gravity,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load settings from a TOML file.
///
/// Missing keys fall back to stock defaults; unknown keys and out-of-range
/// values are errors.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Printed by `--print-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# simple-scale configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override this file.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[output]
# Output format: "jpg" or "png".
type = "jpg"

# JPEG quality (1 = worst, 100 = best). Ignored for png.
quality = 80

# ---------------------------------------------------------------------------
# Scaling and cropping
# ---------------------------------------------------------------------------
[scale]
# Target width in pixels; the height follows the aspect ratio.
# Omit (or set to 0) to keep the original size.
# width = 1280

# After scaling, crop to this height if the image is taller.
# Has no effect without a width.
# height = 720

# Which part of a too-tall image to keep: "top", "center" or "bottom".
crop = "top"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-processing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
