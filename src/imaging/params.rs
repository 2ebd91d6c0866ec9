//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`operations`](super::operations) pipeline (which
//! decides which steps run) and the [`backend`](super::backend) (which does
//! the actual pixel work). This separation allows swapping backends (e.g. for
//! testing with a mock) without changing pipeline logic.
//!
//! ## Types
//!
//! - [`Dimensions`]: A `width × height` pair in pixels.
//! - [`Quality`]: Lossy encoding quality. Passed through to the encoder untouched.
//! - [`OutputFormat`]: JPEG or PNG, with its file extension.
//! - [`Gravity`]: Which part of a too-tall image survives a crop.
//! - [`CropRegion`]: Full-width rectangle to extract after scaling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, i.e. there is nothing to encode.
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Quality setting for lossy image encoding (1-100).
///
/// Range checks happen where the value enters the program (CLI and config
/// validation). Inside the pipeline the value is handed to the encoder as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(pub u8);

impl Quality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Encoded output format.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum OutputFormat {
    /// Lossy JPEG at the configured quality.
    #[default]
    #[serde(rename = "jpg")]
    #[value(name = "jpg")]
    Jpeg,
    /// Lossless PNG. Quality is ignored.
    #[serde(rename = "png")]
    #[value(name = "png")]
    Png,
}

impl OutputFormat {
    /// File extension (without the dot) used for output files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Vertical anchor of the crop window.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    /// Keep the top rows, discard the bottom.
    #[default]
    Top,
    /// Discard equally from top and bottom.
    Center,
    /// Keep the bottom rows, discard the top.
    Bottom,
}

/// A full-width region to extract from a scaled image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn dimensions(self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Whether the region lies entirely inside an image of the given size.
    pub fn fits_within(self, bounds: Dimensions) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(bounds.width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(bounds.height)
    }
}
