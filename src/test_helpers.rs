//! Shared test utilities for the simple-scale test suite.
//!
//! Builds small synthetic images in memory or on disk so tests never depend
//! on fixture files.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_file(&tmp.path().join("a.jpg"), &gradient_jpeg(1200, 800));
//! assert_eq!(image_dimensions(&tmp.path().join("a.jpg")), (1200, 800));
//! ```

use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use std::path::Path;

// =========================================================================
// In-memory images
// =========================================================================

/// RGB gradient, different in every pixel.
pub fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Top half pure red, bottom half pure blue.
pub fn two_tone_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |_, y| {
        if y < height / 2 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    })
}

// =========================================================================
// Encoders
// =========================================================================

/// Encode a gradient of the given size as JPEG.
pub fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = gradient_rgb(width, height);
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

pub fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
    out
}

pub fn encode_webp(img: &RgbImage) -> Vec<u8> {
    let mut out = Vec::new();
    image::codecs::webp::WebPEncoder::new_lossless(&mut out)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
    out
}

// =========================================================================
// Filesystem
// =========================================================================

/// Write bytes to `path`, creating parent directories.
pub fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, bytes).unwrap();
}

/// Read back the pixel dimensions of an image file. Panics if it can't be decoded.
pub fn image_dimensions(path: &Path) -> (u32, u32) {
    image::image_dimensions(path)
        .unwrap_or_else(|e| panic!("failed to read dimensions of {}: {e}", path.display()))
}
