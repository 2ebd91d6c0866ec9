//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the four capabilities the transform
//! pipeline relies on: decode, resize, crop, and encode. Each one takes or
//! returns an owned bitmap of the backend's associated [`ImageBackend::Image`]
//! type, so the pipeline can hand ownership from step to step without knowing
//! what a bitmap looks like.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording `MockBackend` in this module.

use super::params::{CropRegion, Dimensions, OutputFormat, Quality};
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unrecognized or corrupt image data: {0}")]
    Decode(String),
    #[error("Invalid target dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// A decoded, in-memory bitmap with known dimensions.
pub trait Raster {
    fn dimensions(&self) -> Dimensions;
}

/// Trait for image processing backends.
///
/// Every operation that produces a bitmap returns a *new* owned value and
/// leaves its input untouched. Callers decide when the input is released.
pub trait ImageBackend: Sync {
    type Image: Raster;

    /// Decode an encoded image (JPEG, PNG, WebP) from memory.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, BackendError>;

    /// Resample to exactly `target` using a smooth (non nearest-neighbor) filter.
    fn resize(&self, image: &Self::Image, target: Dimensions) -> Result<Self::Image, BackendError>;

    /// Extract `region`, which must lie inside the image.
    fn crop(&self, image: &Self::Image, region: CropRegion) -> Result<Self::Image, BackendError>;

    /// Encode into `writer`. `quality` only affects lossy formats.
    fn encode(
        &self,
        image: &Self::Image,
        format: OutputFormat,
        quality: Quality,
        writer: &mut dyn Write,
    ) -> Result<(), BackendError>;
}
