//! The image transform pipeline.
//!
//! [`transform`] takes the bytes of one encoded image and a [`ScaleConfig`]
//! and writes one encoded image:
//!
//! ```text
//! decode ──▶ resize (width > 0) ──▶ crop (height < scaled height) ──▶ encode
//! ```
//!
//! Each step can fail with its own [`TransformError`] variant. The pipeline
//! never panics on bad input and never aborts anything beyond the current
//! file; the caller decides what a failure means for the rest of a batch.
//!
//! ## Ownership
//!
//! Exactly one bitmap is "current" at a time. Every step builds a new bitmap
//! from the current one and then replaces it, which drops the superseded
//! bitmap right away. An early return through `?` drops whatever is live, so
//! a failed crop still releases the resized image it was cropping from.
//!
//! ## Reporting
//!
//! The pipeline does not print. Steps that change the image are returned as
//! [`TransformStep`]s in the [`TransformReport`] and logged at debug level.

use super::backend::{BackendError, ImageBackend, Raster};
use super::calculations::{calculate_crop, calculate_scale};
use super::params::Dimensions;
use crate::config::ScaleConfig;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Failed to decode input image: {0}")]
    Decode(#[source] BackendError),
    #[error("Failed to scale image: {0}")]
    Resize(#[source] BackendError),
    #[error("Failed to crop image: {0}")]
    Crop(#[source] BackendError),
    #[error("Failed to encode image: {0}")]
    Encode(#[source] BackendError),
}

/// A change applied to the image on its way through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStep {
    Scaled { from: Dimensions, to: Dimensions },
    Cropped { from: Dimensions, to: Dimensions },
}

/// What happened to one successfully transformed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
    /// Dimensions of the decoded source.
    pub source: Dimensions,
    /// Steps applied, in order. Empty when the image was only re-encoded.
    pub steps: Vec<TransformStep>,
    /// Dimensions of the encoded output.
    pub output: Dimensions,
}

/// Decode, optionally scale and crop, and encode one image.
///
/// Scaling happens only when `config.output_width > 0`. Cropping happens only
/// after a scale, and only when `config.output_height` is smaller than the
/// scaled height. The encoded result is written to `output`; on failure
/// nothing is written unless the encoder itself failed midway.
pub fn transform<B: ImageBackend>(
    backend: &B,
    config: &ScaleConfig,
    input: &[u8],
    output: &mut dyn Write,
) -> Result<TransformReport, TransformError> {
    let mut current = backend.decode(input).map_err(TransformError::Decode)?;
    let source = current.dimensions();
    let mut steps = Vec::new();

    if config.output_width > 0 {
        let target = calculate_scale(config.output_width, source);
        if target.is_degenerate() {
            return Err(TransformError::Resize(BackendError::InvalidDimensions {
                width: target.width,
                height: target.height,
            }));
        }

        log::debug!("scaling image from {source} to {target}");
        current = backend
            .resize(&current, target)
            .map_err(TransformError::Resize)?;
        let scaled = current.dimensions();
        steps.push(TransformStep::Scaled {
            from: source,
            to: scaled,
        });

        if let Some(region) = calculate_crop(scaled, config.output_height, config.gravity) {
            log::debug!(
                "cropping image from {scaled} to {} at y={}",
                region.dimensions(),
                region.y
            );
            current = backend
                .crop(&current, region)
                .map_err(TransformError::Crop)?;
            steps.push(TransformStep::Cropped {
                from: scaled,
                to: current.dimensions(),
            });
        }
    }

    backend
        .encode(&current, config.output_format, config.quality, output)
        .map_err(TransformError::Encode)?;

    Ok(TransformReport {
        source,
        steps,
        output: current.dimensions(),
    })
}
