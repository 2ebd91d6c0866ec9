//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image::ImageReader` with content sniffing |
//! | Resize | `DynamicImage::resize_exact` with the `Triangle` (bilinear) filter, capped by `image::Limits` |
//! | Crop | `DynamicImage::crop_imm`, bounds-checked first |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` at the configured quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (lossless, quality ignored) |

use super::backend::{BackendError, ImageBackend, Raster};
use super::params::{CropRegion, Dimensions, OutputFormat, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, Limits};
use std::io::{Cursor, Write};
use std::sync::LazyLock;

/// Input extensions and the decoder each one needs.
const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of input file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

impl Raster for DynamicImage {
    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }
}

/// Whether a `target`-sized bitmap in `image`'s pixel layout stays within the
/// allocation limit the decoder also applies.
///
/// `resize_exact` allocates the output buffer up front and aborts the process
/// when that fails, so oversized targets have to be rejected beforehand.
fn fits_alloc_limit(image: &DynamicImage, target: Dimensions) -> bool {
    let Some(limit) = Limits::default().max_alloc else {
        return true;
    };
    u64::from(target.width)
        .checked_mul(u64::from(target.height))
        .and_then(|pixels| pixels.checked_mul(u64::from(image.color().bytes_per_pixel())))
        .is_some_and(|bytes| bytes <= limit)
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(BackendError::Io)?;
        let format = reader
            .format()
            .ok_or_else(|| BackendError::Decode("unknown image format".to_string()))?;
        reader
            .decode()
            .map_err(|e| BackendError::Decode(format!("{format:?}: {e}")))
    }

    fn resize(
        &self,
        image: &DynamicImage,
        target: Dimensions,
    ) -> Result<DynamicImage, BackendError> {
        if target.is_degenerate() || !fits_alloc_limit(image, target) {
            return Err(BackendError::InvalidDimensions {
                width: target.width,
                height: target.height,
            });
        }
        Ok(image.resize_exact(target.width, target.height, FilterType::Triangle))
    }

    fn crop(&self, image: &DynamicImage, region: CropRegion) -> Result<DynamicImage, BackendError> {
        let bounds = Raster::dimensions(image);
        // crop_imm silently clamps out-of-range regions, so check first
        if region.dimensions().is_degenerate() || !region.fits_within(bounds) {
            return Err(BackendError::ProcessingFailed(format!(
                "crop {}x{}+{}+{} outside {bounds} image",
                region.width, region.height, region.x, region.y
            )));
        }
        Ok(image.crop_imm(region.x, region.y, region.width, region.height))
    }

    fn encode(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
        writer: &mut dyn Write,
    ) -> Result<(), BackendError> {
        let result = match format {
            OutputFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(writer, quality.value());
                // JPEG carries no alpha and no 16-bit samples
                match image {
                    DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => {
                        image.write_with_encoder(encoder)
                    }
                    other => DynamicImage::ImageRgb8(other.to_rgb8()).write_with_encoder(encoder),
                }
            }
            OutputFormat::Png => image.write_with_encoder(PngEncoder::new(writer)),
        };
        result.map_err(|e| BackendError::ProcessingFailed(format!("{format} encode failed: {e}")))
    }
}
