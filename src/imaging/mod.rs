//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, WebP) |
//! | **Scale** | `resize_exact` + `Triangle` (bilinear) filter |
//! | **Crop** | `crop_imm`, full width, anchored by [`Gravity`] |
//! | **Encode** | `JpegEncoder` at quality / `PngEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: The [`transform`] pipeline combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, Raster};
pub use calculations::{calculate_crop, calculate_scale};
pub use operations::{TransformError, TransformReport, TransformStep, transform};
pub use params::{CropRegion, Dimensions, Gravity, OutputFormat, Quality};
pub use rust_backend::{RustBackend, supported_input_extensions};
