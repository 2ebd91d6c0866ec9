//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{CropRegion, Dimensions, Gravity};

/// Calculate output dimensions for scaling to a target width.
///
/// The height keeps the source aspect ratio and is rounded half away from
/// zero (`f64::round`), so an exact `.5` always rounds up.
///
/// `source.width` must be non-zero. Every successfully decoded image satisfies
/// this.
///
/// # Examples
/// ```
/// # use simple_scale::imaging::{Dimensions, calculate_scale};
/// // 1000x500 scaled to width 250 → 250x125
/// assert_eq!(calculate_scale(250, Dimensions::new(1000, 500)), Dimensions::new(250, 125));
///
/// // 2x1 scaled to width 5 → height 2.5 rounds to 3
/// assert_eq!(calculate_scale(5, Dimensions::new(2, 1)), Dimensions::new(5, 3));
/// ```
pub fn calculate_scale(output_width: u32, source: Dimensions) -> Dimensions {
    let height =
        (output_width as f64 * source.height as f64 / source.width as f64).round() as u32;
    Dimensions::new(output_width, height)
}

/// Calculate the region to keep when cropping a scaled image to a height.
///
/// Returns `None` when no crop should happen: the height is absent, zero, or
/// not smaller than the scaled height. Cropping to an equal or larger height
/// is a no-op, not an error.
///
/// The region always spans the full width. Its vertical offset depends on
/// `gravity`; [`Gravity::Center`] uses integer division, so odd leftovers
/// favour the top.
pub fn calculate_crop(
    scaled: Dimensions,
    output_height: Option<u32>,
    gravity: Gravity,
) -> Option<CropRegion> {
    let crop_height = output_height.filter(|&h| h > 0 && h < scaled.height)?;

    let y = match gravity {
        Gravity::Top => 0,
        Gravity::Center => (scaled.height - crop_height) / 2,
        Gravity::Bottom => scaled.height - crop_height,
    };

    Some(CropRegion {
        x: 0,
        y,
        width: scaled.width,
        height: crop_height,
    })
}
