//! Color space conversion utilities
//!
//! Converts RGB pixel arrays to HSV on the crate's fixed byte scale:
//! - H: hue in half-degrees, `floor(degrees / 2)`, range [0, 179]
//! - S, V: scaled to [0, 255]
//!
//! The scale is documented in [`crate::constants::hsv`] and shared with the
//! mask classifier; conversion and thresholding must never mix hue scales.

use crate::constants::hsv;
use crate::error::{AnalysisError, Result};
use ndarray::{Array3, ArrayView3, Axis, Zip};
use palette::{FromColor, Hsv, Srgb};

/// RGB to HSV converter on the fixed byte scale
///
/// Stateless and deterministic: the same input array always yields the same
/// output array.
#[derive(Debug, Clone, Copy)]
pub struct ColorConverter;

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorConverter {
    /// Create a new color converter
    pub fn new() -> Self {
        Self
    }

    /// Convert a single RGB pixel to byte-scaled HSV
    ///
    /// # Arguments
    ///
    /// * `r`, `g`, `b` - RGB values in range [0, 255]
    ///
    /// # Returns
    ///
    /// (H, S, V) with H in [0, 179] and S, V in [0, 255]
    pub fn rgb_to_hsv(&self, r: u8, g: u8, b: u8) -> (u8, u8, u8) {
        let srgb = Srgb::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        );
        let hsv = Hsv::from_color(srgb);

        // palette yields hue in [0, 360) degrees and S, V in [0, 1];
        // flooring the halved hue keeps H inside [0, 179]
        let h = (hsv.hue.into_positive_degrees() / hsv::HUE_DEGREES_PER_UNIT) as u8;
        let s = (hsv.saturation * hsv::SAT_VAL_MAX as f32).round() as u8;
        let v = (hsv.value * hsv::SAT_VAL_MAX as f32).round() as u8;

        (h, s, v)
    }

    /// Convert an RGB pixel array to an HSV pixel array
    ///
    /// Output has identical spatial dimensions to the input. Callers that
    /// already hold an HSV array on the same scale can pass it straight to
    /// the classifier and skip this step.
    ///
    /// # Errors
    ///
    /// - `InvalidImageFormat` if the channel dimension is not 3
    /// - `EmptyImage` if the input has zero area
    pub fn hsv_image(&self, rgb: ArrayView3<'_, u8>) -> Result<Array3<u8>> {
        validate_pixel_array(&rgb)?;

        let mut hsv = Array3::<u8>::zeros(rgb.raw_dim());
        Zip::from(hsv.lanes_mut(Axis(2)))
            .and(rgb.lanes(Axis(2)))
            .for_each(|mut out, px| {
                let (h, s, v) = self.rgb_to_hsv(px[0], px[1], px[2]);
                out[0] = h;
                out[1] = s;
                out[2] = v;
            });

        Ok(hsv)
    }
}

/// Check that an array is a non-empty (height, width, 3) pixel grid
pub(crate) fn validate_pixel_array(array: &ArrayView3<'_, u8>) -> Result<()> {
    let (height, width, channels) = array.dim();

    if channels != 3 {
        return Err(AnalysisError::invalid_format(format!(
            "Expected 3 channels, got {}",
            channels
        )));
    }
    if height == 0 || width == 0 {
        return Err(AnalysisError::EmptyImage { width, height });
    }

    Ok(())
}
