//! Aggregate color statistics for a single image
//!
//! Computes the per-image vegetation-health record from an RGB array and
//! its color-class masks:
//! - arithmetic channel means over all pixels, in floating point
//! - Green Chromatic Coordinate (GCC), the normalized greenness index
//! - per-class pixel counts
//! - disease-class ratios normalized against green pixel count
//!
//! Zero denominators are defined outputs, not errors: a fully black image
//! has GCC 0.0, and an image with no green pixels has all ratios 0.0.
//!
//! Algorithm tag: `algo-gcc-class-ratios`

use crate::color::classify::ColorMasks;
use crate::color::conversion::validate_pixel_array;
use crate::error::{AnalysisError, Result};
use ndarray::{Array2, ArrayView3, Axis};
use serde::{Deserialize, Serialize};

/// Pixel counts for the six color classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub white: u64,
    pub yellow: u64,
    pub brown: u64,
    pub green: u64,
    pub red: u64,
    pub blue: u64,
}

impl ClassCounts {
    /// Combined count of the disease-indicative classes
    pub fn disease_pixels(&self) -> u64 {
        self.white + self.brown + self.yellow
    }
}

/// Disease-class pixel ratios normalized against green pixel count
///
/// All ratios are 0.0 when the image has no green pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassRatios {
    pub white_green: f64,
    pub brown_green: f64,
    pub yellow_green: f64,
}

/// Complete analysis record for one image
///
/// Created once per image by [`MetricsEngine::analyze`]; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Mean red channel value over all pixels
    pub mean_r: f64,
    /// Mean green channel value over all pixels
    pub mean_g: f64,
    /// Mean blue channel value over all pixels
    pub mean_b: f64,
    /// Green Chromatic Coordinate: mean_g / (mean_r + mean_g + mean_b)
    pub gcc: f64,
    /// Per-class pixel counts
    pub counts: ClassCounts,
    /// Disease-class ratios
    pub ratios: ClassRatios,
}

/// Metrics engine computing the per-image analysis record
///
/// Pure and stateless: analyzing the same arrays twice yields identical
/// results.
#[derive(Debug, Clone, Copy)]
pub struct MetricsEngine;

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsEngine {
    /// Create a new metrics engine
    pub fn new() -> Self {
        Self
    }

    /// Compute the analysis record for one image
    ///
    /// # Arguments
    ///
    /// * `rgb` - RGB pixel array of shape (height, width, 3)
    /// * `masks` - color-class masks computed from the same image
    ///
    /// # Errors
    ///
    /// - `EmptyImage` for zero-area input
    /// - `InvalidImageFormat` if the channel dimension is not 3
    /// - `ProcessingError` if mask dimensions do not match the image
    pub fn analyze(&self, rgb: ArrayView3<'_, u8>, masks: &ColorMasks) -> Result<AnalysisResult> {
        validate_pixel_array(&rgb)?;

        let (height, width, _) = rgb.dim();
        if masks.dimensions() != (height, width) {
            return Err(AnalysisError::processing(format!(
                "Mask dimensions {:?} do not match image {}x{}",
                masks.dimensions(),
                width,
                height
            )));
        }

        let pixel_count = (height * width) as f64;
        let mean_r = channel_sum(&rgb, 0) / pixel_count;
        let mean_g = channel_sum(&rgb, 1) / pixel_count;
        let mean_b = channel_sum(&rgb, 2) / pixel_count;

        // A fully black image has a zero channel sum; GCC is defined as 0.0
        // there rather than dividing by zero
        let total = mean_r + mean_g + mean_b;
        let gcc = if total == 0.0 { 0.0 } else { mean_g / total };

        let counts = ClassCounts {
            white: count_true(&masks.white),
            yellow: count_true(&masks.yellow),
            brown: count_true(&masks.brown),
            green: count_true(&masks.green),
            red: count_true(&masks.red),
            blue: count_true(&masks.blue),
        };

        // Zero green pixels: every ratio is defined as 0.0
        let ratios = if counts.green == 0 {
            ClassRatios {
                white_green: 0.0,
                brown_green: 0.0,
                yellow_green: 0.0,
            }
        } else {
            let green = counts.green as f64;
            ClassRatios {
                white_green: counts.white as f64 / green,
                brown_green: counts.brown as f64 / green,
                yellow_green: counts.yellow as f64 / green,
            }
        };

        Ok(AnalysisResult {
            mean_r,
            mean_g,
            mean_b,
            gcc,
            counts,
            ratios,
        })
    }
}

fn channel_sum(rgb: &ArrayView3<'_, u8>, channel: usize) -> f64 {
    rgb.index_axis(Axis(2), channel)
        .fold(0.0, |acc, &value| acc + value as f64)
}

fn count_true(mask: &Array2<bool>) -> u64 {
    mask.iter().filter(|&&set| set).count() as u64
}
