//! HSV threshold classification into color-class masks
//!
//! Produces six boolean pixel masks (white, yellow, brown, green, red,
//! blue) from an HSV array by elementwise threshold predicates:
//! - each predicate is a conjunction of per-channel inequality tests
//! - red is a disjunction of two hue sub-ranges (wraparound at hue 0)
//! - masks are independent and may overlap; no tie-breaking is applied
//!
//! Algorithm tag: `algo-hsv-threshold-classification`

use crate::color::conversion::validate_pixel_array;
use crate::config::MaskThresholds;
use crate::error::Result;
use ndarray::{Array2, ArrayView3, Axis, Zip};

/// Boolean pixel masks for the six color classes
///
/// Each mask matches the source image's height x width. Masks are not
/// mutually exclusive by construction: the brown and yellow hue bands
/// overlap at the boundary and a pixel may count toward both classes.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMasks {
    pub white: Array2<bool>,
    pub yellow: Array2<bool>,
    pub brown: Array2<bool>,
    pub green: Array2<bool>,
    pub red: Array2<bool>,
    pub blue: Array2<bool>,
}

impl ColorMasks {
    /// Spatial dimensions (height, width) shared by all six masks
    pub fn dimensions(&self) -> (usize, usize) {
        self.white.dim()
    }
}

/// Pixel classifier applying HSV threshold predicates
pub struct MaskClassifier {
    thresholds: MaskThresholds,
}

impl Default for MaskClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskClassifier {
    /// Create a classifier with the fixed default thresholds
    pub fn new() -> Self {
        Self {
            thresholds: MaskThresholds::default(),
        }
    }

    /// Create a classifier with custom thresholds
    pub fn with_thresholds(thresholds: MaskThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in effect
    pub fn thresholds(&self) -> &MaskThresholds {
        &self.thresholds
    }

    /// Compute all six color-class masks for an HSV array
    ///
    /// The input must be on the crate's fixed HSV byte scale (H in [0,179],
    /// S and V in [0,255]); no masking of invalid or transparent pixels is
    /// performed.
    ///
    /// # Errors
    ///
    /// - `InvalidImageFormat` if the channel dimension is not 3
    /// - `EmptyImage` if the input has zero area
    pub fn classify(&self, hsv: ArrayView3<'_, u8>) -> Result<ColorMasks> {
        validate_pixel_array(&hsv)?;

        let t = &self.thresholds;
        Ok(ColorMasks {
            white: mask_where(hsv, |_, s, v| s < t.white.sat_below && v > t.white.val_above),
            yellow: mask_where(hsv, |h, s, v| {
                h >= t.yellow.hue_min
                    && h <= t.yellow.hue_max
                    && s >= t.yellow.sat_min
                    && v >= t.yellow.val_min
            }),
            brown: mask_where(hsv, |h, s, v| {
                h >= t.brown.hue_min
                    && h <= t.brown.hue_max
                    && s >= t.brown.sat_min
                    && v >= t.brown.val_min
                    && v <= t.brown.val_max
            }),
            green: mask_where(hsv, |h, s, v| {
                h >= t.green.hue_min
                    && h <= t.green.hue_max
                    && s >= t.green.sat_min
                    && v >= t.green.val_min
            }),
            red: mask_where(hsv, |h, s, v| {
                (h <= t.red.hue_low_max || h >= t.red.hue_high_min)
                    && s >= t.red.sat_min
                    && v >= t.red.val_min
            }),
            blue: mask_where(hsv, |h, s, v| {
                h >= t.blue.hue_min
                    && h <= t.blue.hue_max
                    && s >= t.blue.sat_min
                    && v >= t.blue.val_min
            }),
        })
    }
}

/// Evaluate a per-pixel HSV predicate elementwise into a boolean mask
fn mask_where<F>(hsv: ArrayView3<'_, u8>, predicate: F) -> Array2<bool>
where
    F: Fn(u8, u8, u8) -> bool,
{
    Zip::from(hsv.lanes(Axis(2))).map_collect(|px| predicate(px[0], px[1], px[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorConverter;
    use ndarray::Array3;

    fn solid_hsv(height: usize, width: usize, hsv: [u8; 3]) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 3), |(_, _, c)| hsv[c])
    }

    fn count(mask: &Array2<bool>) -> usize {
        mask.iter().filter(|&&m| m).count()
    }

    #[test]
    fn test_classify_pure_green_image() {
        let classifier = MaskClassifier::new();
        // Pure green RGB (0,255,0) -> H=60, S=255, V=255
        let hsv = solid_hsv(3, 3, [60, 255, 255]);

        let masks = classifier.classify(hsv.view()).unwrap();
        assert_eq!(count(&masks.green), 9);
        assert_eq!(count(&masks.white), 0);
        assert_eq!(count(&masks.yellow), 0);
        assert_eq!(count(&masks.brown), 0);
        assert_eq!(count(&masks.red), 0);
        assert_eq!(count(&masks.blue), 0);
    }

    #[test]
    fn test_classify_pure_white_image() {
        let classifier = MaskClassifier::new();
        let hsv = solid_hsv(2, 4, [0, 0, 255]);

        let masks = classifier.classify(hsv.view()).unwrap();
        assert_eq!(count(&masks.white), 8);
        assert_eq!(count(&masks.green), 0);
    }

    #[test]
    fn test_white_bounds_are_strict() {
        let classifier = MaskClassifier::new();

        // S=30 fails S<30, V=200 fails V>200
        let at_bounds = solid_hsv(1, 1, [0, 30, 200]);
        let masks = classifier.classify(at_bounds.view()).unwrap();
        assert_eq!(count(&masks.white), 0);

        let inside = solid_hsv(1, 1, [0, 29, 201]);
        let masks = classifier.classify(inside.view()).unwrap();
        assert_eq!(count(&masks.white), 1);
    }

    #[test]
    fn test_red_wraparound_bands() {
        let classifier = MaskClassifier::new();

        // Low band: deep red around hue 0
        let low = solid_hsv(1, 1, [3, 200, 150]);
        assert_eq!(count(&classifier.classify(low.view()).unwrap().red), 1);

        // High band: magenta-leaning red near the top of the hue scale
        let high = solid_hsv(1, 1, [170, 200, 150]);
        assert_eq!(count(&classifier.classify(high.view()).unwrap().red), 1);

        // Between the bands: not red
        let mid = solid_hsv(1, 1, [90, 200, 150]);
        assert_eq!(count(&classifier.classify(mid.view()).unwrap().red), 0);
    }

    #[test]
    fn test_brown_yellow_boundary_overlap() {
        let classifier = MaskClassifier::new();

        // H=22 sits inside both the brown band [10,25] and the yellow band
        // [20,35]; with S and V satisfying both, the pixel counts twice
        let hsv = solid_hsv(1, 1, [22, 150, 120]);
        let masks = classifier.classify(hsv.view()).unwrap();

        assert_eq!(count(&masks.brown), 1);
        assert_eq!(count(&masks.yellow), 1);
    }

    #[test]
    fn test_brown_value_ceiling() {
        let classifier = MaskClassifier::new();

        // Bright pixels in the brown hue band exceed the value cap
        let bright = solid_hsv(1, 1, [15, 200, 181]);
        let masks = classifier.classify(bright.view()).unwrap();
        assert_eq!(count(&masks.brown), 0);

        let dim = solid_hsv(1, 1, [15, 200, 180]);
        let masks = classifier.classify(dim.view()).unwrap();
        assert_eq!(count(&masks.brown), 1);
    }

    #[test]
    fn test_widened_band_never_loses_pixels() {
        // Monotonicity: widening a threshold range never decreases the count
        let rgb = Array3::from_shape_fn((16, 16, 3), |(y, x, c)| {
            ((y * 37 + x * 11 + c * 59) % 256) as u8
        });
        let hsv = ColorConverter::new().hsv_image(rgb.view()).unwrap();

        let narrow = MaskClassifier::new();
        let mut widened_thresholds = MaskThresholds::default();
        widened_thresholds.green.hue_min = 30;
        widened_thresholds.green.hue_max = 90;
        widened_thresholds.green.sat_min = 40;
        let wide = MaskClassifier::with_thresholds(widened_thresholds);

        let narrow_count = count(&narrow.classify(hsv.view()).unwrap().green);
        let wide_count = count(&wide.classify(hsv.view()).unwrap().green);
        assert!(wide_count >= narrow_count);
    }

    #[test]
    fn test_masks_match_image_dimensions() {
        let classifier = MaskClassifier::new();
        let hsv = solid_hsv(5, 7, [60, 255, 255]);

        let masks = classifier.classify(hsv.view()).unwrap();
        assert_eq!(masks.dimensions(), (5, 7));
        assert_eq!(masks.red.dim(), (5, 7));
        assert_eq!(masks.blue.dim(), (5, 7));
    }

    #[test]
    fn test_classify_rejects_empty() {
        let classifier = MaskClassifier::new();
        let hsv = Array3::<u8>::zeros((0, 4, 3));

        assert!(classifier.classify(hsv.view()).is_err());
    }
}
