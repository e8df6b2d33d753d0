//! Image loading with conversion to pixel arrays
//!
//! Single entry point for decoding leaf/crop photographs into the RGB pixel
//! grid the analysis pipeline consumes.
//!
//! ## Supported Formats
//!
//! Via the `image` crate: JPEG, PNG, GIF, WebP, TIFF, BMP.
//!
//! ## Design
//!
//! All inputs are decoded to 8-bit RGB and returned as an
//! `ndarray::Array3<u8>` of shape (height, width, 3). Alpha channels are
//! discarded during decode; inputs that cannot be decoded at all fail with
//! `InvalidImageFormat`, zero-area inputs with `EmptyImage`.

use crate::error::{AnalysisError, Result};
use image::RgbImage;
use ndarray::Array3;
use std::path::Path;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }
}

/// Load an image from disk as an RGB pixel array
///
/// # Arguments
///
/// * `path` - Path to the image file
///
/// # Returns
///
/// RGB pixel array of shape (height, width, 3), 8-bit channels
///
/// # Errors
///
/// - `ImageLoadError` if the file cannot be opened
/// - `InvalidImageFormat` if the extension is unknown or decoding fails
/// - `EmptyImage` if the decoded image has zero area
///
/// # Example
///
/// ```rust,no_run
/// use leafscan::image_loader::load_image;
/// use std::path::Path;
///
/// let rgb = load_image(Path::new("leaf.jpg"))?;
/// println!("Loaded image: {}x{}", rgb.shape()[1], rgb.shape()[0]);
/// # Ok::<(), leafscan::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<Array3<u8>> {
    use image::ImageReader;

    if ImageFormat::from_extension(path).is_none() {
        return Err(AnalysisError::invalid_format(format!(
            "Unknown image format for file: {}",
            path.display()
        )));
    }

    let reader = ImageReader::open(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let img = reader.decode().map_err(|e| AnalysisError::InvalidImageFormat {
        message: format!("Failed to decode image {}: {}", path.display(), e),
    })?;

    rgb_image_to_array(img.to_rgb8())
}

/// Convert a decoded RGB image buffer to a (height, width, 3) pixel array
pub fn rgb_image_to_array(img: RgbImage) -> Result<Array3<u8>> {
    let (width, height) = img.dimensions();

    if width == 0 || height == 0 {
        return Err(AnalysisError::EmptyImage {
            width: width as usize,
            height: height as usize,
        });
    }

    Array3::from_shape_vec((height as usize, width as usize, 3), img.into_raw())
        .map_err(|e| AnalysisError::processing(format!("Pixel buffer reshape failed: {}", e)))
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &["jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp"]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_extension(Path::new("leaf.jpg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("leaf.JPEG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("leaf.png")),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("leaf.webp")),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_extension(Path::new("leaf.xyz")), None);
        assert_eq!(ImageFormat::from_extension(Path::new("leaf")), None);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("jpg"));
        assert!(is_supported_extension("JPEG"));
        assert!(is_supported_extension("png"));
        assert!(!is_supported_extension("xyz"));
        assert!(!is_supported_extension("doc"));
    }

    #[test]
    fn test_load_unknown_extension() {
        let result = load_image(Path::new("notes.txt"));
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidImageFormat { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image(Path::new("nonexistent_leaf.jpg"));
        assert!(matches!(result, Err(AnalysisError::ImageLoadError { .. })));
    }

    #[test]
    fn test_rgb_image_to_array_layout() {
        // 2x2 image: red, green, blue, white
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 255, 0]));
        img.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        img.put_pixel(1, 1, image::Rgb([255, 255, 255]));

        let array = rgb_image_to_array(img).unwrap();
        assert_eq!(array.shape(), &[2, 2, 3]);

        // Row-major (row, col, channel) indexing
        assert_eq!(array[[0, 0, 0]], 255);
        assert_eq!(array[[0, 1, 1]], 255);
        assert_eq!(array[[1, 0, 2]], 255);
        assert_eq!(array[[1, 1, 0]], 255);
        assert_eq!(array[[1, 1, 1]], 255);
        assert_eq!(array[[1, 1, 2]], 255);
    }

    #[test]
    fn test_rgb_image_to_array_rejects_empty() {
        let img = RgbImage::new(0, 0);
        let result = rgb_image_to_array(img);
        assert!(matches!(result, Err(AnalysisError::EmptyImage { .. })));
    }
}
