//! Error types for the leafscan library

use thiserror::Error;

/// Result type alias for leafscan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for leaf color analysis operations
///
/// All variants describe per-image failures. Zero-denominator situations
/// (all-black image, zero green pixels) are defined numeric outputs of the
/// metrics engine, not errors.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image file could not be opened or read
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input could not be decoded as a 3-channel color image
    #[error("Invalid image format: {message}")]
    InvalidImageFormat { message: String },

    /// Input has zero area (0x0 or a zero-length dimension)
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    /// Generic processing error
    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-format error
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidImageFormat {
            message: message.into(),
        }
    }

    /// Create a processing error
    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file path and try again.".to_string()
            }
            AnalysisError::InvalidImageFormat { .. } => {
                "Could not decode the file as a color image. Please supply a JPEG or PNG photo."
                    .to_string()
            }
            AnalysisError::EmptyImage { .. } => {
                "The image has no pixels. Please supply a non-empty photo.".to_string()
            }
            _ => "Image analysis failed. Please try with a different image.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::EmptyImage {
            width: 0,
            height: 0,
        };
        assert_eq!(err.to_string(), "Empty image: 0x0");

        let err = AnalysisError::invalid_format("grayscale input");
        assert_eq!(err.to_string(), "Invalid image format: grayscale input");
    }

    #[test]
    fn test_image_load_preserves_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AnalysisError::image_load("could not open photo.jpg", io_err);

        assert!(err.to_string().contains("photo.jpg"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_user_messages_are_nonempty() {
        let errors = [
            AnalysisError::invalid_format("x"),
            AnalysisError::EmptyImage {
                width: 0,
                height: 3,
            },
            AnalysisError::processing("x"),
        ];
        for err in &errors {
            assert!(!err.user_message().is_empty());
        }
    }
}
