//! # Leafscan
//!
//! A Rust crate for computing vegetation-health indicators from leaf and
//! crop photographs.
//!
//! This library provides reproducible numeric proxies for disease severity
//! and chlorophyll content by:
//! - Converting photographs to HSV on a single fixed byte scale
//! - Classifying pixels into diagnostic color classes via threshold masks
//! - Computing the Green Chromatic Coordinate (GCC) and per-class ratios
//! - Aggregating batches into an ordered, export-ready summary table
//!
//! ## Example
//!
//! ```rust,no_run
//! use leafscan::analyze_image;
//! use std::path::Path;
//!
//! let result = analyze_image(Path::new("leaf.jpg"))?;
//! println!("GCC: {:.4}, green pixels: {}", result.gcc, result.counts.green);
//! # Ok::<(), leafscan::AnalysisError>(())
//! ```

use ndarray::ArrayView3;
use std::path::Path;

pub mod batch;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod metrics;

pub use batch::{BatchAggregator, BatchSummary, RowMetrics, RowOutcome, SummaryRow};
pub use color::{ColorConverter, ColorMasks, MaskClassifier};
pub use config::{BatchConfig, FailurePolicy, MaskThresholds};
pub use error::{AnalysisError, Result};
pub use metrics::{AnalysisResult, ClassCounts, ClassRatios, MetricsEngine};

/// Analyze a leaf/crop photograph from an image file
///
/// This is the main single-image entry point: it decodes the file to an RGB
/// pixel array and runs the full conversion -> classification -> metrics
/// pipeline with the default thresholds.
///
/// # Arguments
///
/// * `image_path` - Path to the image file
///
/// # Returns
///
/// An `AnalysisResult` with channel means, GCC, per-class pixel counts and
/// disease-class ratios
///
/// # Errors
///
/// Returns `AnalysisError` if:
/// - The file cannot be opened or decoded as a 3-channel color image
/// - The decoded image has zero area
pub fn analyze_image(image_path: &Path) -> Result<AnalysisResult> {
    let rgb = image_loader::load_image(image_path)?;
    analyze_rgb(rgb.view())
}

/// Analyze an in-memory RGB pixel array of shape (height, width, 3)
///
/// Used directly by callers that decode images themselves (or synthesize
/// them); [`analyze_image`] is a thin loader wrapper around this.
pub fn analyze_rgb(rgb: ArrayView3<'_, u8>) -> Result<AnalysisResult> {
    let hsv = ColorConverter::new().hsv_image(rgb)?;
    let masks = MaskClassifier::new().classify(hsv.view())?;
    MetricsEngine::new().analyze(rgb, &masks)
}
