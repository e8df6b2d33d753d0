//! Batch analysis over ordered image sequences
//!
//! Runs the conversion -> classification -> metrics pipeline over a list of
//! (identifier, image) inputs and collects one summary row per input, in
//! input order. Per-item failures follow the configured [`FailurePolicy`]:
//! the default records a distinct error row and continues, preserving the
//! 1:1 correspondence between inputs and summary rows.
//!
//! Items are independent and pure, so the parallel runners fan work out on
//! a thread pool and merge rows back in input-index order; sequential and
//! parallel runs produce identical summaries.

use crate::color::{ColorConverter, MaskClassifier};
use crate::config::{BatchConfig, FailurePolicy};
use crate::constants::output;
use crate::error::{AnalysisError, Result};
use crate::image_loader;
use crate::metrics::{AnalysisResult, MetricsEngine};
use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed column order for tabular export
pub const CSV_HEADER: &str = "identifier,gcc,white_green_ratio,brown_green_ratio,\
yellow_green_ratio,green_count,red_count,blue_count,disease_pixels";

/// Derived per-image summary values, rounded for tabular display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowMetrics {
    pub gcc: f64,
    pub white_green_ratio: f64,
    pub brown_green_ratio: f64,
    pub yellow_green_ratio: f64,
    pub green_count: u64,
    pub red_count: u64,
    pub blue_count: u64,
    /// white + brown + yellow pixel count
    pub disease_pixels: u64,
}

impl RowMetrics {
    /// Derive the summary values from a full analysis record
    pub fn from_analysis(result: &AnalysisResult) -> Self {
        Self {
            gcc: round_to(result.gcc, output::SUMMARY_DECIMALS),
            white_green_ratio: round_to(result.ratios.white_green, output::SUMMARY_DECIMALS),
            brown_green_ratio: round_to(result.ratios.brown_green, output::SUMMARY_DECIMALS),
            yellow_green_ratio: round_to(result.ratios.yellow_green, output::SUMMARY_DECIMALS),
            green_count: result.counts.green,
            red_count: result.counts.red,
            blue_count: result.counts.blue,
            disease_pixels: result.counts.disease_pixels(),
        }
    }
}

/// Outcome of one batch item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowOutcome {
    /// Analysis succeeded
    Analyzed(RowMetrics),
    /// Analysis failed; the row keeps the item's place in the summary
    Failed { reason: String },
}

/// One row of the batch summary, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub identifier: String,
    pub outcome: RowOutcome,
}

impl SummaryRow {
    /// Build a row for a successfully analyzed image
    pub fn analyzed(identifier: impl Into<String>, result: &AnalysisResult) -> Self {
        Self {
            identifier: identifier.into(),
            outcome: RowOutcome::Analyzed(RowMetrics::from_analysis(result)),
        }
    }

    /// Build an error-marker row for a failed item
    pub fn failed(identifier: impl Into<String>, error: &AnalysisError) -> Self {
        Self {
            identifier: identifier.into(),
            outcome: RowOutcome::Failed {
                reason: error.to_string(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, RowOutcome::Failed { .. })
    }
}

/// Ordered, append-only collection of batch summary rows
///
/// Grows by one row per processed input; insertion order is input order.
/// Created empty at the start of a batch run and discarded with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    rows: Vec<SummaryRow>,
}

impl BatchSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row (input order is caller responsibility)
    pub fn push(&mut self, row: SummaryRow) {
        self.rows.push(row);
    }

    /// All rows, in input order
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of error-marker rows
    pub fn failed_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_failed()).count()
    }

    /// Render the summary as CSV with the fixed column order
    ///
    /// Failed items render in place as an `ERROR:` marker in the gcc column
    /// with the remaining fields empty, so exports keep one row per input.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(CSV_HEADER);
        out.push('\n');

        let decimals = output::SUMMARY_DECIMALS as usize;
        for row in &self.rows {
            match &row.outcome {
                RowOutcome::Analyzed(m) => {
                    out.push_str(&format!(
                        "{},{:.prec$},{:.prec$},{:.prec$},{:.prec$},{},{},{},{}\n",
                        csv_field(&row.identifier),
                        m.gcc,
                        m.white_green_ratio,
                        m.brown_green_ratio,
                        m.yellow_green_ratio,
                        m.green_count,
                        m.red_count,
                        m.blue_count,
                        m.disease_pixels,
                        prec = decimals,
                    ));
                }
                RowOutcome::Failed { reason } => {
                    out.push_str(&format!(
                        "{},{},,,,,,,\n",
                        csv_field(&row.identifier),
                        csv_field(&format!("ERROR: {}", reason)),
                    ));
                }
            }
        }

        out
    }
}

/// Batch aggregator running the full per-image pipeline
pub struct BatchAggregator {
    converter: ColorConverter,
    classifier: MaskClassifier,
    engine: MetricsEngine,
    policy: FailurePolicy,
    summary: BatchSummary,
}

impl Default for BatchAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchAggregator {
    /// Create an aggregator with default thresholds and skip-and-record policy
    pub fn new() -> Self {
        Self {
            converter: ColorConverter::new(),
            classifier: MaskClassifier::new(),
            engine: MetricsEngine::new(),
            policy: FailurePolicy::default(),
            summary: BatchSummary::new(),
        }
    }

    /// Create an aggregator from a batch configuration
    pub fn with_config(config: &BatchConfig) -> Self {
        Self {
            converter: ColorConverter::new(),
            classifier: MaskClassifier::with_thresholds(config.thresholds.clone()),
            engine: MetricsEngine::new(),
            policy: config.failure_policy,
            summary: BatchSummary::new(),
        }
    }

    /// Failure policy in effect
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Analyze one in-memory image and append its summary row
    ///
    /// # Errors
    ///
    /// Under `FailurePolicy::Abort`, a failed item is returned as an error
    /// and no row is appended; under the default skip-and-record policy this
    /// method only fails if the failure cannot be recorded (never, today).
    pub fn process_image(&mut self, identifier: &str, rgb: ArrayView3<'_, u8>) -> Result<()> {
        let row = self.row_for_image(identifier, rgb)?;
        self.summary.push(row);
        Ok(())
    }

    /// Load one image file and append its summary row
    pub fn process_path(&mut self, path: &Path) -> Result<()> {
        let row = self.row_for_path(path)?;
        self.summary.push(row);
        Ok(())
    }

    /// Process a list of image files in order
    pub fn run_paths(&mut self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            self.process_path(path)?;
        }
        Ok(())
    }

    /// Process a list of image files on a thread pool
    ///
    /// Rows are merged back in input-index order; the resulting summary is
    /// identical to a sequential run over the same paths.
    pub fn run_paths_parallel(&mut self, paths: &[PathBuf]) -> Result<()> {
        let rows: Vec<Result<SummaryRow>> =
            paths.par_iter().map(|path| self.row_for_path(path)).collect();
        for row in rows {
            self.summary.push(row?);
        }
        Ok(())
    }

    /// Process in-memory (identifier, image) pairs on a thread pool
    pub fn run_images_parallel(&mut self, inputs: &[(String, Array3<u8>)]) -> Result<()> {
        let rows: Vec<Result<SummaryRow>> = inputs
            .par_iter()
            .map(|(identifier, rgb)| self.row_for_image(identifier, rgb.view()))
            .collect();
        for row in rows {
            self.summary.push(row?);
        }
        Ok(())
    }

    /// Summary accumulated so far
    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    /// Consume the aggregator, returning the accumulated summary
    pub fn finish(self) -> BatchSummary {
        self.summary
    }

    fn row_for_image(&self, identifier: &str, rgb: ArrayView3<'_, u8>) -> Result<SummaryRow> {
        match self.analyze_one(rgb) {
            Ok(result) => Ok(SummaryRow::analyzed(identifier, &result)),
            Err(error) => self.failure_row(identifier, error),
        }
    }

    fn row_for_path(&self, path: &Path) -> Result<SummaryRow> {
        let identifier = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown")
            .to_string();

        match image_loader::load_image(path).and_then(|rgb| self.analyze_one(rgb.view())) {
            Ok(result) => Ok(SummaryRow::analyzed(identifier, &result)),
            Err(error) => self.failure_row(&identifier, error),
        }
    }

    fn failure_row(&self, identifier: &str, error: AnalysisError) -> Result<SummaryRow> {
        match self.policy {
            FailurePolicy::SkipAndRecord => Ok(SummaryRow::failed(identifier, &error)),
            FailurePolicy::Abort => Err(error),
        }
    }

    fn analyze_one(&self, rgb: ArrayView3<'_, u8>) -> Result<AnalysisResult> {
        let hsv = self.converter.hsv_image(rgb)?;
        let masks = self.classifier.classify(hsv.view())?;
        self.engine.analyze(rgb, &masks)
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
