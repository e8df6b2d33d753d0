//! Configuration structures for the leafscan analysis pipeline.
//!
//! This module defines the tunable parameters for batch analysis: input and
//! output locations, the per-item failure policy, and the HSV classification
//! thresholds.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed
//! programmatically:
//!
//! ```no_run
//! use leafscan::BatchConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = BatchConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = BatchConfig::default();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::constants::classes;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Batch analysis configuration.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Input directory or file path
    pub input_path: PathBuf,

    /// Output directory for the summary CSV
    pub output_path: PathBuf,

    /// Per-item failure handling
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Process batch items on a thread pool (output order is unaffected)
    #[serde(default)]
    pub parallel: bool,

    /// HSV classification thresholds
    #[serde(default)]
    pub thresholds: MaskThresholds,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("photos"),
            output_path: PathBuf::from("reports"),
            failure_policy: FailurePolicy::default(),
            parallel: false,
            thresholds: MaskThresholds::default(),
        }
    }
}

impl BatchConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// How the batch aggregator handles a failed item.
///
/// This is a product decision rather than an inferred contract: the default
/// keeps the batch running and records a distinct error row so every input
/// keeps its place in the summary; `Abort` stops at the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Record an error row for the failed item and continue
    #[default]
    SkipAndRecord,
    /// Stop the batch at the first failed item
    Abort,
}

/// HSV classification thresholds for all six color classes.
///
/// Defaults are the fixed values in [`crate::constants::classes`]; overriding
/// them (e.g. from a JSON config) widens or narrows individual bands without
/// touching code. All values are on the crate's fixed HSV byte scale
/// (H in [0,179], S and V in [0,255]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskThresholds {
    pub white: WhiteThresholds,
    pub yellow: HueBandThresholds,
    pub brown: BrownThresholds,
    pub green: HueBandThresholds,
    pub blue: HueBandThresholds,
    pub red: RedThresholds,
}

impl Default for MaskThresholds {
    fn default() -> Self {
        Self {
            white: WhiteThresholds {
                sat_below: classes::white::SAT_BELOW,
                val_above: classes::white::VAL_ABOVE,
            },
            yellow: HueBandThresholds {
                hue_min: classes::yellow::HUE_MIN,
                hue_max: classes::yellow::HUE_MAX,
                sat_min: classes::yellow::SAT_MIN,
                val_min: classes::yellow::VAL_MIN,
            },
            brown: BrownThresholds {
                hue_min: classes::brown::HUE_MIN,
                hue_max: classes::brown::HUE_MAX,
                sat_min: classes::brown::SAT_MIN,
                val_min: classes::brown::VAL_MIN,
                val_max: classes::brown::VAL_MAX,
            },
            green: HueBandThresholds {
                hue_min: classes::green::HUE_MIN,
                hue_max: classes::green::HUE_MAX,
                sat_min: classes::green::SAT_MIN,
                val_min: classes::green::VAL_MIN,
            },
            blue: HueBandThresholds {
                hue_min: classes::blue::HUE_MIN,
                hue_max: classes::blue::HUE_MAX,
                sat_min: classes::blue::SAT_MIN,
                val_min: classes::blue::VAL_MIN,
            },
            red: RedThresholds {
                hue_low_max: classes::red::HUE_LOW_MAX,
                hue_high_min: classes::red::HUE_HIGH_MIN,
                sat_min: classes::red::SAT_MIN,
                val_min: classes::red::VAL_MIN,
            },
        }
    }
}

/// White class: desaturated, bright pixels (strict inequalities)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhiteThresholds {
    /// Saturation must be strictly below this value
    pub sat_below: u8,
    /// Value must be strictly above this value
    pub val_above: u8,
}

/// A contiguous hue band with saturation/value floors (inclusive bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HueBandThresholds {
    pub hue_min: u8,
    pub hue_max: u8,
    pub sat_min: u8,
    pub val_min: u8,
}

/// Brown class: hue band with a value ceiling in addition to the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrownThresholds {
    pub hue_min: u8,
    pub hue_max: u8,
    pub sat_min: u8,
    pub val_min: u8,
    pub val_max: u8,
}

/// Red class: two hue sub-ranges to handle hue wraparound at 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedThresholds {
    /// Low band: hue in [0, hue_low_max]
    pub hue_low_max: u8,
    /// High band: hue in [hue_high_min, 179]
    pub hue_high_min: u8,
    pub sat_min: u8,
    pub val_min: u8,
}
