//! Color conversion and classification module
//!
//! This module handles RGB to HSV conversion on the crate's fixed byte
//! scale and per-pixel threshold classification into color-class masks.

pub mod classify;
pub mod conversion;

pub use classify::{ColorMasks, MaskClassifier};
pub use conversion::ColorConverter;
