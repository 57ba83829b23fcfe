//! Configuration errors
//!
//! The simulation itself has no failure path: absent hands are normal input.
//! Everything that can go wrong is caught when settings are loaded.

use thiserror::Error;

/// Reasons a set of tuning values is rejected at startup.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A knob that must be strictly positive is zero or negative.
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    /// A float knob is infinite or NaN.
    #[error("{name} must be a finite number (got {value})")]
    NonFinite { name: &'static str, value: f64 },
    /// A (min, max) range is inverted.
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    /// A knob is outside its allowed interval.
    #[error("{name} must lie in {expected} (got {value})")]
    OutOfRange {
        name: &'static str,
        expected: &'static str,
        value: f64,
    },
    /// The play area cannot hold a single target.
    #[error("play area {width}x{height} is too small for targets of radius {radius}")]
    PlayAreaTooSmall { width: f32, height: f32, radius: f32 },
    /// Settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    /// Settings JSON could not be parsed.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
