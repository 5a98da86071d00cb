//! Numeric analysis over (x, y) series: regression fits, descriptive
//! statistics, peak detection and simple signal processing.
//!
//! Inputs are plain slices of finite numbers. Callers are expected to build
//! them with `data::columns::paired_values`, which already drops rows with a
//! missing or non-numeric cell in either column.

pub mod fit;
pub mod peaks;
pub mod processing;
pub mod stats;

use thiserror::Error;

pub use fit::{fit, fit_exponential, fit_linear, fit_logarithmic, fit_polynomial, fit_power, FitKind, FitResult};
pub use peaks::{default_min_prominence, find_peaks, Peak, PeakOptions};
pub use processing::{correct_baseline, derivative, moving_average};
pub use stats::{calculate_statistics, Statistics};

/// Why an analysis could not be computed. Only the requested operation is
/// affected; earlier results stay valid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("input series is empty")]
    Empty,

    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("need at least {needed} points, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    #[error("{model} fit requires all {axis} values > 0")]
    NonPositive { model: &'static str, axis: char },

    #[error("input contains NaN or infinite values")]
    NonFinite,

    #[error("polynomial order must be between {min} and {max}, got {got}")]
    InvalidOrder { got: usize, min: usize, max: usize },

    #[error("degenerate input: {0}")]
    Degenerate(&'static str),
}

/// Shared validation: equal, non-zero lengths and finite values.
pub(crate) fn check_series(x: &[f64], y: &[f64], min_points: usize) -> Result<(), FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch { x: x.len(), y: y.len() });
    }
    if x.is_empty() {
        return Err(FitError::Empty);
    }
    if x.len() < min_points {
        return Err(FitError::TooFewPoints {
            needed: min_points,
            got: x.len(),
        });
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite);
    }
    Ok(())
}
