//! Local-maximum peak detection with topographic prominence.
//!
//! A candidate is an interior point strictly above both neighbours; the
//! first and last samples are never peaks. Its prominence is the height
//! above the higher of the two bases, where each base is the lowest point
//! between the peak and the nearest strictly higher point on that side (or
//! the series boundary).

use serde::{Deserialize, Serialize};

use super::{check_series, FitError};

/// Fraction of the y-range used as the default prominence threshold.
pub const DEFAULT_PROMINENCE_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub prominence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakOptions {
    /// Peaks with a prominence below this are dropped.
    pub min_prominence: f64,
}

impl PeakOptions {
    /// Threshold as a fraction of the series' y-range.
    pub fn relative(y: &[f64], fraction: f64) -> Self {
        PeakOptions {
            min_prominence: fraction * y_range(y),
        }
    }
}

fn y_range(y: &[f64]) -> f64 {
    let (min, max) = y
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if min.is_finite() && max.is_finite() {
        max - min
    } else {
        0.0
    }
}

/// 10% of the y-range.
pub fn default_min_prominence(y: &[f64]) -> f64 {
    DEFAULT_PROMINENCE_FRACTION * y_range(y)
}

/// Lowest value walking away from `peak` until a strictly higher point.
fn base<'a>(peak: f64, side: impl Iterator<Item = &'a f64>) -> f64 {
    let mut lowest = peak;
    for &v in side {
        if v > peak {
            break;
        }
        lowest = lowest.min(v);
    }
    lowest
}

pub fn prominence(y: &[f64], i: usize) -> f64 {
    let peak = y[i];
    let left = base(peak, y[..i].iter().rev());
    let right = base(peak, y[i + 1..].iter());
    peak - left.max(right)
}

pub fn find_peaks(x: &[f64], y: &[f64], options: PeakOptions) -> Result<Vec<Peak>, FitError> {
    check_series(x, y, 1)?;
    if y.len() < 3 {
        return Ok(Vec::new());
    }

    let peaks = (1..y.len() - 1)
        .filter(|&i| y[i] > y[i - 1] && y[i] > y[i + 1])
        .map(|i| Peak {
            index: i,
            x: x[i],
            y: y[i],
            prominence: prominence(y, i),
        })
        .filter(|p| p.prominence >= options.min_prominence)
        .collect();
    Ok(peaks)
}
