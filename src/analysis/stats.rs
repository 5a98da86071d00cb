//! Descriptive statistics.
//!
//! Standard deviation is the sample form (n − 1 denominator; 0 for a single
//! value). Quartiles are medians of the lower and upper halves of the sorted
//! data, excluding the middle element when the count is odd.

use serde::{Deserialize, Serialize};

use super::FitError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub count: usize,
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

pub fn calculate_statistics(values: &[f64]) -> Result<Statistics, FitError> {
    if values.is_empty() {
        return Err(FitError::Empty);
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite);
    }

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1).max(1) as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let median = median_of_sorted(&sorted);
    let (q1, q3) = if n == 1 {
        (sorted[0], sorted[0])
    } else {
        let half = n / 2;
        let upper_start = if n % 2 == 1 { half + 1 } else { half };
        (
            median_of_sorted(&sorted[..half]),
            median_of_sorted(&sorted[upper_start..]),
        )
    };

    Ok(Statistics {
        mean,
        median,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
        q1,
        q3,
        count: n,
    })
}
