//! Signal processing helpers: smoothing, derivative, baseline correction.

use super::{check_series, FitError};

/// Centered moving average. The window shrinks at the edges so the output
/// has the same length as the input.
pub fn moving_average(y: &[f64], window: usize) -> Result<Vec<f64>, FitError> {
    if y.is_empty() {
        return Err(FitError::Empty);
    }
    if window == 0 {
        return Err(FitError::Degenerate("smoothing window must be at least 1"));
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite);
    }

    let mut prefix = Vec::with_capacity(y.len() + 1);
    let mut acc = 0.0_f64;
    prefix.push(acc);
    for v in y {
        acc += v;
        prefix.push(acc);
    }

    let half = window / 2;
    let n = y.len();
    Ok((0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(n - 1);
            (prefix[hi + 1] - prefix[lo]) / (hi + 1 - lo) as f64
        })
        .collect())
}

/// dy/dx by central differences, one-sided at both ends. Steps with zero
/// dx yield 0.
pub fn derivative(x: &[f64], y: &[f64]) -> Result<Vec<f64>, FitError> {
    check_series(x, y, 2)?;
    let n = y.len();
    let slope = |a: usize, b: usize| {
        let dx = x[b] - x[a];
        if dx.abs() > f64::EPSILON {
            (y[b] - y[a]) / dx
        } else {
            0.0
        }
    };

    let mut out = Vec::with_capacity(n);
    out.push(slope(0, 1));
    out.extend((1..n - 1).map(|i| slope(i - 1, i + 1)));
    out.push(slope(n - 2, n - 1));
    Ok(out)
}

/// Subtract the straight line through the first and last points.
pub fn correct_baseline(x: &[f64], y: &[f64]) -> Result<Vec<f64>, FitError> {
    check_series(x, y, 2)?;
    let (x0, y0) = (x[0], y[0]);
    let (x1, y1) = (x[x.len() - 1], y[y.len() - 1]);
    if x1 == x0 {
        return Err(FitError::Degenerate("first and last x values coincide"));
    }
    let m = (y1 - y0) / (x1 - x0);
    Ok(x.iter()
        .zip(y)
        .map(|(xi, yi)| yi - (y0 + m * (xi - x0)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_use_shrunken_window() {
        let s = moving_average(&[0.0, 3.0, 6.0, 9.0], 3).unwrap();
        assert_eq!(s, vec![1.5, 3.0, 6.0, 7.5]);
    }

    #[test]
    fn window_of_one_is_identity() {
        let y = [1.0, -2.0, 4.0];
        assert_eq!(moving_average(&y, 1).unwrap(), y.to_vec());
    }
}
