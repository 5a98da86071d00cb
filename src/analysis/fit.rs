//! Least-squares regression models.
//!
//! Coefficient layout per model:
//!
//! | model        | equation          | coefficients        |
//! |--------------|-------------------|---------------------|
//! | linear       | y = m·x + c       | `[m, c]`            |
//! | polynomial   | y = Σ cₖ·xᵏ       | `[c₀, c₁, …, cₙ]`   |
//! | exponential  | y = a·e^(b·x)     | `[a, b]`            |
//! | logarithmic  | y = a + b·ln(x)   | `[a, b]`            |
//! | power        | y = a·x^b         | `[a, b]`            |
//!
//! Exponential, logarithmic and power models are fitted on log-linearized
//! data; their R² is measured against the original y values.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check_series, FitError};

pub const MIN_POLY_ORDER: usize = 1;
pub const MAX_POLY_ORDER: usize = 6;
pub const DEFAULT_POLY_ORDER: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitKind {
    Linear,
    Polynomial,
    Exponential,
    Logarithmic,
    Power,
}

impl FitKind {
    pub const ALL: [FitKind; 5] = [
        FitKind::Linear,
        FitKind::Polynomial,
        FitKind::Exponential,
        FitKind::Logarithmic,
        FitKind::Power,
    ];
}

impl fmt::Display for FitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FitKind::Linear => "linear",
            FitKind::Polynomial => "polynomial",
            FitKind::Exponential => "exponential",
            FitKind::Logarithmic => "logarithmic",
            FitKind::Power => "power",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    #[serde(rename = "type")]
    pub kind: FitKind,
    pub equation: String,
    pub coefficients: Vec<f64>,
    pub r2: f64,
}

impl FitResult {
    fn coef(&self, i: usize) -> f64 {
        self.coefficients.get(i).copied().unwrap_or(0.0)
    }

    /// Evaluate the fitted model at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        match self.kind {
            FitKind::Linear => self.coef(0) * x + self.coef(1),
            FitKind::Polynomial => self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c),
            FitKind::Exponential => self.coef(0) * (self.coef(1) * x).exp(),
            FitKind::Logarithmic => self.coef(0) + self.coef(1) * x.ln(),
            FitKind::Power => self.coef(0) * x.powf(self.coef(1)),
        }
    }

    /// `n` evenly spaced samples of the model over `[x_min, x_max]`,
    /// skipping points where it is undefined.
    pub fn curve(&self, x_min: f64, x_max: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
        if n < 2 {
            return (Vec::new(), Vec::new());
        }
        let step = (x_max - x_min) / (n - 1) as f64;
        (0..n)
            .map(|i| x_min + step * i as f64)
            .map(|x| (x, self.predict(x)))
            .filter(|(_, y)| y.is_finite())
            .unzip()
    }

    pub fn quality(&self) -> &'static str {
        if self.r2 > 0.95 {
            "Excellent fit"
        } else if self.r2 > 0.9 {
            "Good fit"
        } else {
            "Poor fit - try a different model"
        }
    }
}

// ---------------------------------------------------------------------------
// Core helpers
// ---------------------------------------------------------------------------

/// Ordinary least squares line: `(slope, intercept)`.
fn least_squares_line(x: &[f64], y: &[f64]) -> Result<(f64, f64), FitError> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        sxx += dx * dx;
        sxy += dx * (yi - mean_y);
    }
    if sxx == 0.0 || x.windows(2).all(|w| w[0] == w[1]) {
        return Err(FitError::Degenerate("all x values are identical"));
    }
    let slope = sxy / sxx;
    Ok((slope, mean_y - slope * mean_x))
}

/// Coefficient of determination, 1 − SSres/SStot.
fn r_squared(y: &[f64], predicted: impl Iterator<Item = f64>) -> f64 {
    let mean_y = y.iter().sum::<f64>() / y.len() as f64;
    let (mut ss_res, mut ss_tot) = (0.0, 0.0);
    for (yi, pi) in y.iter().zip(predicted) {
        ss_res += (yi - pi).powi(2);
        ss_tot += (yi - mean_y).powi(2);
    }
    if ss_tot == 0.0 {
        return if ss_res <= f64::EPSILON { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

fn require_positive(values: &[f64], model: &'static str, axis: char) -> Result<(), FitError> {
    if values.iter().all(|&v| v > 0.0) {
        Ok(())
    } else {
        Err(FitError::NonPositive { model, axis })
    }
}

fn finish(kind: FitKind, equation: String, coefficients: Vec<f64>, x: &[f64], y: &[f64]) -> Result<FitResult, FitError> {
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(FitError::Degenerate("fit produced non-finite coefficients"));
    }
    let mut result = FitResult {
        kind,
        equation,
        coefficients,
        r2: 0.0,
    };
    let r2 = r_squared(y, x.iter().map(|&xi| result.predict(xi)));
    result.r2 = r2;
    Ok(result)
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

pub fn fit_linear(x: &[f64], y: &[f64]) -> Result<FitResult, FitError> {
    check_series(x, y, 2)?;
    let (slope, intercept) = least_squares_line(x, y)?;
    let equation = format!("y = {}x{}", fmt_coef(slope), signed_term(intercept, ""));
    finish(FitKind::Linear, equation, vec![slope, intercept], x, y)
}

/// Polynomial of the given order via the normal equations.
pub fn fit_polynomial(x: &[f64], y: &[f64], order: usize) -> Result<FitResult, FitError> {
    if !(MIN_POLY_ORDER..=MAX_POLY_ORDER).contains(&order) {
        return Err(FitError::InvalidOrder {
            got: order,
            min: MIN_POLY_ORDER,
            max: MAX_POLY_ORDER,
        });
    }
    check_series(x, y, order + 1)?;

    // Solve in u = x / scale to keep the normal matrix well conditioned.
    let scale = x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return Err(FitError::Degenerate("all x values are zero"));
    }
    let m = order + 1;
    let mut powers = vec![0.0; 2 * order + 1];
    let mut rhs = vec![0.0; m];
    for (xi, yi) in x.iter().zip(y) {
        let u = xi / scale;
        let mut p = 1.0;
        for (k, slot) in powers.iter_mut().enumerate() {
            *slot += p;
            if k < m {
                rhs[k] += yi * p;
            }
            p *= u;
        }
    }
    let matrix: Vec<Vec<f64>> = (0..m).map(|j| powers[j..j + m].to_vec()).collect();
    let scaled = solve_linear_system(matrix, rhs)?;
    let coefficients: Vec<f64> = scaled
        .iter()
        .enumerate()
        .map(|(k, c)| c / scale.powi(k as i32))
        .collect();

    let equation = format!("y = {}", polynomial_terms(&coefficients));
    finish(FitKind::Polynomial, equation, coefficients, x, y)
}

/// y = a·e^(b·x), via ln y = ln a + b·x. Requires y > 0.
pub fn fit_exponential(x: &[f64], y: &[f64]) -> Result<FitResult, FitError> {
    check_series(x, y, 2)?;
    require_positive(y, "exponential", 'y')?;
    let ln_y: Vec<f64> = y.iter().map(|v| v.ln()).collect();
    let (b, ln_a) = least_squares_line(x, &ln_y)?;
    let a = ln_a.exp();
    let equation = format!("y = {}·e^({}x)", fmt_coef(a), fmt_coef(b));
    finish(FitKind::Exponential, equation, vec![a, b], x, y)
}

/// y = a + b·ln(x). Requires x > 0.
pub fn fit_logarithmic(x: &[f64], y: &[f64]) -> Result<FitResult, FitError> {
    check_series(x, y, 2)?;
    require_positive(x, "logarithmic", 'x')?;
    let ln_x: Vec<f64> = x.iter().map(|v| v.ln()).collect();
    let (b, a) = least_squares_line(&ln_x, y)?;
    let equation = format!("y = {}{}", fmt_coef(a), signed_term(b, "·ln(x)"));
    finish(FitKind::Logarithmic, equation, vec![a, b], x, y)
}

/// y = a·x^b, via ln y = ln a + b·ln x. Requires x > 0 and y > 0.
pub fn fit_power(x: &[f64], y: &[f64]) -> Result<FitResult, FitError> {
    check_series(x, y, 2)?;
    require_positive(x, "power", 'x')?;
    require_positive(y, "power", 'y')?;
    let ln_x: Vec<f64> = x.iter().map(|v| v.ln()).collect();
    let ln_y: Vec<f64> = y.iter().map(|v| v.ln()).collect();
    let (b, ln_a) = least_squares_line(&ln_x, &ln_y)?;
    let a = ln_a.exp();
    let equation = format!("y = {}·x^{}", fmt_coef(a), fmt_coef(b));
    finish(FitKind::Power, equation, vec![a, b], x, y)
}

/// Dispatch on the model kind. `order` only applies to polynomials.
pub fn fit(kind: FitKind, x: &[f64], y: &[f64], order: usize) -> Result<FitResult, FitError> {
    match kind {
        FitKind::Linear => fit_linear(x, y),
        FitKind::Polynomial => fit_polynomial(x, y, order),
        FitKind::Exponential => fit_exponential(x, y),
        FitKind::Logarithmic => fit_logarithmic(x, y),
        FitKind::Power => fit_power(x, y),
    }
}

// ---------------------------------------------------------------------------
// Linear algebra
// ---------------------------------------------------------------------------

/// Gaussian elimination with partial pivoting.
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, FitError> {
    let n = b.len();
    let norm = a
        .iter()
        .flatten()
        .fold(0.0_f64, |m, v| m.max(v.abs()));
    let tol = norm * 1e-13;

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() <= tol {
            return Err(FitError::Degenerate("singular normal equations"));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * solution[k]).sum();
        solution[row] = (b[row] - tail) / a[row][row];
    }
    Ok(solution)
}

// ---------------------------------------------------------------------------
// Equation formatting
// ---------------------------------------------------------------------------

/// Four decimals, switching to scientific notation for very small or very
/// large magnitudes.
pub fn fmt_coef(v: f64) -> String {
    let a = v.abs();
    if a == 0.0 || (1e-3..1e5).contains(&a) {
        format!("{v:.4}")
    } else {
        format!("{v:.4e}")
    }
}

/// ` + 1.0000suffix` / ` - 1.0000suffix`.
fn signed_term(v: f64, suffix: &str) -> String {
    let sign = if v < 0.0 { '-' } else { '+' };
    format!(" {sign} {}{suffix}", fmt_coef(v.abs()))
}

fn polynomial_terms(coefficients: &[f64]) -> String {
    let power = |k: usize| match k {
        0 => String::new(),
        1 => "x".to_string(),
        _ => format!("x^{k}"),
    };
    let mut terms = coefficients.iter().enumerate().rev();
    let Some((top, &lead)) = terms.next() else {
        return "0".to_string();
    };
    let mut out = format!("{}{}", fmt_coef(lead), power(top));
    for (k, &c) in terms {
        out.push_str(&signed_term(c, &power(k)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_handles_pivoting() {
        let a = vec![vec![0.0, 1.0], vec![2.0, 0.0]];
        let x = solve_linear_system(a, vec![3.0, 4.0]).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn solver_rejects_singular_matrix() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert!(matches!(
            solve_linear_system(a, vec![1.0, 2.0]),
            Err(FitError::Degenerate(_))
        ));
    }

    #[test]
    fn coefficient_formatting() {
        assert_eq!(fmt_coef(2.0), "2.0000");
        assert_eq!(fmt_coef(0.0), "0.0000");
        assert_eq!(fmt_coef(1.5e-6), "1.5000e-6");
        assert_eq!(signed_term(-0.5, "x"), " - 0.5000x");
    }

    #[test]
    fn polynomial_equation_reads_highest_power_first() {
        assert_eq!(
            polynomial_terms(&[3.0, -2.0, 1.0]),
            "1.0000x^2 - 2.0000x + 3.0000"
        );
    }
}
