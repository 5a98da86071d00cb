use echem_viewer::analysis::{
    fit, fit_exponential, fit_linear, fit_logarithmic, fit_polynomial, fit_power, FitError, FitKind,
};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn linear_exact_line() {
    let r = fit_linear(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
    assert_eq!(r.kind, FitKind::Linear);
    assert!(close(r.coefficients[0], 2.0, 1e-9));
    assert!(close(r.coefficients[1], 0.0, 1e-9));
    assert!(close(r.r2, 1.0, 1e-9));
    assert_eq!(r.equation, "y = 2.0000x + 0.0000");
    assert_eq!(r.quality(), "Excellent fit");
}

#[test]
fn linear_negative_intercept_in_equation() {
    let r = fit_linear(&[0.0, 1.0, 2.0], &[-1.0, 1.0, 3.0]).unwrap();
    assert_eq!(r.equation, "y = 2.0000x - 1.0000");
}

#[test]
fn linear_fit_on_timestamp_offsets() {
    let x: Vec<f64> = (0..10).map(|i| 1.7e9 + f64::from(i)).collect();
    let y: Vec<f64> = (0..10).map(|i| 2.0 * f64::from(i)).collect();
    let r = fit_linear(&x, &y).unwrap();
    assert!(close(r.coefficients[0], 2.0, 1e-6));
    assert!(close(r.predict(x[5]), 10.0, 1e-3));
    assert!(r.r2 > 0.999999);
}

#[test]
fn noisy_line_has_r2_below_one() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [1.1, 1.9, 3.2, 3.8, 5.1];
    let r = fit_linear(&x, &y).unwrap();
    assert!(r.r2 < 1.0 && r.r2 > 0.95);
}

#[test]
fn polynomial_recovers_quadratic() {
    let x: Vec<f64> = (-5..=5).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| 1.0 - 2.0 * v + 0.5 * v * v).collect();
    let r = fit_polynomial(&x, &y, 2).unwrap();

    assert_eq!(r.coefficients.len(), 3);
    assert!(close(r.coefficients[0], 1.0, 1e-8));
    assert!(close(r.coefficients[1], -2.0, 1e-8));
    assert!(close(r.coefficients[2], 0.5, 1e-8));
    assert!(close(r.r2, 1.0, 1e-9));
    assert!(close(r.predict(10.0), 1.0 - 20.0 + 50.0, 1e-6));
}

#[test]
fn polynomial_on_large_x_stays_stable() {
    let x: Vec<f64> = (0..50).map(|i| 1000.0 + i as f64 * 10.0).collect();
    let y: Vec<f64> = x.iter().map(|v| 3.0 + 1e-3 * v - 2e-6 * v * v).collect();
    let r = fit_polynomial(&x, &y, 2).unwrap();
    assert!(r.r2 > 0.999_99);
}

#[test]
fn polynomial_order_bounds() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let y = x;
    assert_eq!(
        fit_polynomial(&x, &y, 0).unwrap_err(),
        FitError::InvalidOrder { got: 0, min: 1, max: 6 }
    );
    assert!(matches!(
        fit_polynomial(&x, &y, 7),
        Err(FitError::InvalidOrder { got: 7, .. })
    ));
}

#[test]
fn polynomial_needs_order_plus_one_points() {
    assert_eq!(
        fit_polynomial(&[1.0, 2.0, 3.0], &[1.0, 4.0, 9.0], 3).unwrap_err(),
        FitError::TooFewPoints { needed: 4, got: 3 }
    );
}

#[test]
fn exponential_recovers_parameters() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y: Vec<f64> = x.iter().map(|v: &f64| 2.0 * (0.5 * v).exp()).collect();
    let r = fit_exponential(&x, &y).unwrap();
    assert!(close(r.coefficients[0], 2.0, 1e-9));
    assert!(close(r.coefficients[1], 0.5, 1e-9));
    assert!(close(r.r2, 1.0, 1e-9));
}

#[test]
fn exponential_rejects_non_positive_y() {
    assert_eq!(
        fit_exponential(&[1.0, 2.0, 3.0], &[1.0, 0.0, 3.0]).unwrap_err(),
        FitError::NonPositive { model: "exponential", axis: 'y' }
    );
}

#[test]
fn logarithmic_recovers_parameters() {
    let x = [1.0, 2.0, 4.0, 8.0];
    let y: Vec<f64> = x.iter().map(|v: &f64| 3.0 + 2.0 * v.ln()).collect();
    let r = fit_logarithmic(&x, &y).unwrap();
    assert!(close(r.coefficients[0], 3.0, 1e-9));
    assert!(close(r.coefficients[1], 2.0, 1e-9));
}

#[test]
fn logarithmic_rejects_non_positive_x() {
    assert!(matches!(
        fit_logarithmic(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]),
        Err(FitError::NonPositive { axis: 'x', .. })
    ));
}

#[test]
fn power_recovers_parameters() {
    let x = [1.0, 2.0, 3.0, 4.0];
    let y: Vec<f64> = x.iter().map(|v: &f64| 1.5 * v.powf(0.5)).collect();
    let r = fit_power(&x, &y).unwrap();
    assert!(close(r.coefficients[0], 1.5, 1e-9));
    assert!(close(r.coefficients[1], 0.5, 1e-9));
}

#[test]
fn invalid_inputs_are_rejected() {
    assert_eq!(fit_linear(&[], &[]).unwrap_err(), FitError::Empty);
    assert_eq!(
        fit_linear(&[1.0, 2.0], &[1.0]).unwrap_err(),
        FitError::LengthMismatch { x: 2, y: 1 }
    );
    assert_eq!(fit_linear(&[1.0, f64::NAN], &[1.0, 2.0]).unwrap_err(), FitError::NonFinite);
    assert!(matches!(
        fit_linear(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
        Err(FitError::Degenerate(_))
    ));
}

#[test]
fn dispatch_passes_order_to_polynomial() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [0.0, 1.0, 4.0, 9.0];
    let r = fit(FitKind::Polynomial, &x, &y, 2).unwrap();
    assert_eq!(r.kind, FitKind::Polynomial);
    assert_eq!(r.coefficients.len(), 3);
    let r = fit(FitKind::Linear, &x, &y, 2).unwrap();
    assert_eq!(r.coefficients.len(), 2);
}

#[test]
fn fit_result_serializes_with_type_tag() {
    let r = fit_linear(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["type"], "linear");
    assert_eq!(json["coefficients"].as_array().map(Vec::len), Some(2));
}

#[test]
fn curve_samples_the_model() {
    let r = fit_linear(&[0.0, 1.0], &[1.0, 3.0]).unwrap();
    let (x, y) = r.curve(0.0, 2.0, 3);
    assert_eq!(x, vec![0.0, 1.0, 2.0]);
    assert_eq!(y, vec![1.0, 3.0, 5.0]);
}
