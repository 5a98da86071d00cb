//! Technique-specific plot builders.
//!
//! Each builder locates its columns through [`ColumnRole`] tables and fails
//! with [`PlotConfigError`] when one is missing; a builder never falls back to
//! some other column.

use thiserror::Error;

use super::config::{Axis, Layout, PlotConfig, PlotKind, RenderMode, Trace, TraceStyle};
use super::roles::ColumnRole;
use crate::data::columns::paired_values;
use crate::data::model::{ParsedData, Technique};

const PRIMARY: &str = "#2563eb";
const SECONDARY: &str = "#dc2626";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotConfigError {
    #[error("could not find a {role} column for the {plot} plot")]
    ColumnNotFound { plot: &'static str, role: ColumnRole },

    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("no rows with numeric values in both '{x}' and '{y}'")]
    EmptySeries { x: String, y: String },
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn locate(data: &ParsedData, plot: &'static str, role: ColumnRole) -> Result<usize, PlotConfigError> {
    role.find(data.columns())
        .ok_or(PlotConfigError::ColumnNotFound { plot, role })
}

fn series(data: &ParsedData, x: usize, y: usize) -> Result<(Vec<f64>, Vec<f64>), PlotConfigError> {
    let (xs, ys) = paired_values(&data.data, x, y);
    if xs.is_empty() {
        return Err(PlotConfigError::EmptySeries {
            x: data.columns()[x].clone(),
            y: data.columns()[y].clone(),
        });
    }
    Ok((xs, ys))
}

fn trace(x: Vec<f64>, y: Vec<f64>, mode: RenderMode, name: &str, color: &str, marker: Option<f32>) -> Trace {
    Trace {
        x,
        y,
        mode,
        name: name.to_string(),
        style: TraceStyle {
            color: color.to_string(),
            line_width: 2.0,
            marker_size: marker,
        },
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Current vs potential, drawn as a single line.
pub fn create_cv_plot(data: &ParsedData) -> Result<PlotConfig, PlotConfigError> {
    let e = locate(data, "CV", ColumnRole::Potential)?;
    let i = locate(data, "CV", ColumnRole::Current)?;
    let (potential, current) = series(data, e, i)?;

    let (e_name, i_name) = (&data.columns()[e], &data.columns()[i]);
    let mut layout = Layout::new("Cyclic Voltammogram", e_name, i_name);
    layout.zero_lines = true;

    Ok(PlotConfig {
        kind: PlotKind::CvPlot,
        x_axis: Axis::linear(e_name, e_name.as_str()),
        y_axis: Axis::linear(i_name, i_name.as_str()),
        data: vec![trace(potential, current, RenderMode::Lines, "CV Curve", PRIMARY, None)],
        layout,
    })
}

/// `-Im(Z)` vs `Re(Z)` on equal axes.
///
/// Imaginary values are forced non-positive (`v < 0 ? v : -v`) whatever sign
/// convention the instrument exported.
pub fn create_nyquist_plot(data: &ParsedData) -> Result<PlotConfig, PlotConfigError> {
    let re = locate(data, "Nyquist", ColumnRole::RealImpedance)?;
    let im = locate(data, "Nyquist", ColumnRole::ImaginaryImpedance)?;
    let (z_real, z_imag) = series(data, re, im)?;
    let z_imag = normalize_imaginary(&z_imag);

    let (x_label, y_label) = ("Z' (Ω)", "-Z'' (Ω)");
    let mut layout = Layout::new("Nyquist Plot", x_label, y_label);
    layout.equal_aspect = true;

    Ok(PlotConfig {
        kind: PlotKind::Nyquist,
        x_axis: Axis::linear(&data.columns()[re], x_label),
        y_axis: Axis::linear(&data.columns()[im], y_label),
        data: vec![trace(z_real, z_imag, RenderMode::LinesMarkers, "Nyquist", PRIMARY, Some(6.0))],
        layout,
    })
}

/// Sign normalization for the Nyquist y-axis. Idempotent.
pub fn normalize_imaginary(values: &[f64]) -> Vec<f64> {
    values.iter().map(|&v| if v < 0.0 { v } else { -v }).collect()
}

/// Magnitude and phase panels over a shared logarithmic frequency axis.
pub fn create_bode_plot(data: &ParsedData) -> Result<[PlotConfig; 2], PlotConfigError> {
    let f = locate(data, "Bode", ColumnRole::Frequency)?;
    let m = locate(data, "Bode", ColumnRole::ImpedanceMagnitude)?;
    let p = locate(data, "Bode", ColumnRole::Phase)?;
    let (f_mag, mag) = series(data, f, m)?;
    let (f_phase, phase) = series(data, f, p)?;

    let f_name = &data.columns()[f];
    let freq_label = "Frequency (Hz)";

    let magnitude = PlotConfig {
        kind: PlotKind::Bode,
        x_axis: Axis::log(f_name, freq_label),
        y_axis: Axis::log(&data.columns()[m], "|Z| (Ω)"),
        data: vec![trace(f_mag, mag, RenderMode::LinesMarkers, "Magnitude", PRIMARY, Some(5.0))],
        layout: Layout::new("Bode Plot - Magnitude", freq_label, "|Z| (Ω)"),
    };
    let phase = PlotConfig {
        kind: PlotKind::Bode,
        x_axis: Axis::log(f_name, freq_label),
        y_axis: Axis::linear(&data.columns()[p], "Phase (°)"),
        data: vec![trace(f_phase, phase, RenderMode::LinesMarkers, "Phase", SECONDARY, Some(5.0))],
        layout: Layout::new("Bode Plot - Phase", freq_label, "Phase (°)"),
    };
    Ok([magnitude, phase])
}

/// Capacity vs cycle number. Returned as a list so more panels can join it.
pub fn create_battery_cycling_plot(data: &ParsedData) -> Result<Vec<PlotConfig>, PlotConfigError> {
    let c = locate(data, "battery cycling", ColumnRole::CycleNumber)?;
    let q = locate(data, "battery cycling", ColumnRole::Capacity)?;
    let (cycles, capacity) = series(data, c, q)?;

    let q_name = &data.columns()[q];
    Ok(vec![PlotConfig {
        kind: PlotKind::BatteryCycling,
        x_axis: Axis::linear(&data.columns()[c], "Cycle Number"),
        y_axis: Axis::linear(q_name, q_name.as_str()),
        data: vec![trace(cycles, capacity, RenderMode::LinesMarkers, "Capacity", PRIMARY, Some(5.0))],
        layout: Layout::new("Capacity vs Cycle Number", "Cycle Number", q_name),
    }])
}

/// Current vs time (chronoamperometry).
pub fn create_chronoamperometry_plot(data: &ParsedData) -> Result<PlotConfig, PlotConfigError> {
    transient_plot(data, "chronoamperometry", ColumnRole::Current, "Chronoamperogram")
}

/// Potential vs time (chronopotentiometry).
pub fn create_chronopotentiometry_plot(data: &ParsedData) -> Result<PlotConfig, PlotConfigError> {
    transient_plot(data, "chronopotentiometry", ColumnRole::Potential, "Chronopotentiogram")
}

fn transient_plot(
    data: &ParsedData,
    plot: &'static str,
    signal: ColumnRole,
    title: &str,
) -> Result<PlotConfig, PlotConfigError> {
    let t = locate(data, plot, ColumnRole::Time)?;
    let s = locate(data, plot, signal)?;
    let (time, values) = series(data, t, s)?;

    let (t_name, s_name) = (&data.columns()[t], &data.columns()[s]);
    Ok(PlotConfig {
        kind: PlotKind::Line,
        x_axis: Axis::linear(t_name, t_name.as_str()),
        y_axis: Axis::linear(s_name, s_name.as_str()),
        data: vec![trace(time, values, RenderMode::Lines, s_name, PRIMARY, None)],
        layout: Layout::new(title, t_name, s_name),
    })
}

/// Plot two explicitly named columns. Names must match exactly.
pub fn create_generic_plot(data: &ParsedData, x_column: &str, y_column: &str) -> Result<PlotConfig, PlotConfigError> {
    let x = data
        .data
        .column_index(x_column)
        .ok_or_else(|| PlotConfigError::MissingColumn(x_column.to_string()))?;
    let y = data
        .data
        .column_index(y_column)
        .ok_or_else(|| PlotConfigError::MissingColumn(y_column.to_string()))?;
    let (xs, ys) = series(data, x, y)?;

    let title = format!("{y_column} vs {x_column}");
    Ok(PlotConfig {
        kind: PlotKind::Line,
        x_axis: Axis::linear(x_column, x_column),
        y_axis: Axis::linear(y_column, y_column),
        data: vec![trace(xs, ys, RenderMode::LinesMarkers, &title, PRIMARY, Some(5.0))],
        layout: Layout::new(title, x_column, y_column),
    })
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// All plots that apply to the dataset's technique.
///
/// Each entry stands alone: one failed plot leaves the others intact.
/// `Unknown` data gets a generic plot of its first two numeric columns.
pub fn plots_for_technique(data: &ParsedData) -> Vec<Result<PlotConfig, PlotConfigError>> {
    match data.technique {
        Technique::CV => vec![create_cv_plot(data)],
        Technique::EIS => {
            let mut plots = vec![create_nyquist_plot(data)];
            match create_bode_plot(data) {
                Ok(bode) => plots.extend(bode.into_iter().map(Ok)),
                Err(e) => plots.push(Err(e)),
            }
            plots
        }
        Technique::BatteryCycling => match create_battery_cycling_plot(data) {
            Ok(plots) => plots.into_iter().map(Ok).collect(),
            Err(e) => vec![Err(e)],
        },
        Technique::CA => vec![create_chronoamperometry_plot(data)],
        Technique::CP => vec![create_chronopotentiometry_plot(data)],
        Technique::Unknown => {
            let numeric = crate::data::columns::numeric_columns(&data.data);
            match numeric.as_slice() {
                [x, y, ..] => vec![create_generic_plot(data, x, y)],
                _ => Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imaginary_normalization_is_idempotent() {
        let once = normalize_imaginary(&[3.0, -3.0, 0.0]);
        assert_eq!(once, vec![-3.0, -3.0, -0.0]);
        assert_eq!(normalize_imaginary(&once), once);
    }
}
