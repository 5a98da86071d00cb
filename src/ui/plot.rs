use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use echem_viewer::plotting::{AxisScale, PlotConfig, Trace};
use egui_plot::{GridMark, HLine, Legend, Line, MarkerShape, Plot, PlotPoints, PlotUi, Points, VLine};

use crate::color::{overlay_colors, parse_hex};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected plot config in the central panel.
pub fn data_plot(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view data  (File → Open…)");
        });
        return;
    }

    let config = match state.current_plot() {
        Some(Ok(config)) => config,
        Some(Err(msg)) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new(msg).color(Color32::RED));
            });
            return;
        }
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No numeric columns to plot.");
            });
            return;
        }
    };

    let x_log = config.x_axis.scale == AxisScale::Log;
    let y_log = config.y_axis.scale == AxisScale::Log;
    let overlays = state.overlays_match(config);

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&config.layout.title);
    });

    let mut chart = Plot::new(("data_plot", config.title()))
        .x_axis_label(&config.layout.x_title)
        .y_axis_label(&config.layout.y_title)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if config.layout.show_legend || overlays {
        chart = chart.legend(Legend::default());
    }
    if config.layout.equal_aspect {
        chart = chart.data_aspect(1.0);
    }
    if x_log {
        chart = chart.x_axis_formatter(log_tick);
    }
    if y_log {
        chart = chart.y_axis_formatter(log_tick);
    }

    chart.show(ui, |plot_ui| {
        for trace in &config.data {
            draw_trace(plot_ui, trace, x_log, y_log);
        }
        if config.layout.zero_lines {
            plot_ui.hline(HLine::new(0.0).color(Color32::GRAY).width(0.5));
            plot_ui.vline(VLine::new(0.0).color(Color32::GRAY).width(0.5));
        }
        if overlays {
            draw_overlays(plot_ui, state, config, x_log, y_log);
        }
    });
}

fn draw_trace(plot_ui: &mut PlotUi, trace: &Trace, x_log: bool, y_log: bool) {
    let color = parse_hex(&trace.style.color);
    let points = to_points(&trace.x, &trace.y, x_log, y_log);

    if trace.mode.has_lines() {
        plot_ui.line(
            Line::new(PlotPoints::from(points.clone()))
                .name(&trace.name)
                .color(color)
                .width(trace.style.line_width),
        );
    }
    if trace.mode.has_markers() {
        let radius = trace.style.marker_size.unwrap_or(4.0) / 2.0;
        plot_ui.points(
            Points::new(points)
                .name(&trace.name)
                .color(color)
                .radius(radius),
        );
    }
}

/// Fit curve, detected peaks and processed series on top of the trace.
fn draw_overlays(plot_ui: &mut PlotUi, state: &AppState, config: &PlotConfig, x_log: bool, y_log: bool) {
    let colors = overlay_colors(3);
    let analysis = &state.analysis;

    if let Some(Ok(fit)) = &analysis.fit {
        let (x_min, x_max) = x_range(&config.data);
        if x_min < x_max {
            let (x, y) = fit.curve(x_min, x_max, state.settings.fit_curve_points);
            plot_ui.line(
                Line::new(PlotPoints::from(to_points(&x, &y, x_log, y_log)))
                    .name(format!("{} fit", fit.kind))
                    .color(colors[0])
                    .width(2.0),
            );
        }
    }

    if let Some(Ok(peaks)) = &analysis.peaks {
        let x: Vec<f64> = peaks.iter().map(|p| p.x).collect();
        let y: Vec<f64> = peaks.iter().map(|p| p.y).collect();
        plot_ui.points(
            Points::new(to_points(&x, &y, x_log, y_log))
                .name("peaks")
                .color(colors[1])
                .shape(MarkerShape::Diamond)
                .radius(6.0),
        );
    }

    if let Some(Ok(series)) = &analysis.processed {
        plot_ui.line(
            Line::new(PlotPoints::from(to_points(&series.x, &series.y, x_log, y_log)))
                .name(&series.name)
                .color(colors[2])
                .width(1.5),
        );
    }
}

/// Pairs to plot coordinates. Log axes are drawn in log10 space and
/// non-positive values on them are skipped.
fn to_points(x: &[f64], y: &[f64], x_log: bool, y_log: bool) -> Vec<[f64; 2]> {
    let axis = |v: f64, log: bool| match log {
        true if v > 0.0 => Some(v.log10()),
        true => None,
        false => Some(v),
    };
    x.iter()
        .zip(y)
        .filter_map(|(&xi, &yi)| Some([axis(xi, x_log)?, axis(yi, y_log)?]))
        .collect()
}

fn log_tick(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    format!("{:.2e}", 10f64.powf(mark.value))
}

fn x_range(traces: &[Trace]) -> (f64, f64) {
    traces
        .iter()
        .flat_map(|t| t.x.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_axes_drop_non_positive_values() {
        let pts = to_points(&[0.0, 10.0, 100.0], &[1.0, 2.0, 3.0], true, false);
        assert_eq!(pts, vec![[1.0, 2.0], [2.0, 3.0]]);
    }
}
