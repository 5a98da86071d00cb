use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use echem_viewer::analysis::fit::{fmt_coef, MAX_POLY_ORDER, MIN_POLY_ORDER};
use echem_viewer::analysis::FitKind;
use echem_viewer::data::columns::numeric_columns;

use crate::state::AppState;
use crate::ui::panels::column_combo;

// ---------------------------------------------------------------------------
// Right side panel – fitting, statistics, peaks, processing
// ---------------------------------------------------------------------------

pub fn analysis_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        return;
    };
    let numeric: Vec<String> = numeric_columns(&dataset.data)
        .into_iter()
        .map(str::to_string)
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            column_combo(ui, "analysis_x", "X", &numeric, &mut state.analysis.x_column);
            column_combo(ui, "analysis_y", "Y", &numeric, &mut state.analysis.y_column);
            ui.separator();

            fit_section(ui, state);
            ui.separator();
            statistics_section(ui, state);
            ui.separator();
            peaks_section(ui, state);
            ui.separator();
            processing_section(ui, state);
        });
}

fn error_label(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(msg).color(Color32::RED));
}

fn fit_section(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Curve fit");
    ui.horizontal(|ui: &mut Ui| {
        egui::ComboBox::from_id_salt("fit_kind")
            .selected_text(state.analysis.fit_kind.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for kind in FitKind::ALL {
                    ui.selectable_value(&mut state.analysis.fit_kind, kind, kind.to_string());
                }
            });
        if state.analysis.fit_kind == FitKind::Polynomial {
            ui.label("order");
            ui.add(
                egui::DragValue::new(&mut state.analysis.polynomial_order)
                    .range(MIN_POLY_ORDER..=MAX_POLY_ORDER),
            );
        }
        if ui.button("Fit").clicked() {
            state.run_fit();
        }
    });

    match &state.analysis.fit {
        Some(Ok(fit)) => {
            ui.monospace(&fit.equation);
            ui.label(format!("R² = {}  ({})", fmt_coef(fit.r2), fit.quality()));
        }
        Some(Err(msg)) => error_label(ui, msg),
        None => {}
    }
}

fn statistics_section(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Statistics (Y)");
        if ui.small_button("Compute").clicked() {
            state.run_statistics();
        }
    });

    match &state.analysis.statistics {
        Some(Ok(stats)) => {
            egui::Grid::new("statistics_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    let rows = [
                        ("Count", stats.count.to_string()),
                        ("Mean", fmt_coef(stats.mean)),
                        ("Median", fmt_coef(stats.median)),
                        ("Std dev", fmt_coef(stats.std_dev)),
                        ("Min", fmt_coef(stats.min)),
                        ("Q1", fmt_coef(stats.q1)),
                        ("Q3", fmt_coef(stats.q3)),
                        ("Max", fmt_coef(stats.max)),
                    ];
                    for (name, value) in rows {
                        ui.label(name);
                        ui.monospace(value);
                        ui.end_row();
                    }
                });
        }
        Some(Err(msg)) => error_label(ui, msg),
        None => {}
    }
}

fn peaks_section(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Peaks");
        if ui.small_button("Find").clicked() {
            state.run_peaks();
        }
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("min prominence");
        ui.add(
            egui::DragValue::new(&mut state.settings.prominence_fraction)
                .range(0.0..=1.0)
                .speed(0.01)
                .suffix(" × range"),
        );
    });

    match &state.analysis.peaks {
        Some(Ok(peaks)) if peaks.is_empty() => {
            ui.label("No peaks above threshold.");
        }
        Some(Ok(peaks)) => {
            egui::Grid::new("peaks_grid")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("x");
                    ui.strong("y");
                    ui.strong("prominence");
                    ui.end_row();
                    for peak in peaks {
                        ui.monospace(fmt_coef(peak.x));
                        ui.monospace(fmt_coef(peak.y));
                        ui.monospace(fmt_coef(peak.prominence));
                        ui.end_row();
                    }
                });
        }
        Some(Err(msg)) => error_label(ui, msg),
        None => {}
    }
}

fn processing_section(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Processing");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("window");
        ui.add(egui::DragValue::new(&mut state.settings.smoothing_window).range(1..=501));
        if ui.button("Smooth").clicked() {
            state.run_smoothing();
        }
    });
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Derivative").clicked() {
            state.run_derivative();
        }
        if ui.button("Baseline").clicked() {
            state.run_baseline();
        }
        if state.analysis.processed.is_some() && ui.small_button("Clear").clicked() {
            state.analysis.processed = None;
        }
    });

    match &state.analysis.processed {
        Some(Ok(series)) => {
            ui.label(format!("{} ({} points)", series.name, series.y.len()));
        }
        Some(Err(msg)) => error_label(ui, msg),
        None => {}
    }
}
