use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use echem_viewer::data::export::{export_to_path, ExportFormat};
use echem_viewer::data::columns::numeric_columns;

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – dataset summary and plot selection
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dataset");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let source = state.source_name.clone().unwrap_or_default();
    let technique = dataset.technique;
    let instrument = dataset.instrument;
    let (n_rows, n_cols) = (dataset.data.n_rows(), dataset.data.n_columns());
    let metadata: Vec<(String, String)> = dataset
        .metadata
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect();
    let units: Vec<(String, String)> = dataset
        .units
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let numeric: Vec<String> = numeric_columns(&dataset.data)
        .into_iter()
        .map(str::to_string)
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("dataset_summary")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("File");
                    ui.label(&source);
                    ui.end_row();
                    ui.strong("Technique");
                    ui.label(technique.long_name());
                    ui.end_row();
                    ui.strong("Instrument");
                    ui.label(instrument.to_string());
                    ui.end_row();
                    ui.strong("Size");
                    ui.label(format!("{n_rows} rows × {n_cols} columns"));
                    ui.end_row();
                });

            key_value_section(ui, "Metadata", &metadata);
            key_value_section(ui, "Units", &units);
            ui.separator();

            // ---- Plot selector ----
            ui.strong("Plot");
            let generic_index = state.plots.len();
            for (i, plot) in state.plots.iter().enumerate() {
                ui.radio_value(&mut state.selected_plot, i, plot.title());
            }
            ui.radio_value(&mut state.selected_plot, generic_index, "Custom XY");

            for msg in &state.plot_errors {
                ui.label(RichText::new(msg).color(Color32::YELLOW).small());
            }

            // ---- Generic XY pickers ----
            if state.selected_plot == generic_index {
                let mut changed = column_combo(ui, "generic_x", "X", &numeric, &mut state.generic_x);
                changed |= column_combo(ui, "generic_y", "Y", &numeric, &mut state.generic_y);
                if changed {
                    state.rebuild_generic_plot();
                }
            }
        });
}

fn key_value_section(ui: &mut Ui, title: &str, entries: &[(String, String)]) {
    egui::CollapsingHeader::new(RichText::new(format!("{title}  ({})", entries.len())).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if entries.is_empty() {
                ui.label("none");
            }
            egui::Grid::new(format!("{title}_grid"))
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for (k, v) in entries {
                        ui.label(k);
                        ui.label(v);
                        ui.end_row();
                    }
                });
        });
}

/// Column picker. Returns true when the selection changed.
pub fn column_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    columns: &[String],
    selected: &mut Option<String>,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected.as_deref().unwrap_or("(none)"))
            .show_ui(ui, |ui: &mut Ui| {
                for col in columns {
                    let is_selected = selected.as_deref() == Some(col.as_str());
                    if ui.selectable_label(is_selected, col).clicked() && !is_selected {
                        *selected = Some(col.clone());
                        changed = true;
                    }
                }
            });
    });
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.add_enabled_ui(state.dataset.is_some(), |ui: &mut Ui| {
                ui.menu_button("Export", |ui: &mut Ui| {
                    for format in ExportFormat::ALL {
                        if ui.button(format.label()).clicked() {
                            export_dialog(state, format);
                            ui.close_menu();
                        }
                    }
                });
            });
        });

        ui.separator();

        ui.selectable_value(&mut state.view, View::Plot, "Plot");
        ui.selectable_value(&mut state.view, View::Table, "Table");

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} · {} rows",
                ds.technique,
                ds.data.n_rows()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open electrochemistry data")
        .add_filter("Supported files", &["csv", "txt", "dta", "mpt"])
        .add_filter("CSV / text", &["csv", "txt"])
        .add_filter("Gamry", &["dta"])
        .add_filter("BioLogic EC-Lab", &["mpt"])
        .pick_file();

    if let Some(path) = file {
        match echem_viewer::data::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows, technique {} from {}",
                    dataset.data.n_rows(),
                    dataset.technique,
                    path.display()
                );
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                state.set_dataset(dataset, name);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_dialog(state: &mut AppState, format: ExportFormat) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let stem = state
        .source_name
        .as_deref()
        .and_then(|n| n.rsplit_once('.').map(|(s, _)| s))
        .unwrap_or("export");
    let file = rfd::FileDialog::new()
        .set_title("Export data")
        .set_file_name(format!("{stem}.{}", format.extension()))
        .add_filter(format.label(), &[format.extension()])
        .save_file();

    if let Some(path) = file {
        match export_to_path(dataset, &path, format) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Export failed: {e:#}"));
            }
        }
    }
}
