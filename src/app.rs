use eframe::egui;
use echem_viewer::settings::Settings;

use crate::state::{AppState, View};
use crate::ui::{analysis, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EchemViewerApp {
    pub state: AppState,
}

impl EchemViewerApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }
}

impl eframe::App for EchemViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset summary + plot selection ----
        egui::SidePanel::left("dataset_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: analysis ----
        if self.state.dataset.is_some() {
            egui::SidePanel::right("analysis_panel")
                .default_width(260.0)
                .resizable(true)
                .show(ctx, |ui| {
                    analysis::analysis_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: plot or table ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Plot => plot::data_plot(ui, &self.state),
            View::Table => table::data_table(ui, &self.state),
        });
    }
}
