use echem_viewer::analysis::{
    self, correct_baseline, derivative, find_peaks, moving_average, FitKind, FitResult, Peak,
    PeakOptions, Statistics,
};
use echem_viewer::data::columns::{numeric_columns, paired_by_name};
use echem_viewer::data::ParsedData;
use echem_viewer::plotting::{create_generic_plot, plots_for_technique, PlotConfig};
use echem_viewer::settings::Settings;

// ---------------------------------------------------------------------------
// Analysis panel state
// ---------------------------------------------------------------------------

/// A derived series shown next to the selected columns (smoothed,
/// derivative, baseline-corrected).
#[derive(Debug, Clone)]
pub struct ProcessedSeries {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Each result slot is independent: a failed fit leaves statistics and
/// peaks from earlier runs untouched.
#[derive(Debug, Clone)]
pub struct AnalysisState {
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    pub fit_kind: FitKind,
    pub polynomial_order: usize,
    pub fit: Option<Result<FitResult, String>>,
    pub statistics: Option<Result<Statistics, String>>,
    pub peaks: Option<Result<Vec<Peak>, String>>,
    pub processed: Option<Result<ProcessedSeries, String>>,
}

impl AnalysisState {
    fn new(settings: &Settings) -> Self {
        Self {
            x_column: None,
            y_column: None,
            fit_kind: FitKind::Linear,
            polynomial_order: settings.polynomial_order,
            fit: None,
            statistics: None,
            peaks: None,
            processed: None,
        }
    }

    fn clear_results(&mut self) {
        self.fit = None;
        self.statistics = None;
        self.peaks = None;
        self.processed = None;
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Plot,
    Table,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<ParsedData>,

    /// File name the dataset came from.
    pub source_name: Option<String>,

    /// Plots built for the detected technique.
    pub plots: Vec<PlotConfig>,

    /// Technique plots that could not be built, as messages.
    pub plot_errors: Vec<String>,

    /// Index into `plots`; `plots.len()` selects the generic XY plot.
    pub selected_plot: usize,

    pub generic_x: Option<String>,
    pub generic_y: Option<String>,
    pub generic_plot: Option<Result<PlotConfig, String>>,

    pub analysis: AnalysisState,

    pub view: View,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let analysis = AnalysisState::new(&settings);
        Self {
            settings,
            dataset: None,
            source_name: None,
            plots: Vec::new(),
            plot_errors: Vec::new(),
            selected_plot: 0,
            generic_x: None,
            generic_y: None,
            generic_plot: None,
            analysis,
            view: View::Plot,
            status_message: None,
        }
    }

    /// Ingest a newly parsed dataset: build its technique plots and pick
    /// default columns for the generic plot and analysis panel.
    pub fn set_dataset(&mut self, dataset: ParsedData, source_name: String) {
        self.plots.clear();
        self.plot_errors.clear();
        for result in plots_for_technique(&dataset) {
            match result {
                Ok(plot) => self.plots.push(plot),
                Err(e) => {
                    log::warn!("Skipping plot for {source_name}: {e}");
                    self.plot_errors.push(e.to_string());
                }
            }
        }
        self.selected_plot = 0;

        let numeric: Vec<String> = numeric_columns(&dataset.data)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.generic_x = numeric.first().cloned();
        self.generic_y = numeric.get(1).or(numeric.first()).cloned();
        self.analysis.x_column = self.generic_x.clone();
        self.analysis.y_column = self.generic_y.clone();
        self.analysis.clear_results();

        self.dataset = Some(dataset);
        self.source_name = Some(source_name);
        self.rebuild_generic_plot();
        self.status_message = None;
    }

    /// Rebuild the generic XY plot from the selected columns.
    pub fn rebuild_generic_plot(&mut self) {
        self.generic_plot = match (&self.dataset, &self.generic_x, &self.generic_y) {
            (Some(ds), Some(x), Some(y)) => {
                Some(create_generic_plot(ds, x, y).map_err(|e| e.to_string()))
            }
            _ => None,
        };
    }

    /// The plot currently selected for display.
    pub fn current_plot(&self) -> Option<Result<&PlotConfig, &str>> {
        if let Some(plot) = self.plots.get(self.selected_plot) {
            return Some(Ok(plot));
        }
        self.generic_plot
            .as_ref()
            .map(|r| r.as_ref().map_err(String::as_str))
    }

    /// Aligned numeric series of the analysis columns.
    fn analysis_series(&self) -> Result<(Vec<f64>, Vec<f64>), String> {
        let ds = self.dataset.as_ref().ok_or("no dataset loaded")?;
        let (x, y) = match (&self.analysis.x_column, &self.analysis.y_column) {
            (Some(x), Some(y)) => (x, y),
            _ => return Err("select x and y columns".to_string()),
        };
        paired_by_name(&ds.data, x, y).ok_or_else(|| format!("columns '{x}' / '{y}' not found"))
    }

    pub fn run_fit(&mut self) {
        let order = self.analysis.polynomial_order;
        let kind = self.analysis.fit_kind;
        let result = self.analysis_series().and_then(|(x, y)| {
            analysis::fit(kind, &x, &y, order).map_err(|e| e.to_string())
        });
        if let Err(e) = &result {
            log::warn!("{kind} fit failed: {e}");
        }
        self.analysis.fit = Some(result);
    }

    pub fn run_statistics(&mut self) {
        let result = self.analysis_series().and_then(|(_, y)| {
            analysis::calculate_statistics(&y).map_err(|e| e.to_string())
        });
        self.analysis.statistics = Some(result);
    }

    pub fn run_peaks(&mut self) {
        let fraction = self.settings.prominence_fraction;
        let result = self.analysis_series().and_then(|(x, y)| {
            let options = PeakOptions::relative(&y, fraction);
            find_peaks(&x, &y, options).map_err(|e| e.to_string())
        });
        self.analysis.peaks = Some(result);
    }

    pub fn run_smoothing(&mut self) {
        let window = self.settings.smoothing_window;
        self.run_processing(format!("smoothed (window {window})"), |_, y| {
            moving_average(y, window)
        });
    }

    pub fn run_derivative(&mut self) {
        self.run_processing("derivative".to_string(), derivative);
    }

    pub fn run_baseline(&mut self) {
        self.run_processing("baseline corrected".to_string(), correct_baseline);
    }

    fn run_processing(
        &mut self,
        label: String,
        op: impl FnOnce(&[f64], &[f64]) -> Result<Vec<f64>, analysis::FitError>,
    ) {
        let y_name = self.analysis.y_column.clone().unwrap_or_default();
        let result = self.analysis_series().and_then(|(x, y)| {
            let processed = op(&x, &y).map_err(|e| e.to_string())?;
            Ok(ProcessedSeries {
                name: format!("{y_name} {label}"),
                x,
                y: processed,
            })
        });
        self.analysis.processed = Some(result);
    }

    /// Analysis overlays apply when the displayed plot draws the same
    /// columns the analysis panel works on.
    pub fn overlays_match(&self, plot: &PlotConfig) -> bool {
        self.analysis.x_column.as_deref() == Some(plot.x_axis.column.as_str())
            && self.analysis.y_column.as_deref() == Some(plot.y_axis.column.as_str())
            && plot.kind != echem_viewer::plotting::PlotKind::Nyquist
    }
}
