use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Plot specification – a plain value the renderer consumes
// ---------------------------------------------------------------------------

/// Plot family, serialized as the `type` tag of a [`PlotConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    CvPlot,
    Nyquist,
    Bode,
    BatteryCycling,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Source column in the dataset.
    pub column: String,
    pub label: String,
    pub scale: AxisScale,
}

impl Axis {
    pub fn linear(column: &str, label: impl Into<String>) -> Self {
        Axis {
            column: column.to_string(),
            label: label.into(),
            scale: AxisScale::Linear,
        }
    }

    pub fn log(column: &str, label: impl Into<String>) -> Self {
        Axis {
            scale: AxisScale::Log,
            ..Axis::linear(column, label)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Lines,
    Markers,
    LinesMarkers,
}

impl RenderMode {
    pub fn has_lines(self) -> bool {
        matches!(self, RenderMode::Lines | RenderMode::LinesMarkers)
    }

    pub fn has_markers(self) -> bool {
        matches!(self, RenderMode::Markers | RenderMode::LinesMarkers)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStyle {
    /// `#rrggbb` colour.
    pub color: String,
    pub line_width: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_size: Option<f32>,
}

/// One data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: RenderMode,
    pub name: String,
    pub style: TraceStyle,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Declarative rendering hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// Draw the x = 0 / y = 0 lines.
    pub zero_lines: bool,
    /// Lock the y-axis to the x-axis with a 1:1 scale ratio.
    pub equal_aspect: bool,
    pub show_legend: bool,
    pub hover_mode: String,
}

impl Layout {
    pub fn new(title: impl Into<String>, x_title: &str, y_title: &str) -> Self {
        Layout {
            title: title.into(),
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            zero_lines: false,
            equal_aspect: false,
            show_legend: false,
            hover_mode: "closest".to_string(),
        }
    }
}

/// A complete, renderer-agnostic plot description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    #[serde(rename = "type")]
    pub kind: PlotKind,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl PlotConfig {
    pub fn title(&self) -> &str {
        &self.layout.title
    }
}
