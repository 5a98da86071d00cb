//! Plot configuration: ParsedData + technique → declarative [`PlotConfig`]s.
//!
//! Configs are plain serializable values. Nothing in this module knows about
//! a charting library; the viewer in `ui::plot` is one consumer.

pub mod builders;
pub mod config;
pub mod roles;

pub use builders::{
    create_battery_cycling_plot, create_bode_plot, create_chronoamperometry_plot,
    create_chronopotentiometry_plot, create_cv_plot, create_generic_plot, create_nyquist_plot,
    plots_for_technique, PlotConfigError,
};
pub use config::{Axis, AxisScale, Layout, PlotConfig, PlotKind, RenderMode, Trace, TraceStyle};
pub use roles::ColumnRole;
