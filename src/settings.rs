//! User-tunable defaults for the analysis panel.
//!
//! Read from `echem-viewer.json` in the working directory when present.
//! Every field is optional in the file:
//!
//! ```json
//! { "polynomial_order": 3, "prominence_fraction": 0.05 }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::fit::{DEFAULT_POLY_ORDER, MAX_POLY_ORDER, MIN_POLY_ORDER};
use crate::analysis::peaks::DEFAULT_PROMINENCE_FRACTION;

pub const SETTINGS_FILE: &str = "echem-viewer.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial polynomial order, clamped to the supported range.
    pub polynomial_order: usize,
    /// Peak prominence threshold as a fraction of the y-range.
    pub prominence_fraction: f64,
    /// Moving-average window in samples.
    pub smoothing_window: usize,
    /// Points used to draw a fitted curve.
    pub fit_curve_points: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            polynomial_order: DEFAULT_POLY_ORDER,
            prominence_fraction: DEFAULT_PROMINENCE_FRACTION,
            smoothing_window: 5,
            fit_curve_points: 200,
        }
    }
}

impl Settings {
    /// Parse settings JSON and clamp out-of-range values.
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text).context("parsing settings JSON")?;
        Ok(settings.sanitized())
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading {}", path.display()))
    }

    /// Load from the working directory, falling back to defaults on error.
    pub fn load_or_default() -> Self {
        match Self::load(Path::new(SETTINGS_FILE)) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        self.polynomial_order = self.polynomial_order.clamp(MIN_POLY_ORDER, MAX_POLY_ORDER);
        if !self.prominence_fraction.is_finite() || self.prominence_fraction < 0.0 {
            self.prominence_fraction = DEFAULT_PROMINENCE_FRACTION;
        }
        self.smoothing_window = self.smoothing_window.max(1);
        self.fit_curve_points = self.fit_curve_points.max(2);
        self
    }
}
