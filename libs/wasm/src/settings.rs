//! # Lithophane Settings
//!
//! JSON document the page sends with every generation request. Every field is
//! optional; missing fields fall back to [`LithophaneDefaults`].
//!
//! ```json
//! {
//!   "backThicknessMm": 0.4,
//!   "surfaceThicknessMm": 1.6,
//!   "sideLengthMm": 100,
//!   "sampleCount": 300,
//!   "layerHeightMm": 0.16,
//!   "snapToLayers": true,
//!   "brightness": 1.0,
//!   "contrast": 0,
//!   "debugColors": false
//! }
//! ```

use config::constants::{LithophaneDefaults, DEFAULT_BRIGHTNESS, DEFAULT_CONTRAST};
use lithophane_mesh::{LithophaneError, LithophaneResult};
use serde::{Deserialize, Serialize};

/// User-tunable generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LithophaneSettings {
    pub back_thickness_mm: f64,
    pub surface_thickness_mm: f64,
    /// Length of the longer side of the print.
    pub side_length_mm: f64,
    /// Samples along the longer image side.
    pub sample_count: usize,
    pub layer_height_mm: f64,
    /// Quantize relief heights to whole layers of `layer_height_mm`.
    pub snap_to_layers: bool,
    pub brightness: f64,
    pub contrast: f64,
    pub debug_colors: bool,
}

impl Default for LithophaneSettings {
    fn default() -> Self {
        let defaults = LithophaneDefaults::default();
        Self {
            back_thickness_mm: defaults.back_thickness_mm,
            surface_thickness_mm: defaults.surface_thickness_mm,
            side_length_mm: defaults.side_length_mm,
            sample_count: defaults.sample_count,
            layer_height_mm: defaults.layer_height_mm,
            snap_to_layers: false,
            brightness: DEFAULT_BRIGHTNESS,
            contrast: DEFAULT_CONTRAST,
            debug_colors: false,
        }
    }
}

impl LithophaneSettings {
    /// Parses a settings document. An empty or blank string yields the
    /// defaults.
    pub fn from_json(json: &str) -> LithophaneResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|err| LithophaneError::Settings(err.to_string()))
    }

    /// Checks the print dimensions against the shared defaults rules.
    pub fn validate(&self) -> LithophaneResult<()> {
        LithophaneDefaults::new(
            self.back_thickness_mm,
            self.surface_thickness_mm,
            self.side_length_mm,
            self.sample_count,
            self.layer_height_mm,
        )
        .map(|_| ())
        .map_err(|err| LithophaneError::Settings(err.to_string()))
    }
}
