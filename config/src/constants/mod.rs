//! Centralized configuration values shared across the lithophane pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used when snapping heights to print layers so that a thickness which is an
/// exact multiple of the layer height does not lose its last layer to
/// rounding noise.
///
/// # Examples
/// ```
/// use config::constants::EPSILON;
/// assert!(EPSILON < 1.0e-6);
/// ```
pub const EPSILON: f64 = 1.0e-9;

// =============================================================================
// GRID CONSTANTS
// =============================================================================

/// Smallest number of samples a height field may have along either axis.
///
/// # Examples
/// ```
/// use config::constants::MIN_GRID_SAMPLES;
/// assert_eq!(MIN_GRID_SAMPLES, 2);
/// ```
pub const MIN_GRID_SAMPLES: usize = 2;

/// Default number of samples along the longer side of the source image.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_SAMPLE_COUNT, MIN_GRID_SAMPLES};
/// assert!(DEFAULT_SAMPLE_COUNT >= MIN_GRID_SAMPLES);
/// ```
pub const DEFAULT_SAMPLE_COUNT: usize = 300;

/// Largest number of samples accepted along the longer image side.
///
/// A square grid this size builds about four million vertices, which still
/// fits a wasm32 heap alongside its binary STL.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_SAMPLE_COUNT, MAX_SAMPLE_COUNT};
/// assert!(DEFAULT_SAMPLE_COUNT <= MAX_SAMPLE_COUNT);
/// ```
pub const MAX_SAMPLE_COUNT: usize = 1000;

// =============================================================================
// PRINT DEFAULTS
// =============================================================================

/// Default thickness of the flat back plate in millimeters.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_BACK_THICKNESS_MM;
/// assert!(DEFAULT_BACK_THICKNESS_MM >= 0.0);
/// ```
pub const DEFAULT_BACK_THICKNESS_MM: f64 = 0.4;

/// Default relief depth above the back plate in millimeters.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_SURFACE_THICKNESS_MM;
/// assert!(DEFAULT_SURFACE_THICKNESS_MM > 0.0);
/// ```
pub const DEFAULT_SURFACE_THICKNESS_MM: f64 = 1.6;

/// Default length of the longer physical side in millimeters.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_SIDE_LENGTH_MM;
/// assert!(DEFAULT_SIDE_LENGTH_MM > 0.0);
/// ```
pub const DEFAULT_SIDE_LENGTH_MM: f64 = 100.0;

/// Default printer layer height used for height quantization.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_LAYER_HEIGHT_MM;
/// assert!(DEFAULT_LAYER_HEIGHT_MM > 0.0);
/// ```
pub const DEFAULT_LAYER_HEIGHT_MM: f64 = 0.16;

/// Default brightness multiplier applied to grayscale pixels.
pub const DEFAULT_BRIGHTNESS: f64 = 1.0;

/// Default contrast offset, in the range `-255..=255`.
pub const DEFAULT_CONTRAST: f64 = 0.0;

/// ITU-R BT.601 luma weights for red, green and blue.
///
/// # Examples
/// ```
/// use config::constants::GRAYSCALE_WEIGHTS;
/// let sum: f64 = GRAYSCALE_WEIGHTS.iter().sum();
/// assert!((sum - 1.0).abs() < 1.0e-3);
/// ```
pub const GRAYSCALE_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

// =============================================================================
// STL LAYOUT
// =============================================================================

/// Size of the binary STL header in bytes.
pub const STL_HEADER_LEN: usize = 80;

/// Size of the little-endian facet count that follows the header.
pub const STL_COUNT_LEN: usize = 4;

/// Size of one binary STL facet record: 12 `f32` values plus a `u16`
/// attribute byte count.
///
/// # Examples
/// ```
/// use config::constants::STL_FACET_RECORD_LEN;
/// assert_eq!(STL_FACET_RECORD_LEN, 12 * 4 + 2);
/// ```
pub const STL_FACET_RECORD_LEN: usize = 50;

/// Text written at the start of every binary STL header.
///
/// # Examples
/// ```
/// use config::constants::{STL_HEADER_LEN, STL_HEADER_TEXT};
/// assert!(STL_HEADER_TEXT.len() <= STL_HEADER_LEN);
/// ```
pub const STL_HEADER_TEXT: &str = "lithophane-mesh binary STL";

// =============================================================================
// DEFAULTS SNAPSHOT
// =============================================================================

/// Immutable snapshot of print defaults that can be shared between crates.
///
/// # Examples
/// ```
/// use config::constants::LithophaneDefaults;
/// let defaults = LithophaneDefaults::default();
/// assert!(defaults.surface_thickness_mm > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LithophaneDefaults {
    /// Back plate thickness in millimeters.
    pub back_thickness_mm: f64,
    /// Relief depth in millimeters.
    pub surface_thickness_mm: f64,
    /// Length of the longer physical side in millimeters.
    pub side_length_mm: f64,
    /// Samples along the longer image side.
    pub sample_count: usize,
    /// Printer layer height in millimeters.
    pub layer_height_mm: f64,
}

impl LithophaneDefaults {
    /// Builds a defaults snapshot, rejecting values the mesh builder would
    /// refuse later anyway.
    ///
    /// # Examples
    /// ```
    /// use config::constants::LithophaneDefaults;
    /// let defaults = LithophaneDefaults::new(0.8, 2.4, 120.0, 200, 0.2).expect("valid defaults");
    /// assert_eq!(defaults.sample_count, 200);
    /// ```
    pub fn new(
        back_thickness_mm: f64,
        surface_thickness_mm: f64,
        side_length_mm: f64,
        sample_count: usize,
        layer_height_mm: f64,
    ) -> Result<Self, ConfigError> {
        if !(back_thickness_mm >= 0.0) {
            return Err(ConfigError::InvalidThickness(back_thickness_mm));
        }
        if !(surface_thickness_mm > 0.0) {
            return Err(ConfigError::InvalidThickness(surface_thickness_mm));
        }
        if !(side_length_mm > 0.0) {
            return Err(ConfigError::InvalidSideLength(side_length_mm));
        }
        if !(MIN_GRID_SAMPLES..=MAX_SAMPLE_COUNT).contains(&sample_count) {
            return Err(ConfigError::InvalidSampleCount(sample_count));
        }
        if !(layer_height_mm > 0.0) {
            return Err(ConfigError::InvalidLayerHeight(layer_height_mm));
        }
        Ok(Self {
            back_thickness_mm,
            surface_thickness_mm,
            side_length_mm,
            sample_count,
            layer_height_mm,
        })
    }
}

impl Default for LithophaneDefaults {
    fn default() -> Self {
        Self {
            back_thickness_mm: DEFAULT_BACK_THICKNESS_MM,
            surface_thickness_mm: DEFAULT_SURFACE_THICKNESS_MM,
            side_length_mm: DEFAULT_SIDE_LENGTH_MM,
            sample_count: DEFAULT_SAMPLE_COUNT,
            layer_height_mm: DEFAULT_LAYER_HEIGHT_MM,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when a thickness is negative, or zero for the relief.
    InvalidThickness(f64),
    /// Raised when the side length is zero or negative.
    InvalidSideLength(f64),
    /// Raised when fewer than two or more than `MAX_SAMPLE_COUNT` samples
    /// are requested.
    InvalidSampleCount(usize),
    /// Raised when the layer height is zero or negative.
    InvalidLayerHeight(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidThickness(value) => {
                write!(f, "thickness out of range: {value}")
            }
            ConfigError::InvalidSideLength(value) => {
                write!(f, "side length must be positive: {value}")
            }
            ConfigError::InvalidSampleCount(value) => {
                write!(
                    f,
                    "sample count must lie in {MIN_GRID_SAMPLES}..={MAX_SAMPLE_COUNT}: {value}"
                )
            }
            ConfigError::InvalidLayerHeight(value) => {
                write!(f, "layer height must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
