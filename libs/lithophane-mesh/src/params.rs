//! # Lithophane Parameters
//!
//! Physical description of the solid to build and the helpers that derive
//! physical size and sample counts from an image's aspect ratio.

use crate::error::{LithophaneError, LithophaneResult};
use crate::height_field::HeightField;
use config::constants::MIN_GRID_SAMPLES;
use serde::{Deserialize, Serialize};

/// Everything the builder needs: a borrowed height field plus physical
/// dimensions in millimeters.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{HeightField, LithophaneSpec};
///
/// let field = HeightField::new(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let spec = LithophaneSpec::new(&field, 10.0, 10.0, 2.0, 1.0).with_layer_height(0.2);
/// assert_eq!(spec.layer_height_mm, Some(0.2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LithophaneSpec<'a> {
    /// Normalized sample grid.
    pub height_field: &'a HeightField,
    /// Relief depth above the back plate.
    pub surface_thickness_mm: f64,
    /// Flat plate thickness under the relief.
    pub back_thickness_mm: f64,
    /// Physical extent along the sample rows (x).
    pub width_mm: f64,
    /// Physical extent along the sample columns (z).
    pub height_mm: f64,
    /// Snap relief heights to multiples of this value when set.
    pub layer_height_mm: Option<f64>,
    /// Attach a per-vertex debug colour channel to the mesh.
    pub debug_colors: bool,
}

impl<'a> LithophaneSpec<'a> {
    /// Creates parameters without layer quantization or debug colours.
    pub fn new(
        height_field: &'a HeightField,
        width_mm: f64,
        height_mm: f64,
        surface_thickness_mm: f64,
        back_thickness_mm: f64,
    ) -> Self {
        Self {
            height_field,
            surface_thickness_mm,
            back_thickness_mm,
            width_mm,
            height_mm,
            layer_height_mm: None,
            debug_colors: false,
        }
    }

    /// Creates parameters whose longer side measures `side_length_mm`, the
    /// other side following the grid's aspect ratio.
    ///
    /// ```rust
    /// use lithophane_mesh::{HeightField, LithophaneSpec};
    ///
    /// let field = HeightField::from_fn(4, 2, |_, _| 0.5);
    /// let spec = LithophaneSpec::from_side_length(&field, 100.0, 1.6, 0.4);
    /// assert_eq!((spec.width_mm, spec.height_mm), (100.0, 50.0));
    /// ```
    pub fn from_side_length(
        height_field: &'a HeightField,
        side_length_mm: f64,
        surface_thickness_mm: f64,
        back_thickness_mm: f64,
    ) -> Self {
        let size = PhysicalSize::fit_side_length(
            side_length_mm,
            height_field.width(),
            height_field.height(),
        );
        Self::new(
            height_field,
            size.width_mm,
            size.height_mm,
            surface_thickness_mm,
            back_thickness_mm,
        )
    }

    /// Sets the printer layer height used for quantization.
    pub fn with_layer_height(mut self, layer_height_mm: f64) -> Self {
        self.layer_height_mm = Some(layer_height_mm);
        self
    }

    /// Enables the debug vertex colour channel.
    pub fn with_debug_colors(mut self, enabled: bool) -> Self {
        self.debug_colors = enabled;
        self
    }

    /// Height of the flat back plate, where the relief starts.
    #[inline]
    pub fn surface_min(&self) -> f64 {
        self.back_thickness_mm
    }

    /// Highest point the relief can reach.
    #[inline]
    pub fn surface_max(&self) -> f64 {
        self.back_thickness_mm + self.surface_thickness_mm
    }

    /// Fails with `InvalidDimensions` or `SampleCountMismatch` when the
    /// builder cannot produce a solid from these parameters.
    ///
    /// Comparisons are written so that NaN fails them.
    pub fn validate(&self) -> LithophaneResult<()> {
        let field = self.height_field;
        if field.width() < MIN_GRID_SAMPLES || field.height() < MIN_GRID_SAMPLES {
            return Err(LithophaneError::invalid_dimensions(format!(
                "grid {}x{} is smaller than {MIN_GRID_SAMPLES}x{MIN_GRID_SAMPLES}",
                field.width(),
                field.height()
            )));
        }
        check_index_range(field.width(), field.height())?;
        let expected = field.width() * field.height();
        if field.len() != expected {
            return Err(LithophaneError::SampleCountMismatch {
                expected,
                actual: field.len(),
            });
        }
        if !(self.surface_thickness_mm > 0.0) {
            return Err(LithophaneError::invalid_dimensions(format!(
                "surface thickness must be positive: {}",
                self.surface_thickness_mm
            )));
        }
        if !(self.back_thickness_mm >= 0.0) {
            return Err(LithophaneError::invalid_dimensions(format!(
                "back thickness must not be negative: {}",
                self.back_thickness_mm
            )));
        }
        if !(self.width_mm > 0.0) || !(self.height_mm > 0.0) {
            return Err(LithophaneError::invalid_dimensions(format!(
                "physical size must be positive: {} x {}",
                self.width_mm, self.height_mm
            )));
        }
        if let Some(layer) = self.layer_height_mm {
            if !(layer > 0.0) {
                return Err(LithophaneError::invalid_dimensions(format!(
                    "layer height must be positive: {layer}"
                )));
            }
        }
        Ok(())
    }
}

/// Fails when a `width × height` grid would need vertex indices beyond
/// `u32::MAX`, or facet counts beyond what the platform can address.
fn check_index_range(width: usize, height: usize) -> LithophaneResult<()> {
    let vertices = width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(4))
        .and_then(|surface| {
            let perimeter = width.checked_add(height)?.checked_mul(2)?;
            surface.checked_add(perimeter)?.checked_add(4)
        });
    // Six facets per cell bound the surface and seams; walls and back follow.
    let facets = width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(6))
        .and_then(|n| {
            let walls = width.checked_add(height)?.checked_mul(4)?;
            n.checked_add(walls)?.checked_add(10)
        });
    match (vertices, facets) {
        (Some(vertices), Some(_)) if vertices <= u32::MAX as usize => Ok(()),
        _ => Err(LithophaneError::invalid_dimensions(format!(
            "grid {width}x{height} needs more than {} vertex indices",
            u32::MAX
        ))),
    }
}

/// Physical footprint of the lithophane in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    /// Extent along the sample rows.
    pub width_mm: f64,
    /// Extent along the sample columns.
    pub height_mm: f64,
}

impl PhysicalSize {
    /// Fits a `width × height` grid into a square of `side_length_mm`,
    /// keeping the aspect ratio. The longer side gets the full length.
    pub fn fit_side_length(side_length_mm: f64, width: usize, height: usize) -> Self {
        let aspect = width as f64 / height as f64;
        if aspect > 1.0 {
            Self {
                width_mm: side_length_mm,
                height_mm: side_length_mm / aspect,
            }
        } else if aspect < 1.0 {
            Self {
                width_mm: side_length_mm * aspect,
                height_mm: side_length_mm,
            }
        } else {
            Self {
                width_mm: side_length_mm,
                height_mm: side_length_mm,
            }
        }
    }
}

/// Number of samples to take along each axis of an image.
///
/// The longer side receives `sample_count` samples; the shorter side is scaled
/// by the aspect ratio and never drops below two samples.
///
/// ```rust
/// use lithophane_mesh::sample_grid_size;
///
/// assert_eq!(sample_grid_size(300, 1920, 1080), (300, 169));
/// assert_eq!(sample_grid_size(300, 10, 1000), (3, 300));
/// ```
pub fn sample_grid_size(sample_count: usize, image_width: usize, image_height: usize) -> (usize, usize) {
    let aspect = image_width as f64 / image_height as f64;
    let scaled = |factor: f64| ((sample_count as f64 * factor).round() as usize).max(MIN_GRID_SAMPLES);
    if aspect < 1.0 {
        (scaled(aspect), sample_count)
    } else if aspect > 1.0 {
        (sample_count, scaled(1.0 / aspect))
    } else {
        (sample_count, sample_count)
    }
}
