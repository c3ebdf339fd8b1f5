//! # Mesh Builder
//!
//! Turns a height field into a closed solid in three passes:
//!
//! ```text
//! surface  stepped relief, one raised quad per sample plus seam walls
//! skirt    vertical walls from the relief perimeter down to the back plate
//! back     plate edges and the flat underside at y = 0
//! ```
//!
//! The build frame is y-up: x runs along sample rows, z along sample
//! columns, y is thickness.

mod back;
mod skirt;
mod surface;

use crate::error::LithophaneResult;
use crate::mesh::Mesh;
use crate::params::LithophaneSpec;
use config::constants::EPSILON;
use glam::DVec3;
use tracing::{debug, trace, warn};

/// Debug colour of skirt vertices.
const SKIRT_COLOR: [f32; 4] = [1.0, 0.6, 0.1, 1.0];
/// Debug colour of back plate vertices.
const BACK_COLOR: [f32; 4] = [0.2, 0.4, 1.0, 1.0];

/// Builds the lithophane solid.
///
/// # Errors
///
/// `InvalidDimensions` when the grid is smaller than 2×2 or a thickness or
/// size is out of range; `SampleCountMismatch` when the sample buffer does
/// not match the grid.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{build, expected_facet_count, expected_vertex_count};
/// use lithophane_mesh::{HeightField, LithophaneSpec};
///
/// let field = HeightField::new(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let mesh = build(&LithophaneSpec::new(&field, 10.0, 10.0, 2.0, 1.0)).unwrap();
/// assert_eq!(mesh.vertex_count(), expected_vertex_count(2, 2));
/// assert_eq!(mesh.facet_count(), expected_facet_count(2, 2));
/// ```
pub fn build(spec: &LithophaneSpec<'_>) -> LithophaneResult<Mesh> {
    if let Err(err) = spec.validate() {
        warn!(%err, "rejecting lithophane parameters");
        return Err(err);
    }

    let layout = GridLayout::new(spec);
    let heights: Vec<f64> = spec
        .height_field
        .samples()
        .iter()
        .map(|&sample| relief_height(sample, spec))
        .collect();

    let mut mesh = Mesh::with_capacity(
        expected_vertex_count(layout.width, layout.height),
        expected_facet_count(layout.width, layout.height),
    );

    surface::build_surface(&mut mesh, &layout, &heights);
    debug!(
        vertices = mesh.vertex_count(),
        facets = mesh.facet_count(),
        "surface pass done"
    );

    let ring_corners = skirt::build_skirt(&mut mesh, &layout, spec.back_thickness_mm);
    debug!(
        vertices = mesh.vertex_count(),
        facets = mesh.facet_count(),
        "skirt pass done"
    );

    back::build_back(&mut mesh, &layout, ring_corners);
    debug!(
        vertices = mesh.vertex_count(),
        facets = mesh.facet_count(),
        "back pass done"
    );

    if spec.debug_colors {
        mesh.set_colors(debug_colors(&layout, &heights, spec));
    }

    trace!(
        width = layout.width,
        height = layout.height,
        vertices = mesh.vertex_count(),
        facets = mesh.facet_count(),
        quantized = spec.layer_height_mm.is_some(),
        "lithophane built"
    );
    Ok(mesh)
}

/// Maps a normalized sample to its surface height, snapping the relief to
/// whole print layers when a layer height is set.
///
/// The relief above the back plate is rounded to the nearest layer (ties away
/// from zero) and never exceeds the number of whole layers that fit in the
/// surface thickness.
///
/// ```rust
/// use lithophane_mesh::{relief_height, HeightField, LithophaneSpec};
///
/// let field = HeightField::new(2, 2, vec![0.0; 4]).unwrap();
/// let spec = LithophaneSpec::new(&field, 10.0, 10.0, 2.0, 1.0).with_layer_height(0.5);
/// assert_eq!(relief_height(0.3, &spec), 1.5);
/// assert_eq!(relief_height(1.0, &spec), 3.0);
/// ```
pub fn relief_height(sample: f64, spec: &LithophaneSpec<'_>) -> f64 {
    let relief = sample * spec.surface_thickness_mm;
    let relief = match spec.layer_height_mm {
        Some(layer) => {
            let max_steps = (spec.surface_thickness_mm / layer + EPSILON).floor();
            let steps = (relief / layer).round();
            // NaN must survive, so no f64::min here.
            let steps = if steps > max_steps { max_steps } else { steps };
            steps * layer
        }
        None => relief,
    };
    spec.back_thickness_mm + relief
}

/// Vertex count of the solid built from a `width × height` grid.
///
/// Four per sample, one skirt vertex per perimeter sample, four back corners.
pub fn expected_vertex_count(width: usize, height: usize) -> usize {
    4 * width * height + 2 * (width + height) + 4
}

/// Facet count of the relief surface alone.
///
/// ```rust
/// use lithophane_mesh::surface_facet_count;
/// assert_eq!(surface_facet_count(2, 2), 16);
/// ```
pub fn surface_facet_count(width: usize, height: usize) -> usize {
    2 * width * height + 2 * width.saturating_sub(1) * height + 2 * width * height.saturating_sub(1)
}

/// Facet count of the complete solid built from a `width × height` grid.
pub fn expected_facet_count(width: usize, height: usize) -> usize {
    surface_facet_count(width, height) + 4 * (width + height) + 10
}

/// Index arithmetic and coordinates for one build.
///
/// Every sample owns four consecutive vertices starting at
/// `4 * (z * width + x)`, in the corner order below.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GridLayout {
    pub width: usize,
    pub height: usize,
    dx: f64,
    dz: f64,
}

/// Corner offsets within a sample's vertex block.
pub(crate) mod corner {
    pub const X0Z0: u32 = 0;
    pub const X1Z0: u32 = 1;
    pub const X1Z1: u32 = 2;
    pub const X0Z1: u32 = 3;
}

impl GridLayout {
    fn new(spec: &LithophaneSpec<'_>) -> Self {
        let width = spec.height_field.width();
        let height = spec.height_field.height();
        Self {
            width,
            height,
            dx: spec.width_mm / width as f64,
            dz: spec.height_mm / height as f64,
        }
    }

    /// First vertex of the block owned by sample `(x, z)`.
    #[inline]
    pub fn cell_base(&self, x: usize, z: usize) -> u32 {
        (4 * (z * self.width + x)) as u32
    }

    /// Index of one corner of sample `(x, z)`.
    #[inline]
    pub fn corner(&self, x: usize, z: usize, corner: u32) -> u32 {
        self.cell_base(x, z) + corner
    }

    /// x coordinate of grid line `i`.
    #[inline]
    pub fn grid_x(&self, i: usize) -> f64 {
        i as f64 * self.dx
    }

    /// z coordinate of grid line `i`.
    #[inline]
    pub fn grid_z(&self, i: usize) -> f64 {
        i as f64 * self.dz
    }

    /// Point on grid line intersection `(i, j)` at height `y`.
    #[inline]
    pub fn point(&self, i: usize, j: usize, y: f64) -> DVec3 {
        DVec3::new(self.grid_x(i), y, self.grid_z(j))
    }
}

fn debug_colors(layout: &GridLayout, heights: &[f64], spec: &LithophaneSpec<'_>) -> Vec<[f32; 4]> {
    let perimeter = 2 * (layout.width + layout.height);
    let mut colors = Vec::with_capacity(expected_vertex_count(layout.width, layout.height));
    for &height in heights {
        let t = ((height - spec.surface_min()) / spec.surface_thickness_mm) as f32;
        let shade = 1.0 - t;
        colors.extend([[shade, shade, shade, 1.0]; 4]);
    }
    colors.extend(std::iter::repeat(SKIRT_COLOR).take(perimeter));
    colors.extend([BACK_COLOR; 4]);
    colors
}

#[cfg(test)]
mod tests;
