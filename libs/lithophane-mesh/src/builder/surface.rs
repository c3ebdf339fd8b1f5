//! Surface pass: one flat quad per sample and vertical seams between
//! neighbouring samples.

use super::corner::{X0Z0, X0Z1, X1Z0, X1Z1};
use super::GridLayout;
use crate::mesh::Mesh;
use crate::normals::{column_seam_normal, row_seam_normal, UP};

/// Emits the relief. `heights` holds the final surface height of every
/// sample in row-major order.
pub(super) fn build_surface(mesh: &mut Mesh, layout: &GridLayout, heights: &[f64]) {
    let width = layout.width;
    for z in 0..layout.height {
        for x in 0..width {
            let h = heights[z * width + x];
            let base = mesh.add_vertex(layout.point(x, z, h));
            mesh.add_vertex(layout.point(x + 1, z, h));
            mesh.add_vertex(layout.point(x + 1, z + 1, h));
            mesh.add_vertex(layout.point(x, z + 1, h));
            debug_assert_eq!(base, layout.cell_base(x, z));

            let c = |corner: u32| layout.corner(x, z, corner);
            mesh.add_quad([c(X0Z0), c(X0Z1), c(X1Z1), c(X1Z0)], UP);

            if z > 0 {
                let previous = heights[(z - 1) * width + x];
                let p = |corner: u32| layout.corner(x, z - 1, corner);
                mesh.add_quad(
                    [p(X0Z1), c(X0Z0), c(X1Z0), p(X1Z1)],
                    row_seam_normal(previous, h),
                );
            }

            if x > 0 {
                let left = heights[z * width + x - 1];
                let l = |corner: u32| layout.corner(x - 1, z, corner);
                mesh.add_quad(
                    [l(X1Z0), l(X1Z1), c(X0Z1), c(X0Z0)],
                    column_seam_normal(left, h),
                );
            }
        }
    }
}
