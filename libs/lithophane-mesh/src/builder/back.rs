//! Back pass: four plate corners at y = 0, the plate's side bands up to the
//! skirt ring, and the underside.

use super::GridLayout;
use crate::mesh::Mesh;
use crate::normals::{BOTTOM, DOWN, LEFT, RIGHT, TOP};

/// Emits the back plate. `ring_corners` are the skirt ring vertices above the
/// plate corners, in the order returned by the skirt pass.
pub(super) fn build_back(mesh: &mut Mesh, layout: &GridLayout, ring_corners: [u32; 4]) {
    let (w, h) = (layout.width, layout.height);
    let floor = [
        mesh.add_vertex(layout.point(0, 0, 0.0)),
        mesh.add_vertex(layout.point(0, h, 0.0)),
        mesh.add_vertex(layout.point(w, h, 0.0)),
        mesh.add_vertex(layout.point(w, 0, 0.0)),
    ];

    for (side, normal) in [LEFT, BOTTOM, RIGHT, TOP].into_iter().enumerate() {
        let next = (side + 1) % 4;
        mesh.add_quad(
            [floor[side], floor[next], ring_corners[next], ring_corners[side]],
            normal,
        );
    }

    mesh.add_quad([floor[0], floor[3], floor[2], floor[1]], DOWN);
}
