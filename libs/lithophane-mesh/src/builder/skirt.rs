//! Skirt pass: walls from the relief perimeter down to the back plate.
//!
//! The perimeter is walked once as a closed loop, left (z ascending), bottom
//! (x ascending), right (z descending), top (x descending). Each perimeter
//! sample adds one vertex at back-plate height; consecutive ring vertices and
//! the two surface corners above them form one wall quad.

use super::corner::{X0Z0, X0Z1, X1Z0, X1Z1};
use super::GridLayout;
use crate::mesh::Mesh;
use crate::normals::{BOTTOM, LEFT, RIGHT, TOP};
use glam::DVec3;

/// One step of the perimeter loop.
struct PerimeterEdge {
    /// Surface vertex where the step starts.
    surface_start: u32,
    /// Surface vertex where the step ends.
    surface_end: u32,
    /// Back-plate point below `surface_start`.
    ring_point: DVec3,
    normal: DVec3,
}

/// Emits the skirt and returns the ring vertices at the four plate corners,
/// ordered `(0, 0)`, `(0, depth)`, `(width, depth)`, `(width, 0)` to match the
/// wall order.
pub(super) fn build_skirt(mesh: &mut Mesh, layout: &GridLayout, back: f64) -> [u32; 4] {
    let edges = perimeter(layout, back);
    let ring_start = mesh.vertex_count() as u32;
    for edge in &edges {
        mesh.add_vertex(edge.ring_point);
    }

    let ring_len = edges.len() as u32;
    for (i, edge) in edges.iter().enumerate() {
        let ring = ring_start + i as u32;
        let next_ring = ring_start + (i as u32 + 1) % ring_len;
        mesh.add_quad(
            [ring, next_ring, edge.surface_end, edge.surface_start],
            edge.normal,
        );
    }

    let (w, h) = (layout.width as u32, layout.height as u32);
    [
        ring_start,
        ring_start + h,
        ring_start + h + w,
        ring_start + 2 * h + w,
    ]
}

fn perimeter(layout: &GridLayout, back: f64) -> Vec<PerimeterEdge> {
    let (w, h) = (layout.width, layout.height);
    let mut edges = Vec::with_capacity(2 * (w + h));

    for z in 0..h {
        edges.push(PerimeterEdge {
            surface_start: layout.corner(0, z, X0Z0),
            surface_end: layout.corner(0, z, X0Z1),
            ring_point: layout.point(0, z, back),
            normal: LEFT,
        });
    }
    for x in 0..w {
        edges.push(PerimeterEdge {
            surface_start: layout.corner(x, h - 1, X0Z1),
            surface_end: layout.corner(x, h - 1, X1Z1),
            ring_point: layout.point(x, h, back),
            normal: BOTTOM,
        });
    }
    for z in (0..h).rev() {
        edges.push(PerimeterEdge {
            surface_start: layout.corner(w - 1, z, X1Z1),
            surface_end: layout.corner(w - 1, z, X1Z0),
            ring_point: layout.point(w, z + 1, back),
            normal: RIGHT,
        });
    }
    for x in (0..w).rev() {
        edges.push(PerimeterEdge {
            surface_start: layout.corner(x, 0, X1Z0),
            surface_end: layout.corner(x, 0, X0Z0),
            ring_point: layout.point(x + 1, 0, back),
            normal: TOP,
        });
    }

    edges
}
