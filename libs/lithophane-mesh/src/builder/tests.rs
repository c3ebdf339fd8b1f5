//! Tests for the three build passes.

use super::*;
use crate::error::LithophaneError;
use crate::height_field::HeightField;
use crate::normals::{BOTTOM, DOWN, LEFT, RIGHT, TOP, UP};
use approx::assert_relative_eq;

fn checker() -> HeightField {
    HeightField::new(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap()
}

fn surface_heights(mesh: &Mesh, width: usize, height: usize) -> Vec<f64> {
    mesh.vertices()[..4 * width * height]
        .iter()
        .map(|v| v.y)
        .collect()
}

/// 2×2 checkerboard, back 1 mm, relief 2 mm.
#[test]
fn checkerboard_scenario() {
    let field = checker();
    let spec = LithophaneSpec::new(&field, 10.0, 10.0, 2.0, 1.0);
    let mesh = build(&spec).unwrap();

    let heights = surface_heights(&mesh, 2, 2);
    assert_eq!(heights.len(), 16);
    let per_cell: Vec<f64> = heights.chunks(4).map(|c| c[0]).collect();
    assert_eq!(per_cell, vec![1.0, 3.0, 3.0, 1.0]);
    for cell in heights.chunks(4) {
        assert!(cell.iter().all(|&y| y == cell[0]));
    }

    assert_eq!(surface_facet_count(2, 2), 8 + 4 + 4);
    assert_eq!(mesh.facet_count(), 16 + 16 + 10);
    assert_eq!(mesh.vertex_count(), 16 + 8 + 4);
}

#[test]
fn counts_match_closed_form() {
    for (w, h) in [(2, 2), (2, 5), (7, 3), (10, 10)] {
        let field = HeightField::from_fn(w, h, |x, z| ((x * 7 + z * 3) % 5) as f64 / 4.0);
        let mesh = build(&LithophaneSpec::new(&field, 40.0, 25.0, 1.6, 0.4)).unwrap();
        assert_eq!(mesh.vertex_count(), expected_vertex_count(w, h), "{w}x{h}");
        assert_eq!(mesh.facet_count(), expected_facet_count(w, h), "{w}x{h}");
    }
}

#[test]
fn surface_vertices_follow_cell_layout() {
    let field = HeightField::from_fn(3, 2, |x, z| (x + z) as f64 / 3.0);
    let spec = LithophaneSpec::new(&field, 30.0, 20.0, 3.0, 1.0);
    let mesh = build(&spec).unwrap();
    let layout = GridLayout::new(&spec);

    let v = mesh.vertices();
    let base = layout.cell_base(2, 1) as usize;
    assert_eq!(base, 4 * 5);
    assert_eq!(v[base + corner::X0Z0 as usize], DVec3::new(20.0, 4.0, 10.0));
    assert_eq!(v[base + corner::X1Z0 as usize], DVec3::new(30.0, 4.0, 10.0));
    assert_eq!(v[base + corner::X1Z1 as usize], DVec3::new(30.0, 4.0, 20.0));
    assert_eq!(v[base + corner::X0Z1 as usize], DVec3::new(20.0, 4.0, 20.0));
}

#[test]
fn seam_normals_point_to_lower_side() {
    // Column 1 is raised, so its seam with column 0 faces -X; row 1 is lower
    // than row 0, so the row seam faces +Z.
    let field = HeightField::new(2, 2, vec![0.5, 1.0, 0.0, 0.0]).unwrap();
    let mesh = build(&LithophaneSpec::new(&field, 2.0, 2.0, 1.0, 0.0)).unwrap();
    let facets = mesh.facets();

    // Cell (1, 0): top (2) + column seam (2).
    assert_eq!(facets[2].normal, UP);
    assert_eq!(facets[4].normal, DVec3::NEG_X);
    // Cell (0, 1): top (2) + row seam (2).
    assert_eq!(facets[8].normal, DVec3::Z);
    assert!(mesh.validate());
}

#[test]
fn skirt_and_back_normals() {
    let field = HeightField::from_fn(3, 2, |_, _| 1.0);
    let mesh = build(&LithophaneSpec::new(&field, 3.0, 2.0, 1.0, 0.5)).unwrap();
    let skirt_start = surface_facet_count(3, 2);
    let normals: Vec<DVec3> = mesh.facets()[skirt_start..].iter().map(|f| f.normal).collect();

    // Two facets per perimeter sample: left (2), bottom (3), right (2), top (3).
    let expected_skirt: Vec<DVec3> = [(LEFT, 2), (BOTTOM, 3), (RIGHT, 2), (TOP, 3)]
        .into_iter()
        .flat_map(|(n, count)| std::iter::repeat(n).take(2 * count))
        .collect();
    assert_eq!(normals[..20], expected_skirt[..]);
    assert_eq!(
        normals[20..],
        [LEFT, LEFT, BOTTOM, BOTTOM, RIGHT, RIGHT, TOP, TOP, DOWN, DOWN][..]
    );
    assert!(mesh.validate());
}

#[test]
fn back_corners_span_footprint() {
    let field = checker();
    let mesh = build(&LithophaneSpec::new(&field, 12.0, 8.0, 2.0, 1.0)).unwrap();
    let corners = &mesh.vertices()[mesh.vertex_count() - 4..];
    assert_eq!(
        corners,
        &[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 8.0),
            DVec3::new(12.0, 0.0, 8.0),
            DVec3::new(12.0, 0.0, 0.0),
        ]
    );
    let (min, max) = mesh.bounding_box();
    assert_eq!(min, DVec3::ZERO);
    assert_eq!(max, DVec3::new(12.0, 3.0, 8.0));
}

#[test]
fn skirt_ring_sits_at_back_height() {
    let field = HeightField::from_fn(4, 3, |x, _| x as f64 / 3.0);
    let mesh = build(&LithophaneSpec::new(&field, 8.0, 6.0, 2.0, 0.75)).unwrap();
    let start = 4 * 4 * 3;
    let ring = &mesh.vertices()[start..start + 2 * (4 + 3)];
    assert!(ring.iter().all(|v| v.y == 0.75));
    assert_eq!(ring[0], DVec3::new(0.0, 0.75, 0.0));
    assert_eq!(ring[3], DVec3::new(0.0, 0.75, 6.0));
    assert_eq!(ring[7], DVec3::new(8.0, 0.75, 6.0));
    assert_eq!(ring[10], DVec3::new(8.0, 0.75, 0.0));
}

#[test]
fn flat_field_is_plate_without_nan() {
    let field = HeightField::from_fn(5, 4, |_, _| 0.0);
    let mesh = build(&LithophaneSpec::new(&field, 50.0, 40.0, 2.0, 1.2)).unwrap();
    assert!(surface_heights(&mesh, 5, 4).iter().all(|&y| y == 1.2));
    assert!(mesh.facets().iter().all(|f| f.normal.is_finite()));
    assert!(mesh.validate());
    assert_relative_eq!(mesh.signed_volume(), 50.0 * 40.0 * 1.2, max_relative = 1e-9);
}

#[test]
fn volume_matches_column_sum() {
    let field = HeightField::from_fn(6, 4, |x, z| ((x * 13 + z * 5) % 7) as f64 / 6.0);
    let spec = LithophaneSpec::new(&field, 30.0, 20.0, 2.0, 0.5);
    let mesh = build(&spec).unwrap();
    let cell_area = (30.0 / 6.0) * (20.0 / 4.0);
    let expected: f64 = field
        .samples()
        .iter()
        .map(|&s| relief_height(s, &spec) * cell_area)
        .sum();
    assert_relative_eq!(mesh.signed_volume(), expected, max_relative = 1e-9);
}

#[test]
fn layer_quantization_snaps_relief() {
    let field = HeightField::from_fn(8, 3, |x, z| (x + 8 * z) as f64 / 23.0);
    let spec = LithophaneSpec::new(&field, 8.0, 3.0, 1.6, 0.4).with_layer_height(0.16);
    let mesh = build(&spec).unwrap();
    for y in surface_heights(&mesh, 8, 3) {
        let steps = (y - 0.4) / 0.16;
        assert_relative_eq!(steps, steps.round(), epsilon = 1e-6);
        assert!(steps.round() >= 0.0);
        assert!(y <= 0.4 + 1.6 + 1e-9);
    }
}

#[test]
fn quantization_rounds_half_away_from_zero() {
    let field = checker();
    let spec = LithophaneSpec::new(&field, 1.0, 1.0, 4.0, 0.0).with_layer_height(1.0);
    assert_eq!(relief_height(0.125, &spec), 1.0);
    assert_eq!(relief_height(0.375, &spec), 2.0);
    assert_eq!(relief_height(0.1, &spec), 0.0);
}

#[test]
fn quantization_never_exceeds_surface_max() {
    let field = checker();
    // 1.0 mm does not hold a whole number of 0.3 mm layers.
    let spec = LithophaneSpec::new(&field, 1.0, 1.0, 1.0, 0.2).with_layer_height(0.3);
    let top = relief_height(1.0, &spec);
    assert_relative_eq!(top, 0.2 + 0.9, epsilon = 1e-12);
    assert!(top <= spec.surface_max());
}

#[test]
fn surface_stays_within_range_for_unit_samples() {
    let field = HeightField::from_fn(9, 9, |x, z| ((x * z) % 9) as f64 / 8.0);
    let spec = LithophaneSpec::new(&field, 9.0, 9.0, 2.5, 0.6);
    let mesh = build(&spec).unwrap();
    for y in surface_heights(&mesh, 9, 9) {
        assert!(y >= spec.surface_min() && y <= spec.surface_max());
    }
}

#[test]
fn nan_samples_propagate() {
    let field = HeightField::new(2, 2, vec![f64::NAN, 0.0, 0.0, 0.0]).unwrap();
    let spec = LithophaneSpec::new(&field, 1.0, 1.0, 1.0, 0.0).with_layer_height(0.1);
    let mesh = build(&spec).unwrap();
    assert!(mesh.vertices()[0].y.is_nan());
}

#[test]
fn build_is_deterministic() {
    let field = HeightField::from_fn(5, 5, |x, z| ((x as f64) * 0.37 + (z as f64) * 0.11).fract());
    let spec = LithophaneSpec::new(&field, 17.3, 17.3, 1.9, 0.3).with_layer_height(0.12);
    assert_eq!(build(&spec).unwrap(), build(&spec).unwrap());
}

#[test]
fn build_rejects_invalid_dimensions() {
    let narrow = HeightField::from_fn(1, 4, |_, _| 0.5);
    let err = build(&LithophaneSpec::new(&narrow, 10.0, 10.0, 2.0, 1.0)).unwrap_err();
    assert!(matches!(err, LithophaneError::InvalidDimensions { .. }));

    let field = checker();
    let err = build(&LithophaneSpec::new(&field, 10.0, 10.0, 2.0, -1.0)).unwrap_err();
    assert!(matches!(err, LithophaneError::InvalidDimensions { .. }));
}

#[test]
fn debug_colors_cover_every_vertex() {
    let field = checker();
    let spec = LithophaneSpec::new(&field, 10.0, 10.0, 2.0, 1.0).with_debug_colors(true);
    let mesh = build(&spec).unwrap();
    let colors = mesh.colors().unwrap();
    assert_eq!(colors.len(), mesh.vertex_count());
    // Raised cell is black, flat cell white.
    assert_eq!(colors[0], [1.0, 1.0, 1.0, 1.0]);
    assert_eq!(colors[4], [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(colors[16], SKIRT_COLOR);
    assert_eq!(colors[colors.len() - 1], BACK_COLOR);

    let plain = build(&spec.with_debug_colors(false)).unwrap();
    assert!(plain.colors().is_none());
}
