//! Watertightness checks on built solids.
//!
//! Stepped seams meet the skirt and back plate in collinear T-junctions, so a
//! plain "every edge shared by exactly two facets" count does not apply.
//! Instead every axis-aligned edge is split at all breakpoints on its line and
//! the signed coverage of each piece must cancel; diagonal edges must pair up
//! exactly.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use glam::DVec3;
use lithophane_mesh::{build, relief_height, HeightField, LithophaneSpec, Mesh};

type Bits = [u64; 3];

fn bits(p: DVec3) -> Bits {
    // + 0.0 folds -0.0 into 0.0.
    [(p.x + 0.0).to_bits(), (p.y + 0.0).to_bits(), (p.z + 0.0).to_bits()]
}

/// Line key: axis plus the two fixed coordinates.
type LineKey = (usize, u64, u64);

#[derive(Default)]
struct Chain {
    lines: BTreeMap<LineKey, Vec<(f64, f64)>>,
    diagonals: BTreeMap<(Bits, Bits), i64>,
}

impl Chain {
    fn add_edge(&mut self, a: DVec3, b: DVec3) {
        let (ka, kb) = (bits(a), bits(b));
        if ka == kb {
            return;
        }
        let same: Vec<usize> = (0..3).filter(|&i| ka[i] == kb[i]).collect();
        if same.len() == 2 {
            let axis = 3 - same[0] - same[1];
            let key = (axis, ka[same[0]], ka[same[1]]);
            self.lines.entry(key).or_default().push((a[axis], b[axis]));
        } else if ka < kb {
            *self.diagonals.entry((ka, kb)).or_default() += 1;
        } else {
            *self.diagonals.entry((kb, ka)).or_default() -= 1;
        }
    }

    fn from_mesh(mesh: &Mesh) -> Self {
        let mut chain = Self::default();
        for facet in mesh.facets() {
            let [a, b, c] = facet.corners(mesh.vertices());
            chain.add_edge(a, b);
            chain.add_edge(b, c);
            chain.add_edge(c, a);
        }
        chain
    }

    /// Lists every uncancelled piece of boundary.
    fn open_edges(&self) -> Vec<String> {
        let mut open = Vec::new();
        for (key, intervals) in &self.lines {
            let mut breaks: Vec<f64> = intervals.iter().flat_map(|&(s, e)| [s, e]).collect();
            breaks.sort_by(f64::total_cmp);
            breaks.dedup();
            for piece in breaks.windows(2) {
                let mid = 0.5 * (piece[0] + piece[1]);
                let coverage: i64 = intervals
                    .iter()
                    .filter(|&&(s, e)| s.min(e) < mid && mid < s.max(e))
                    .map(|&(s, e)| if s < e { 1 } else { -1 })
                    .sum();
                if coverage != 0 {
                    open.push(format!("line {key:?} [{}, {}] x{coverage}", piece[0], piece[1]));
                }
            }
        }
        for (edge, count) in &self.diagonals {
            if *count != 0 {
                open.push(format!("diagonal {edge:?} x{count}"));
            }
        }
        open
    }
}

fn assert_closed(mesh: &Mesh) {
    let open = Chain::from_mesh(mesh).open_edges();
    assert!(open.is_empty(), "open boundary: {open:#?}");
}

fn wavy(width: usize, height: usize) -> HeightField {
    HeightField::from_fn(width, height, |x, z| {
        (0.5 + 0.5 * ((x as f64) * 0.9).sin() * ((z as f64) * 0.6).cos()).clamp(0.0, 1.0)
    })
}

#[test]
fn checkerboard_is_closed() {
    let field = HeightField::new(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
    let mesh = build(&LithophaneSpec::new(&field, 10.0, 10.0, 2.0, 1.0)).unwrap();
    assert_closed(&mesh);
}

#[test]
fn varied_fields_are_closed() {
    for (w, h) in [(2, 3), (5, 2), (7, 7), (12, 5)] {
        let field = wavy(w, h);
        let spec = LithophaneSpec::new(&field, 37.5, 21.0, 1.6, 0.4);
        assert_closed(&build(&spec).unwrap());
        assert_closed(&build(&spec.with_layer_height(0.16)).unwrap());
    }
}

#[test]
fn flat_and_zero_back_fields_are_closed() {
    let flat = HeightField::from_fn(4, 3, |_, _| 0.0);
    assert_closed(&build(&LithophaneSpec::new(&flat, 8.0, 6.0, 1.0, 0.5)).unwrap());

    // Zero back thickness collapses the plate bands and parts of the skirt.
    let field = wavy(4, 4);
    assert_closed(&build(&LithophaneSpec::new(&field, 8.0, 8.0, 1.0, 0.0)).unwrap());
}

#[test]
fn chain_check_detects_missing_facet() {
    let field = wavy(3, 3);
    let mesh = build(&LithophaneSpec::new(&field, 9.0, 9.0, 1.0, 0.5)).unwrap();
    let mut chain = Chain::default();
    for facet in &mesh.facets()[1..] {
        let [a, b, c] = facet.corners(mesh.vertices());
        chain.add_edge(a, b);
        chain.add_edge(b, c);
        chain.add_edge(c, a);
    }
    assert!(!chain.open_edges().is_empty());
}

#[test]
fn volume_is_origin_independent() {
    let field = wavy(9, 6);
    let spec = LithophaneSpec::new(&field, 45.0, 30.0, 2.0, 0.6).with_layer_height(0.2);
    let mesh = build(&spec).unwrap();
    let cell_area = (45.0 / 9.0) * (30.0 / 6.0);
    let expected: f64 = field
        .samples()
        .iter()
        .map(|&s| relief_height(s, &spec) * cell_area)
        .sum();

    assert_relative_eq!(mesh.signed_volume(), expected, max_relative = 1e-9);
    for origin in [DVec3::new(100.0, -40.0, 7.5), DVec3::new(-3.0, 12.0, -80.0)] {
        assert_relative_eq!(mesh.signed_volume_about(origin), expected, max_relative = 1e-9);
    }
}
