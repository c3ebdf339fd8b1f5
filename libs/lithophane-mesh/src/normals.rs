//! # Face Normals
//!
//! Fixed axis normals for every face the builder emits, the seam tie-break
//! rule, and the general cross-product normal used for checking.

use glam::DVec3;

/// Top of the relief.
pub const UP: DVec3 = DVec3::Y;
/// Underside of the back plate.
pub const DOWN: DVec3 = DVec3::NEG_Y;
/// Left wall (x = 0).
pub const LEFT: DVec3 = DVec3::NEG_X;
/// Right wall (x = width).
pub const RIGHT: DVec3 = DVec3::X;
/// Wall along the last sample row (z = height).
pub const BOTTOM: DVec3 = DVec3::Z;
/// Wall along the first sample row (z = 0).
pub const TOP: DVec3 = DVec3::NEG_Z;

/// Normal of the step between a cell and the cell in the previous row.
///
/// The step belongs to whichever cell is taller and faces the lower one:
/// `-Z` when the current cell is taller, `+Z` otherwise (ties included).
///
/// ```rust
/// use lithophane_mesh::normals::row_seam_normal;
/// use glam::DVec3;
///
/// assert_eq!(row_seam_normal(1.0, 3.0), DVec3::NEG_Z);
/// assert_eq!(row_seam_normal(3.0, 1.0), DVec3::Z);
/// ```
#[inline]
pub fn row_seam_normal(previous: f64, current: f64) -> DVec3 {
    if current > previous {
        DVec3::NEG_Z
    } else {
        DVec3::Z
    }
}

/// Normal of the step between a cell and its left neighbour: `-X` when the
/// current cell is taller, `+X` otherwise (ties included).
#[inline]
pub fn column_seam_normal(left: f64, current: f64) -> DVec3 {
    if current > left {
        DVec3::NEG_X
    } else {
        DVec3::X
    }
}

/// Unit normal of triangle `(a, b, c)` following the right-hand rule.
///
/// Returns `None` for zero-area triangles.
///
/// ```rust
/// use lithophane_mesh::normals::face_normal;
/// use glam::DVec3;
///
/// let n = face_normal(DVec3::ZERO, DVec3::Z, DVec3::X).unwrap();
/// assert_eq!(n, DVec3::Y);
/// assert!(face_normal(DVec3::ZERO, DVec3::X, DVec3::X * 2.0).is_none());
/// ```
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3) -> Option<DVec3> {
    (b - a).cross(c - a).try_normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seam_normals_face_lower_side() {
        assert_eq!(row_seam_normal(0.0, 1.0), DVec3::NEG_Z);
        assert_eq!(row_seam_normal(1.0, 0.0), DVec3::Z);
        assert_eq!(column_seam_normal(0.0, 1.0), DVec3::NEG_X);
        assert_eq!(column_seam_normal(1.0, 0.0), DVec3::X);
    }

    #[test]
    fn test_seam_normals_on_ties_are_unit() {
        for n in [row_seam_normal(0.5, 0.5), column_seam_normal(0.0, 0.0)] {
            assert!(n.is_finite());
            assert_eq!(n.length(), 1.0);
        }
    }

    #[test]
    fn test_wall_normals_are_opposite_pairs() {
        assert_eq!(UP, -DOWN);
        assert_eq!(LEFT, -RIGHT);
        assert_eq!(TOP, -BOTTOM);
    }

    #[test]
    fn test_face_normal_is_unit() {
        let n = face_normal(
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(4.0, 2.0, 3.0),
            DVec3::new(1.0, 7.0, 3.0),
        )
        .unwrap();
        assert_eq!(n, DVec3::Z);
    }
}
