//! # Mesh Data Structure
//!
//! Vertex positions plus facets carrying a precomputed unit normal.

use crate::normals::face_normal;
use glam::DVec3;

/// A triangle referencing three vertices, wound counter-clockwise when seen
/// from outside the solid, plus its outward unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    /// Zero-based vertex indices.
    pub indices: [u32; 3],
    /// Outward unit normal.
    pub normal: DVec3,
}

impl Facet {
    /// Creates a facet.
    pub fn new(indices: [u32; 3], normal: DVec3) -> Self {
        Self { indices, normal }
    }

    /// Resolves the three corner positions.
    #[inline]
    pub fn corners(&self, vertices: &[DVec3]) -> [DVec3; 3] {
        [
            vertices[self.indices[0] as usize],
            vertices[self.indices[1] as usize],
            vertices[self.indices[2] as usize],
        ]
    }
}

/// A triangle mesh built once and read-only afterwards.
///
/// All geometry uses f64. Conversion to f32 only happens when writing STL or
/// handing buffers to the GPU.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{build, HeightField, LithophaneSpec};
///
/// let field = HeightField::new(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let mesh = build(&LithophaneSpec::new(&field, 10.0, 10.0, 2.0, 1.0)).unwrap();
/// assert!(mesh.validate());
/// let (min, max) = mesh.bounding_box();
/// assert_eq!(max.y - min.y, 3.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    facets: Vec<Facet>,
    /// Optional debug colours (RGBA, one per vertex).
    colors: Option<Vec<[f32; 4]>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub(crate) fn with_capacity(vertex_count: usize, facet_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            facets: Vec::with_capacity(facet_count),
            colors: None,
        }
    }

    /// Appends a vertex and returns its index.
    pub(crate) fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Appends a triangle with a known normal.
    pub(crate) fn add_facet(&mut self, v0: u32, v1: u32, v2: u32, normal: DVec3) {
        self.facets.push(Facet::new([v0, v1, v2], normal));
    }

    /// Appends the quad `a b c d` as triangles `a b c` and `a c d`.
    pub(crate) fn add_quad(&mut self, [a, b, c, d]: [u32; 4], normal: DVec3) {
        self.add_facet(a, b, c, normal);
        self.add_facet(a, c, d, normal);
    }

    pub(crate) fn set_colors(&mut self, colors: Vec<[f32; 4]>) {
        debug_assert_eq!(colors.len(), self.vertices.len());
        self.colors = Some(colors);
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of facets.
    #[inline]
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Returns true if the mesh has no facets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns the facets.
    #[inline]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Returns the debug colours, if the mesh was built with them.
    pub fn colors(&self) -> Option<&[[f32; 4]]> {
        self.colors.as_deref()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some((first, rest)) = self.vertices.split_first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        rest.iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Signed enclosed volume by the divergence theorem.
    ///
    /// Positive for a closed, outward-wound solid. The result does not depend
    /// on the coordinate origin only when the surface is closed.
    pub fn signed_volume(&self) -> f64 {
        self.signed_volume_about(DVec3::ZERO)
    }

    /// Same as [`Mesh::signed_volume`], with tetrahedra fanned from `origin`.
    pub fn signed_volume_about(&self, origin: DVec3) -> f64 {
        self.facets
            .iter()
            .map(|facet| {
                let [a, b, c] = facet.corners(&self.vertices);
                (a - origin).dot((b - origin).cross(c - origin))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Total triangle area.
    pub fn surface_area(&self) -> f64 {
        self.facets
            .iter()
            .map(|facet| {
                let [a, b, c] = facet.corners(&self.vertices);
                (b - a).cross(c - a).length() / 2.0
            })
            .sum()
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All facet indices are in range
    /// - Stored normals are unit length
    /// - Non-degenerate facets are wound to agree with their stored normal
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len();
        self.facets.iter().all(|facet| {
            if facet.indices.iter().any(|&i| i as usize >= vertex_count) {
                return false;
            }
            if (facet.normal.length() - 1.0).abs() > 1.0e-9 {
                return false;
            }
            let [a, b, c] = facet.corners(&self.vertices);
            match face_normal(a, b, c) {
                Some(geometric) => geometric.dot(facet.normal) > 0.0,
                None => true,
            }
        })
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn positions_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Exports facet indices as a flattened u32 array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.facets.iter().flat_map(|f| f.indices).collect()
    }

    /// Exports facet normals as a flattened f32 array, one normal per facet.
    pub fn facet_normals_f32(&self) -> Vec<f32> {
        self.facets
            .iter()
            .flat_map(|f| [f.normal.x as f32, f.normal.y as f32, f.normal.z as f32])
            .collect()
    }
}
