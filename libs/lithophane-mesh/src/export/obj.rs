//! Wavefront OBJ writer.

use super::to_export_frame;
use crate::mesh::Mesh;
use std::fmt::{self, Write};
use tracing::debug;

/// Writes `mesh` as OBJ text: one `v` line per vertex, then one `f` line per
/// facet with 1-based indices. Vertices carry `r g b` when the mesh has debug
/// colours.
pub fn write_obj<W: Write>(mesh: &Mesh, out: &mut W) -> fmt::Result {
    let colors = mesh.colors();
    for (i, &vertex) in mesh.vertices().iter().enumerate() {
        let p = to_export_frame(vertex);
        match colors.and_then(|c| c.get(i)) {
            Some([r, g, b, _]) => writeln!(out, "v {} {} {} {} {} {}", p.x, p.y, p.z, r, g, b)?,
            None => writeln!(out, "v {} {} {}", p.x, p.y, p.z)?,
        }
    }
    for facet in mesh.facets() {
        let [a, b, c] = facet.indices;
        writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}

/// Serializes `mesh` to an OBJ string.
pub fn to_obj(mesh: &Mesh) -> String {
    let mut out = String::with_capacity(32 * (mesh.vertex_count() + mesh.facet_count()));
    // fmt::Write for String never fails.
    let _ = write_obj(mesh, &mut out);
    debug!(bytes = out.len(), "obj export");
    out
}
