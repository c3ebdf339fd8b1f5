//! ASCII and binary STL writers.
//!
//! Binary layout, little-endian throughout:
//!
//! ```text
//! header   80 bytes, zero padded, never starting with "solid"
//! count    u32 facet count
//! facet    12 × f32 (normal, three vertices) + u16 attribute (0), 50 bytes
//! ```

use super::to_export_frame;
use crate::error::{LithophaneError, LithophaneResult};
use crate::mesh::Mesh;
use config::constants::{STL_COUNT_LEN, STL_FACET_RECORD_LEN, STL_HEADER_LEN, STL_HEADER_TEXT};
use glam::DVec3;
use std::fmt::{self, Write};
use std::io;
use tracing::debug;

/// Writes `mesh` as ASCII STL with an unnamed solid.
pub fn write_stl_ascii<W: Write>(mesh: &Mesh, out: &mut W) -> fmt::Result {
    let vertices = mesh.vertices();
    // Blank name; readers detect ASCII by the "solid " prefix.
    writeln!(out, "solid ")?;
    for facet in mesh.facets() {
        let n = to_export_frame(facet.normal).as_vec3();
        writeln!(out, "facet normal {:e} {:e} {:e}", n.x, n.y, n.z)?;
        writeln!(out, "outer loop")?;
        for corner in facet.corners(vertices) {
            let p = to_export_frame(corner).as_vec3();
            writeln!(out, "vertex {:e} {:e} {:e}", p.x, p.y, p.z)?;
        }
        writeln!(out, "endloop")?;
        writeln!(out, "endfacet")?;
    }
    writeln!(out, "endsolid")
}

/// Serializes `mesh` to an ASCII STL string.
pub fn to_stl_ascii(mesh: &Mesh) -> String {
    let mut out = String::with_capacity(256 * mesh.facet_count() + 16);
    // fmt::Write for String never fails.
    let _ = write_stl_ascii(mesh, &mut out);
    debug!(bytes = out.len(), "ascii stl export");
    out
}

/// Writes `mesh` as binary STL.
pub fn write_stl_binary<W: io::Write>(mesh: &Mesh, out: &mut W) -> io::Result<()> {
    let facet_count = binary_facet_count(mesh.facet_count())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    let mut header = [0u8; STL_HEADER_LEN];
    let text = STL_HEADER_TEXT.as_bytes();
    let len = text.len().min(STL_HEADER_LEN);
    header[..len].copy_from_slice(&text[..len]);
    out.write_all(&header)?;
    out.write_all(&facet_count.to_le_bytes())?;

    let vertices = mesh.vertices();
    let mut record = [0u8; STL_FACET_RECORD_LEN];
    for facet in mesh.facets() {
        let [a, b, c] = facet.corners(vertices);
        for (slot, v) in [facet.normal, a, b, c].into_iter().enumerate() {
            put_vec3(&mut record[slot * 12..slot * 12 + 12], v);
        }
        record[48..50].copy_from_slice(&0u16.to_le_bytes());
        out.write_all(&record)?;
    }
    Ok(())
}

/// Serializes `mesh` to binary STL bytes.
///
/// # Errors
///
/// `Export` when the mesh has more facets than the 32-bit count field holds.
pub fn to_stl_binary(mesh: &Mesh) -> LithophaneResult<Vec<u8>> {
    binary_facet_count(mesh.facet_count())?;
    let mut out = Vec::with_capacity(
        STL_HEADER_LEN + STL_COUNT_LEN + STL_FACET_RECORD_LEN * mesh.facet_count(),
    );
    write_stl_binary(mesh, &mut out).map_err(|err| LithophaneError::Export(err.to_string()))?;
    debug!(bytes = out.len(), "binary stl export");
    Ok(out)
}

/// The binary count field is a `u32`.
pub(crate) fn binary_facet_count(count: usize) -> LithophaneResult<u32> {
    u32::try_from(count).map_err(|_| {
        LithophaneError::Export(format!(
            "binary STL holds at most {} facets, got {count}",
            u32::MAX
        ))
    })
}

fn put_vec3(dst: &mut [u8], v: DVec3) {
    let p = to_export_frame(v).as_vec3();
    for (chunk, value) in dst.chunks_exact_mut(4).zip([p.x, p.y, p.z]) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
}
