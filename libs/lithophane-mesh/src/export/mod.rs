//! # Mesh Export
//!
//! Serializes a built mesh to OBJ text, ASCII STL or binary STL.
//!
//! All formats share one axis remap from the y-up build frame to the z-up
//! frame slicers expect: `(x, y, z)` is written as `(x, -z, y)`. The remap is
//! a proper rotation, so facet winding and normals stay outward.

mod obj;
mod stl;

pub use obj::{to_obj, write_obj};
pub use stl::{to_stl_ascii, to_stl_binary, write_stl_ascii, write_stl_binary};

use crate::error::{LithophaneError, LithophaneResult};
use crate::mesh::Mesh;
use glam::DVec3;
use std::fmt;
use std::str::FromStr;

/// Maps a build-frame vector to the export frame.
///
/// ```rust
/// use lithophane_mesh::export::to_export_frame;
/// use glam::DVec3;
///
/// assert_eq!(to_export_frame(DVec3::new(1.0, 2.0, 3.0)), DVec3::new(1.0, -3.0, 2.0));
/// ```
#[inline]
pub fn to_export_frame(v: DVec3) -> DVec3 {
    // 0.0 - z rather than -z keeps zero coordinates from printing as "-0".
    DVec3::new(v.x, 0.0 - v.z, v.y)
}

/// Output formats offered for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Binary STL, the compact default.
    StlBinary,
    /// ASCII STL.
    StlAscii,
    /// Wavefront OBJ.
    Obj,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::StlBinary | ExportFormat::StlAscii => "stl",
            ExportFormat::Obj => "obj",
        }
    }

    /// MIME type used when offering the file for download.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::StlBinary | ExportFormat::StlAscii => "model/stl",
            ExportFormat::Obj => "text/plain",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::StlBinary => "stl-binary",
            ExportFormat::StlAscii => "stl-ascii",
            ExportFormat::Obj => "obj",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = LithophaneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stl" | "stl-binary" | "binary" => Ok(ExportFormat::StlBinary),
            "stl-ascii" | "ascii" => Ok(ExportFormat::StlAscii),
            "obj" => Ok(ExportFormat::Obj),
            _ => Err(LithophaneError::UnknownFormat(s.to_string())),
        }
    }
}

/// Serializes `mesh` in the requested format.
///
/// ```rust
/// use lithophane_mesh::{build, export, ExportFormat, HeightField, LithophaneSpec};
///
/// let field = HeightField::new(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let mesh = build(&LithophaneSpec::new(&field, 10.0, 10.0, 2.0, 1.0)).unwrap();
/// let bytes = export(&mesh, ExportFormat::StlBinary).unwrap();
/// assert_eq!(bytes.len(), 84 + 50 * mesh.facet_count());
/// ```
///
/// # Errors
///
/// `Export` when the mesh does not fit the format.
pub fn export(mesh: &Mesh, format: ExportFormat) -> LithophaneResult<Vec<u8>> {
    match format {
        ExportFormat::StlBinary => to_stl_binary(mesh),
        ExportFormat::StlAscii => Ok(to_stl_ascii(mesh).into_bytes()),
        ExportFormat::Obj => Ok(to_obj(mesh).into_bytes()),
    }
}
