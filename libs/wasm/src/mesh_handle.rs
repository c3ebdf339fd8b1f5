//! # Lithophane Handle
//!
//! WASM-friendly wrapper around a generated mesh: GPU buffers for the preview
//! and serialized files for download.

use crate::to_js_error;
use lithophane_mesh::{export, to_obj, to_stl_ascii, to_stl_binary};
use lithophane_mesh::{ExportFormat, LithophaneResult, Mesh, PhysicalSize};
use wasm_bindgen::prelude::*;

/// A generated lithophane that can be previewed and downloaded from
/// JavaScript.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const handle = generate_lithophane(imageData.data, width, height, JSON.stringify(settings));
///
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute('position', new THREE.BufferAttribute(handle.vertices(), 3));
/// geometry.setIndex(new THREE.BufferAttribute(handle.indices(), 1));
///
/// const blob = new Blob([handle.export_bytes("stl")], { type: handle.mime_type("stl") });
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct LithophaneHandle {
    mesh: Mesh,
    grid_width: usize,
    grid_height: usize,
    size: PhysicalSize,
}

#[wasm_bindgen]
impl LithophaneHandle {
    /// Returns the number of vertices.
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Returns the number of facets.
    #[wasm_bindgen(getter)]
    pub fn facet_count(&self) -> usize {
        self.mesh.facet_count()
    }

    /// Samples along x.
    #[wasm_bindgen(getter)]
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    /// Samples along z.
    #[wasm_bindgen(getter)]
    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    #[wasm_bindgen(getter)]
    pub fn width_mm(&self) -> f64 {
        self.size.width_mm
    }

    #[wasm_bindgen(getter)]
    pub fn height_mm(&self) -> f64 {
        self.size.height_mm
    }

    /// Vertex positions as a Float32Array, `[x, y, z, ...]` in the y-up
    /// build frame.
    pub fn vertices(&self) -> Vec<f32> {
        self.mesh.positions_f32()
    }

    /// Triangle indices as a Uint32Array, `[i0, i1, i2, ...]`.
    pub fn indices(&self) -> Vec<u32> {
        self.mesh.indices_u32()
    }

    /// One unit normal per facet, `[nx, ny, nz, ...]`.
    pub fn facet_normals(&self) -> Vec<f32> {
        self.mesh.facet_normals_f32()
    }

    /// Debug colours as `[r, g, b, a, ...]`, one per vertex, if enabled.
    pub fn colors(&self) -> Option<Vec<f32>> {
        self.mesh.colors().map(|c| c.iter().flatten().copied().collect())
    }

    /// Serializes the mesh; `format` is `"stl"`, `"stl-ascii"` or `"obj"`.
    ///
    /// # Errors
    /// Returns a JavaScript error for an unknown format name or a mesh the
    /// format cannot hold.
    pub fn export_bytes(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        self.export_internal(format).map_err(to_js_error)
    }

    /// MIME type for a download in `format`.
    pub fn mime_type(&self, format: &str) -> Result<String, JsValue> {
        parse_format(format)
            .map(|f| f.mime_type().to_string())
            .map_err(to_js_error)
    }

    /// Suggested download name, e.g. `lithophane.stl`.
    pub fn file_name(&self, format: &str) -> Result<String, JsValue> {
        self.file_name_internal(format).map_err(to_js_error)
    }

    pub fn to_obj(&self) -> String {
        to_obj(&self.mesh)
    }

    pub fn to_stl_ascii(&self) -> String {
        to_stl_ascii(&self.mesh)
    }

    pub fn to_stl_binary(&self) -> Result<Vec<u8>, JsValue> {
        to_stl_binary(&self.mesh).map_err(to_js_error)
    }
}

impl LithophaneHandle {
    pub(crate) fn new(mesh: Mesh, grid_width: usize, grid_height: usize, size: PhysicalSize) -> Self {
        Self {
            mesh,
            grid_width,
            grid_height,
            size,
        }
    }

    /// The wrapped mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Host-side variant of [`LithophaneHandle::export_bytes`].
    pub fn export_internal(&self, format: &str) -> LithophaneResult<Vec<u8>> {
        export(&self.mesh, parse_format(format)?)
    }

    /// Host-side variant of [`LithophaneHandle::file_name`].
    pub fn file_name_internal(&self, format: &str) -> LithophaneResult<String> {
        Ok(format!("lithophane.{}", parse_format(format)?.extension()))
    }
}

fn parse_format(format: &str) -> LithophaneResult<ExportFormat> {
    format.parse()
}
