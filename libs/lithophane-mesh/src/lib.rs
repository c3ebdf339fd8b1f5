//! # Lithophane Mesh
//!
//! Builds a closed, printable solid from a grid of normalized heights and
//! serializes it as OBJ, ASCII STL or binary STL.
//!
//! ## Pipeline
//!
//! ```text
//! RGBA image -> GrayImage -> HeightField -> build() -> Mesh -> export()
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lithophane_mesh::{build, to_stl_binary, HeightField, LithophaneSpec};
//!
//! let field = HeightField::new(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
//! let spec = LithophaneSpec::new(&field, 10.0, 10.0, 2.0, 1.0);
//! let mesh = build(&spec).unwrap();
//! assert_eq!(mesh.facet_count(), 42);
//! assert_eq!(to_stl_binary(&mesh).unwrap().len(), 84 + 50 * 42);
//! ```

pub mod builder;
pub mod error;
pub mod export;
pub mod height_field;
pub mod imaging;
pub mod mesh;
pub mod normals;
pub mod params;

pub use builder::{
    build, expected_facet_count, expected_vertex_count, relief_height, surface_facet_count,
};
pub use error::{LithophaneError, LithophaneResult};
pub use export::{export, to_obj, to_stl_ascii, to_stl_binary, ExportFormat};
pub use height_field::HeightField;
pub use imaging::GrayImage;
pub use mesh::{Facet, Mesh};
pub use params::{sample_grid_size, LithophaneSpec, PhysicalSize};
