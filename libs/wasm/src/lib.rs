//! WASM-facing entry points for lithophane generation.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. The page decodes the picture on a canvas and passes the raw
//! RGBA bytes plus a JSON settings document. Native tests use
//! [`generate_lithophane_internal`] to avoid depending on a JS host.
//!
//! ```
//! use lithophane_wasm::{generate_lithophane_internal, LithophaneSettings};
//!
//! let rgba = [0u8, 0, 0, 255, 255, 255, 255, 255, 255, 255, 255, 255, 0, 0, 0, 255];
//! let settings = LithophaneSettings { sample_count: 2, ..Default::default() };
//! let handle = generate_lithophane_internal(&rgba, 2, 2, &settings).unwrap();
//! assert_eq!(handle.facet_count(), 42);
//! ```

mod mesh_handle;
mod settings;

pub use mesh_handle::LithophaneHandle;
pub use settings::LithophaneSettings;

use lithophane_mesh::{build, sample_grid_size, GrayImage, LithophaneError, LithophaneResult};
use lithophane_mesh::{LithophaneSpec, PhysicalSize};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

/// Installs a panic hook that forwards Rust panics to the browser console
/// and routes `tracing` events to it as well. Safe to call more than once.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "lithophane_wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    install_console_subscriber();
}

#[cfg(target_arch = "wasm32")]
fn install_console_subscriber() {
    if tracing_wasm::try_set_as_global_default().is_err() {
        debug!("tracing subscriber already installed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install_console_subscriber() {}

/// Generates a lithophane from canvas pixel data.
///
/// `rgba` holds `width * height` RGBA pixels, rows top to bottom, exactly as
/// `ImageData.data` provides them. `settings_json` may be empty.
///
/// # Errors
/// Returns a JavaScript `Error` when the settings do not parse, the pixel
/// buffer does not match the declared size, or a dimension is out of range.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const handle = generate_lithophane(data, 640, 480, '{"sampleCount": 200}');
/// // console.log(handle.facet_count);
/// ```
#[wasm_bindgen]
pub fn generate_lithophane(
    rgba: &[u8],
    width: u32,
    height: u32,
    settings_json: &str,
) -> Result<LithophaneHandle, JsValue> {
    LithophaneSettings::from_json(settings_json)
        .and_then(|settings| {
            generate_lithophane_internal(rgba, width as usize, height as usize, &settings)
        })
        .map_err(to_js_error)
}

/// Host-only pipeline: grayscale, adjust, resample, build.
pub fn generate_lithophane_internal(
    rgba: &[u8],
    width: usize,
    height: usize,
    settings: &LithophaneSettings,
) -> LithophaneResult<LithophaneHandle> {
    settings.validate()?;

    let image = GrayImage::from_rgba(width, height, rgba)?
        .adjust(settings.brightness, settings.contrast)?;
    let (grid_width, grid_height) = sample_grid_size(settings.sample_count, width, height);
    let field = image
        .resample_nearest(grid_width, grid_height)?
        .to_height_field();
    debug!(grid_width, grid_height, "height field ready");

    let size = PhysicalSize::fit_side_length(settings.side_length_mm, grid_width, grid_height);
    let mut spec = LithophaneSpec::new(
        &field,
        size.width_mm,
        size.height_mm,
        settings.surface_thickness_mm,
        settings.back_thickness_mm,
    )
    .with_debug_colors(settings.debug_colors);
    if settings.snap_to_layers {
        spec = spec.with_layer_height(settings.layer_height_mm);
    }

    let mesh = build(&spec)?;
    info!(
        vertices = mesh.vertex_count(),
        facets = mesh.facet_count(),
        width_mm = size.width_mm,
        height_mm = size.height_mm,
        "lithophane generated"
    );
    Ok(LithophaneHandle::new(mesh, grid_width, grid_height, size))
}

pub(crate) fn to_js_error(err: LithophaneError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
