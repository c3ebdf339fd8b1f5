//! # Config Crate
//!
//! Centralized configuration constants for the lithophane pipeline.
//! Print defaults, file-format layout sizes and numeric tolerances are
//! defined here so the geometry and wasm crates never carry literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_LAYER_HEIGHT_MM, EPSILON, MIN_GRID_SAMPLES};
//!
//! let steps = (1.6 / DEFAULT_LAYER_HEIGHT_MM + EPSILON).floor();
//! assert_eq!(steps, 10.0);
//! assert_eq!(MIN_GRID_SAMPLES, 2);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Printer Friendly**: Defaults match common FDM lithophane settings

pub mod constants;
