//! Foundation types shared across the crate.
//!
//! Pixel and raster primitives, the error taxonomy, and small integer/color math helpers.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
