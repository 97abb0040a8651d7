//! Module-grid input model and the reference grid-to-raster renderer.
//!
//! The grid is the structured geometry input to the styling pipeline: module
//! count, quiet-zone width, and one dark/light flag per module. Stages derive
//! pixel pitch from it instead of sampling pixels.

pub(crate) mod grid;
pub(crate) mod raster;
