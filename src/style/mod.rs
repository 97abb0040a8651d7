//! The styling stages: gradient recolor, module reshaping, frame
//! compositing, and logo overlay.
//!
//! Every stage is a pure transform `&Raster -> QrylicResult<Option<Raster>>`:
//! `Ok(Some)` applied, `Ok(None)` skipped (unconfigured), `Err` failed. The
//! pipeline combinator in [`crate::pipeline`] owns composition and
//! degradation; stages never print or touch shared state.

pub(crate) mod composite;
pub(crate) mod frame;
pub(crate) mod gradient;
pub(crate) mod logo;
pub(crate) mod shape;
