//! Qrylic styles matrix-code rasters: gradient recoloring of dark modules,
//! module reshaping, frame and caption compositing, and centered logo
//! overlays.
//!
//! The public API is pipeline-oriented:
//!
//! - Describe the look in a [`StyleConfig`] (usually deserialized from JSON)
//! - Build a [`StylePipeline`] and run it over a [`ModuleGrid`] rendering
//! - Inspect the [`StyleReport`] for the styled raster and per-stage outcomes
//!
//! Stages degrade uniformly: a failing stage passes its input through and
//! records the failure instead of aborting the run.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod matrix;
mod pipeline;
mod spec;
mod style;

pub use crate::assets::fetch::{HttpLogoFetcher, InMemoryLogoFetcher, LogoFetcher};
pub use crate::foundation::core::{Raster, Rgba8Premul};
pub use crate::foundation::error::{QrylicError, QrylicResult};
pub use crate::matrix::grid::{DEFAULT_QUIET_ZONE, MIN_MODULE_COUNT, ModuleGrid};
pub use crate::matrix::raster::{GridRenderOpts, render_grid};
pub use crate::pipeline::report::{PipelineStage, StageEvent, StageStatus, StyleReport};
pub use crate::pipeline::run::StylePipeline;
pub use crate::spec::color::ColorSpec;
pub use crate::spec::model::{
    CaptionSpec, FrameSpec, FrameStyle, GradientKind, GradientSpec, LogoSpec, ModuleShape,
    ModuleStyleSpec, StyleConfig,
};
