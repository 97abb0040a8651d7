use std::path::PathBuf;

use crate::assets::fetch::{HttpLogoFetcher, LogoFetcher};
use crate::foundation::core::Raster;
use crate::foundation::error::QrylicResult;
use crate::matrix::grid::ModuleGrid;
use crate::matrix::raster::{GridRenderOpts, render_grid};
use crate::pipeline::report::{PipelineStage, StageEvent, StageStatus, StyleReport};
use crate::spec::model::StyleConfig;
use crate::style::{frame, gradient, logo, shape};

/// Runs the styling stages (gradient, module shape, frame, logo) over a
/// base raster.
///
/// Construction validates the config. A run returns `Err` only for invalid
/// inputs such as a raster whose buffer does not match its dimensions;
/// failures inside a stage degrade to pass-through and are recorded in the
/// returned [`StyleReport`].
pub struct StylePipeline {
    config: StyleConfig,
    fetcher: Option<Box<dyn LogoFetcher>>,
    assets_root: Option<PathBuf>,
}

impl StylePipeline {
    /// Build a pipeline from a validated config.
    ///
    /// When a logo is configured its source resolves over HTTP, or as a
    /// path relative to the working directory. Use
    /// [`StylePipeline::with_root`] to anchor local sources elsewhere.
    pub fn new(config: StyleConfig) -> QrylicResult<Self> {
        config.validate()?;
        let fetcher: Option<Box<dyn LogoFetcher>> = match config.logo {
            Some(_) => Some(Box::new(HttpLogoFetcher::new(".")?)),
            None => None,
        };
        Ok(Self {
            config,
            fetcher,
            assets_root: None,
        })
    }

    /// Build a pipeline whose local logo sources and caption fonts resolve
    /// relative to `assets_root`.
    pub fn with_root(config: StyleConfig, assets_root: impl Into<PathBuf>) -> QrylicResult<Self> {
        config.validate()?;
        let root = assets_root.into();
        let fetcher: Option<Box<dyn LogoFetcher>> = match config.logo {
            Some(_) => Some(Box::new(HttpLogoFetcher::new(root.clone())?)),
            None => None,
        };
        Ok(Self {
            config,
            fetcher,
            assets_root: Some(root),
        })
    }

    /// Replace the logo fetcher, e.g. with an
    /// [`InMemoryLogoFetcher`](crate::InMemoryLogoFetcher) in tests.
    pub fn with_fetcher(mut self, fetcher: Box<dyn LogoFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Run every stage over `base`, which must be the rendering of `grid`
    /// (the module-shape stage derives its pixel pitch from the pair).
    #[tracing::instrument(skip(self, base, grid), fields(width = base.width, height = base.height))]
    pub fn run(&self, base: Raster, grid: &ModuleGrid) -> QrylicResult<StyleReport> {
        base.validate()?;

        let mut events = Vec::with_capacity(4);
        let raster = step(base, PipelineStage::Gradient, &mut events, |input| {
            gradient::apply_gradient(input, &self.config.gradient)
        });
        let raster = step(raster, PipelineStage::ModuleShape, &mut events, |input| {
            shape::restyle_modules(input, grid, &self.config.modules)
        });
        let raster = step(raster, PipelineStage::Frame, &mut events, |input| {
            frame::compose_frame(input, &self.config.frame, self.assets_root.as_deref())
        });
        let raster = step(raster, PipelineStage::Logo, &mut events, |input| {
            logo::overlay_logo(input, self.config.logo.as_ref(), self.fetcher.as_deref())
        });

        Ok(StyleReport { raster, events })
    }

    /// Render `grid` with `opts` and run the pipeline over the result.
    pub fn run_grid(&self, grid: &ModuleGrid, opts: &GridRenderOpts) -> QrylicResult<StyleReport> {
        let base = render_grid(grid, opts)?;
        self.run(base, grid)
    }
}

fn step<F>(input: Raster, stage: PipelineStage, events: &mut Vec<StageEvent>, f: F) -> Raster
where
    F: FnOnce(&Raster) -> QrylicResult<Option<Raster>>,
{
    match f(&input) {
        Ok(Some(next)) => {
            events.push(StageEvent {
                stage,
                status: StageStatus::Applied,
                message: None,
            });
            next
        }
        Ok(None) => {
            events.push(StageEvent {
                stage,
                status: StageStatus::Skipped,
                message: None,
            });
            input
        }
        Err(err) => {
            let message = err.to_string();
            tracing::warn!(stage = %stage, error = %message, "stage failed, passing input through");
            events.push(StageEvent {
                stage,
                status: StageStatus::Failed,
                message: Some(message),
            });
            input
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;
