use crate::foundation::core::Raster;
use crate::foundation::error::{QrylicError, QrylicResult};
use crate::matrix::grid::ModuleGrid;
use crate::spec::color::ColorSpec;

/// Options for rendering a [`ModuleGrid`] to a base raster.
#[derive(Clone, Debug, PartialEq)]
pub struct GridRenderOpts {
    /// Edge length of one module in pixels.
    pub module_size: u32,
    /// Dark-module color.
    pub dark: ColorSpec,
    /// Light-module and quiet-zone color.
    pub light: ColorSpec,
}

impl Default for GridRenderOpts {
    fn default() -> Self {
        Self {
            module_size: 8,
            dark: ColorSpec::rgba(0.0, 0.0, 0.0, 1.0),
            light: ColorSpec::rgba(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Render a grid to pixels: quiet zone and light modules in the light color,
/// dark modules as solid squares of `module_size` pixels.
///
/// The output edge length is `(count + 2 * quiet_zone) * module_size`, the
/// geometry every later stage derives its pitch from.
pub fn render_grid(grid: &ModuleGrid, opts: &GridRenderOpts) -> QrylicResult<Raster> {
    if opts.module_size == 0 {
        return Err(QrylicError::config("module_size must be at least 1"));
    }
    let edge = grid
        .cells_with_quiet()
        .checked_mul(opts.module_size)
        .ok_or_else(|| QrylicError::config("raster edge length overflow"))?;

    let mut raster = Raster::new(edge, edge, opts.light.to_rgba8_premul())?;
    let dark = opts.dark.to_rgba8_premul();
    let ms = opts.module_size;
    let q = grid.quiet_zone();
    for my in 0..grid.count() {
        for mx in 0..grid.count() {
            if grid.is_dark(mx, my) {
                raster.fill_rect((q + mx) * ms, (q + my) * ms, ms, ms, dark);
            }
        }
    }
    Ok(raster)
}

#[cfg(test)]
#[path = "../../tests/unit/matrix/raster.rs"]
mod tests;
