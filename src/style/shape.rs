use crate::foundation::core::{Raster, Rgba8Premul};
use crate::foundation::error::{QrylicError, QrylicResult};
use crate::matrix::grid::ModuleGrid;
use crate::spec::model::{ModuleShape, ModuleStyleSpec};
use kurbo::{Circle, Point, Shape};

/// Redraw each dark module per the configured shape by carving: in-shape
/// pixels keep their current color (any gradient mapping survives), carved
/// pixels take the background sampled from the quiet zone.
///
/// Pixel pitch comes from the grid geometry; a raster whose edge is not an
/// exact multiple of the grid's cell count is a stage failure. The square
/// shape is the identity and skips the stage.
pub(crate) fn restyle_modules(
    input: &Raster,
    grid: &ModuleGrid,
    spec: &ModuleStyleSpec,
) -> QrylicResult<Option<Raster>> {
    if spec.shape == ModuleShape::Square {
        return Ok(None);
    }

    if input.width != input.height {
        return Err(QrylicError::stage(format!(
            "module restyle requires a square raster, got {}x{}",
            input.width, input.height
        )));
    }
    let cells = grid.cells_with_quiet();
    if !input.width.is_multiple_of(cells) {
        return Err(QrylicError::stage(format!(
            "raster edge {} is not a multiple of the grid's {cells} cells",
            input.width
        )));
    }
    let ms = input.width / cells;
    if ms == 0 {
        return Err(QrylicError::stage("raster too small for the grid"));
    }

    let m = f64::from(ms);
    let radius = corner_radius_px(spec, m);
    let bg = background_px(input, grid, ms);

    let mut out = input.clone();
    let q = grid.quiet_zone();
    for my in 0..grid.count() {
        for mx in 0..grid.count() {
            if !grid.is_dark(mx, my) {
                continue;
            }
            let x0 = (q + mx) * ms;
            let y0 = (q + my) * ms;
            for ly in 0..ms {
                for lx in 0..ms {
                    let p = Point::new(f64::from(lx) + 0.5, f64::from(ly) + 0.5);
                    if !keep_pixel(spec.shape, m, radius, p) {
                        out.put_px(x0 + lx, y0 + ly, bg);
                    }
                }
            }
        }
    }
    Ok(Some(out))
}

/// Corner rounding radius in pixels for the shape's effective ratio.
///
/// Rounded and classy_rounded use the configured ratio; extra_rounded grows
/// it by 5/3 (capped at the half-module maximum); classy shrinks it by 2/3.
fn corner_radius_px(spec: &ModuleStyleSpec, module_px: f64) -> f64 {
    let ratio = match spec.shape {
        ModuleShape::Square | ModuleShape::Dots => 0.0,
        ModuleShape::Rounded | ModuleShape::ClassyRounded => spec.corner_radius_ratio,
        ModuleShape::ExtraRounded => (spec.corner_radius_ratio * 5.0 / 3.0).min(0.5),
        ModuleShape::Classy => spec.corner_radius_ratio * 2.0 / 3.0,
    };
    ratio * module_px
}

/// Whether the pixel centered at `p` (module-local coordinates) stays dark.
fn keep_pixel(shape: ModuleShape, m: f64, radius: f64, p: Point) -> bool {
    match shape {
        ModuleShape::Square => true,
        ModuleShape::Dots => Circle::new(Point::new(m / 2.0, m / 2.0), m / 2.0).contains(p),
        ModuleShape::Rounded | ModuleShape::ExtraRounded => {
            !corner_carved(p, m, radius, [true, true, true, true])
        }
        // The classy family rounds the top-left and bottom-right corners only.
        ModuleShape::Classy | ModuleShape::ClassyRounded => {
            !corner_carved(p, m, radius, [true, false, false, true])
        }
    }
}

/// Whether `p` falls in a carved corner region: inside one of the enabled
/// corner squares of side `r` but outside that corner's rounding circle.
/// Corners order: top-left, top-right, bottom-left, bottom-right.
fn corner_carved(p: Point, m: f64, r: f64, corners: [bool; 4]) -> bool {
    if r <= 0.0 {
        return false;
    }
    if corners[0] && p.x < r && p.y < r {
        return p.distance(Point::new(r, r)) > r;
    }
    if corners[1] && p.x > m - r && p.y < r {
        return p.distance(Point::new(m - r, r)) > r;
    }
    if corners[2] && p.x < r && p.y > m - r {
        return p.distance(Point::new(r, m - r)) > r;
    }
    if corners[3] && p.x > m - r && p.y > m - r {
        return p.distance(Point::new(m - r, m - r)) > r;
    }
    false
}

/// Background color carved pixels take: the quiet-zone origin pixel when a
/// quiet zone exists, else the center of the first light module, else white.
fn background_px(input: &Raster, grid: &ModuleGrid, ms: u32) -> Rgba8Premul {
    let fallback = Rgba8Premul::from_straight_rgba(255, 255, 255, 255);
    if grid.quiet_zone() > 0 {
        return input.pixel(0, 0).unwrap_or(fallback);
    }
    for my in 0..grid.count() {
        for mx in 0..grid.count() {
            if !grid.is_dark(mx, my) {
                return input
                    .pixel(mx * ms + ms / 2, my * ms + ms / 2)
                    .unwrap_or(fallback);
            }
        }
    }
    fallback
}

#[cfg(test)]
#[path = "../../tests/unit/style/shape.rs"]
mod tests;
