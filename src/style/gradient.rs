use crate::foundation::core::{Raster, is_dark_bytes};
use crate::foundation::error::{QrylicError, QrylicResult};
use crate::spec::color::ColorSpec;
use crate::spec::model::{GradientKind, GradientSpec};

/// Recolor dark pixels by position. Light and transparent pixels pass
/// through untouched; `kind: none` skips the stage.
pub(crate) fn apply_gradient(input: &Raster, spec: &GradientSpec) -> QrylicResult<Option<Raster>> {
    if spec.kind == GradientKind::None {
        return Ok(None);
    }
    if spec.stops.is_empty() {
        return Err(QrylicError::stage(
            "gradient requires at least one color stop",
        ));
    }

    let mut out = input.clone();
    for y in 0..out.height {
        for x in 0..out.width {
            let i = out.idx(x, y);
            if !is_dark_bytes(&out.data[i..i + 4]) {
                continue;
            }
            let p = position(spec.kind, x, y, out.width, out.height);
            let px = color_at(&spec.stops, p).to_rgba8_premul();
            out.data[i] = px.r;
            out.data[i + 1] = px.g;
            out.data[i + 2] = px.b;
            out.data[i + 3] = px.a;
        }
    }
    Ok(Some(out))
}

/// Normalized position of a pixel for a gradient kind.
///
/// Uses `(extent - 1)` denominators so the first pixel maps to 0 and the last
/// to exactly 1; single-pixel extents map to 0. Radial measures distance from
/// the image center and normalizes by the center-to-corner distance.
fn position(kind: GradientKind, x: u32, y: u32, width: u32, height: u32) -> f64 {
    fn axis(i: u32, extent: u32) -> f64 {
        if extent <= 1 {
            return 0.0;
        }
        f64::from(i) / f64::from(extent - 1)
    }

    match kind {
        GradientKind::None => 0.0,
        GradientKind::LinearVertical => axis(y, height),
        GradientKind::LinearHorizontal => axis(x, width),
        GradientKind::Radial => {
            let cx = f64::from(width - 1) / 2.0;
            let cy = f64::from(height - 1) / 2.0;
            let max = cx.hypot(cy);
            if max <= 0.0 {
                return 0.0;
            }
            (f64::from(x) - cx).hypot(f64::from(y) - cy) / max
        }
    }
}

/// Piecewise-linear interpolation over evenly spaced stops.
///
/// `p <= 0` clamps to the first stop and `p >= 1` to the last, exactly.
pub(crate) fn color_at(stops: &[ColorSpec], p: f64) -> ColorSpec {
    if stops.len() == 1 {
        return stops[0];
    }
    let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = p * (stops.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(stops.len() - 2);
    let t = scaled - lower as f64;
    stops[lower].lerp(stops[lower + 1], t)
}

#[cfg(test)]
#[path = "../../tests/unit/style/gradient.rs"]
mod tests;
