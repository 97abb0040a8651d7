use crate::foundation::core::Raster;
use crate::foundation::error::{QrylicError, QrylicResult};
use anyhow::Context;

/// Decode logo bytes and scale them to fit within `max_w x max_h`, preserving
/// aspect ratio. Returns a premultiplied raster no larger than the bounds.
///
/// SVG sources render through `usvg`/`resvg` at the fitted size; raster
/// formats decode through `image` and downscale/upscale with Lanczos3.
pub(crate) fn prepare_logo(bytes: &[u8], max_w: u32, max_h: u32) -> QrylicResult<Raster> {
    if max_w == 0 || max_h == 0 {
        return Err(QrylicError::stage("logo target size must be non-zero"));
    }
    if looks_like_svg(bytes) {
        prepare_svg_logo(bytes, max_w, max_h)
    } else {
        prepare_raster_logo(bytes, max_w, max_h)
    }
}

/// SVG documents start with markup; no supported raster format does.
pub(crate) fn looks_like_svg(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'<')
}

fn prepare_raster_logo(bytes: &[u8], max_w: u32, max_h: u32) -> QrylicResult<Raster> {
    let dyn_img = image::load_from_memory(bytes).context("decode logo image")?;
    let resized = dyn_img.resize(max_w, max_h, image::imageops::FilterType::Lanczos3);
    let rgba = resized.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    premultiply_rgba8_in_place(&mut data);
    Raster::from_premul_data(width, height, data)
}

fn prepare_svg_logo(bytes: &[u8], max_w: u32, max_h: u32) -> QrylicResult<Raster> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse logo svg")?;

    let size = tree.size();
    let (base_w, base_h) = (size.width(), size.height());
    if !base_w.is_finite() || !base_h.is_finite() || base_w <= 0.0 || base_h <= 0.0 {
        return Err(QrylicError::stage("logo svg has invalid width/height"));
    }

    let scale = f64::from(max_w) / f64::from(base_w);
    let scale = scale.min(f64::from(max_h) / f64::from(base_h));
    let width = ((f64::from(base_w) * scale).round() as u32).clamp(1, max_w);
    let height = ((f64::from(base_h) * scale).round() as u32).clamp(1, max_h);

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| QrylicError::stage("failed to allocate logo svg pixmap"))?;
    let sx = (width as f32) / base_w;
    let sy = (height as f32) / base_h;
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    // tiny_skia pixmaps are premultiplied RGBA8 already.
    Raster::from_premul_data(width, height, pixmap.data().to_vec())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
