use std::path::Path;

use crate::assets::fetch::normalize_rel_path;
use crate::assets::text::{render_caption_band, system_sans_font_bytes};
use crate::foundation::core::{Raster, Rgba8Premul};
use crate::foundation::error::{QrylicError, QrylicResult};
use crate::spec::model::{CaptionSpec, FrameSpec, FrameStyle};
use crate::style::composite::{over_patch, shade};

/// Vertical room reserved under the code for a caption, in pixels.
const TEXT_SPACE_PX: u32 = 60;

/// Shading factor for frame accents (edge ring, banner band), out of 255.
const ACCENT_SHADE: u8 = 191;

/// Surround the input with a solid border and optional caption band.
///
/// The border is a tenth of the input width on every side. When a caption is
/// configured an extra band of [`TEXT_SPACE_PX`] rows is appended below the
/// bottom border and the rendered text is composited into it. Frame style
/// `none` skips the stage.
pub(crate) fn compose_frame(
    input: &Raster,
    spec: &FrameSpec,
    assets_root: Option<&Path>,
) -> QrylicResult<Option<Raster>> {
    if spec.style == FrameStyle::None {
        return Ok(None);
    }

    let w = input.width;
    let h = input.height;
    let fw = frame_width(w);
    let caption = spec.effective_caption();
    let ts = if caption.is_some() { TEXT_SPACE_PX } else { 0 };

    let out_w = u64::from(w) + 2 * u64::from(fw);
    let out_h = u64::from(h) + 2 * u64::from(fw) + u64::from(ts);
    let (Ok(out_w), Ok(out_h)) = (u32::try_from(out_w), u32::try_from(out_h)) else {
        return Err(QrylicError::stage(format!(
            "framed raster dimensions overflow ({w}x{h} input)"
        )));
    };

    let frame_px = spec.color.to_rgba8_premul();
    let mut out = Raster::new(out_w, out_h, frame_px)?;
    over_patch(&mut out, input, fw, fw);

    let accent = shade(frame_px, ACCENT_SHADE);
    match spec.style {
        FrameStyle::None | FrameStyle::Basic => {}
        FrameStyle::Circular => {
            // Clip the bordered square to a circle; the caption band below
            // keeps its rectangular footprint.
            let sq = h + 2 * fw;
            let cx = f64::from(out_w) / 2.0;
            let cy = f64::from(sq) / 2.0;
            let radius = f64::from(out_w.min(sq)) / 2.0;
            for y in 0..sq {
                for x in 0..out_w {
                    let dx = f64::from(x) + 0.5 - cx;
                    let dy = f64::from(y) + 0.5 - cy;
                    if dx.hypot(dy) > radius {
                        out.put_px(x, y, Rgba8Premul::transparent());
                    }
                }
            }
        }
        FrameStyle::Edge => {
            // Shaded ring hugging the content, drawn inside the border.
            let t = (fw / 4).max(2).min(fw);
            out.fill_rect(fw - t, fw - t, w + 2 * t, t, accent);
            out.fill_rect(fw - t, fw + h, w + 2 * t, t, accent);
            out.fill_rect(fw - t, fw, t, h, accent);
            out.fill_rect(fw + w, fw, t, h, accent);
        }
        FrameStyle::Banner => {
            if caption.is_some() {
                out.fill_rect(0, h + 2 * fw, out_w, ts, accent);
            } else {
                out.fill_rect(0, fw + h, out_w, fw, accent);
            }
        }
    }

    if let Some(caption) = caption {
        let (font_bytes, face_index) = caption_font(caption, assets_root)?;
        let band = render_caption_band(
            &caption.text,
            &font_bytes,
            face_index,
            caption.size_px,
            caption.color,
            out_w,
            ts,
        )?;
        over_patch(&mut out, &band, 0, h + 2 * fw);
    }

    Ok(Some(out))
}

/// Border thickness for an input of width `w`.
fn frame_width(w: u32) -> u32 {
    (f64::from(w) * 0.1).round() as u32
}

/// Resolve the caption font: an explicit `font_source` is read relative to
/// the assets root, otherwise the system sans-serif face is used.
fn caption_font(caption: &CaptionSpec, assets_root: Option<&Path>) -> QrylicResult<(Vec<u8>, u32)> {
    if let Some(source) = &caption.font_source {
        let rel = normalize_rel_path(source)?;
        let root = assets_root.ok_or_else(|| {
            QrylicError::stage("caption font_source is set but no assets root is configured")
        })?;
        let path = root.join(rel);
        let bytes = std::fs::read(&path).map_err(|err| {
            QrylicError::stage(format!("read caption font {}: {err}", path.display()))
        })?;
        return Ok((bytes, 0));
    }
    system_sans_font_bytes()
}

#[cfg(test)]
#[path = "../../tests/unit/style/frame.rs"]
mod tests;
