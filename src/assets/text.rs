use crate::foundation::core::Raster;
use crate::foundation::error::{QrylicError, QrylicResult};
use crate::spec::color::ColorSpec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

/// Caption layout engine wrapping Parley's font and layout contexts.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Lay out a single line of text in the first family of `font_bytes`.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> QrylicResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(QrylicError::stage("text size_px must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            QrylicError::stage("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| QrylicError::stage("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Resolve a system sans-serif face. Returns the raw font bytes plus the face
/// index inside the file (collections can hold several).
pub(crate) fn system_sans_font_bytes() -> QrylicResult<(Vec<u8>, u32)> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let query = usvg::fontdb::Query {
        families: &[usvg::fontdb::Family::SansSerif],
        ..usvg::fontdb::Query::default()
    };
    let id = db
        .query(&query)
        .ok_or_else(|| QrylicError::stage("no system sans-serif font available"))?;
    db.with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| QrylicError::stage("failed to load system font data"))
}

/// Rasterize `text` centered into a transparent band of `band_w x band_h`
/// premultiplied pixels.
pub(crate) fn render_caption_band(
    text: &str,
    font_bytes: &[u8],
    face_index: u32,
    size_px: f32,
    color: ColorSpec,
    band_w: u32,
    band_h: u32,
) -> QrylicResult<Raster> {
    if band_w == 0 || band_h == 0 {
        return Err(QrylicError::stage("caption band must be non-empty"));
    }
    let (Ok(w16), Ok(h16)) = (u16::try_from(band_w), u16::try_from(band_h)) else {
        return Err(QrylicError::stage(format!(
            "caption band {band_w}x{band_h} exceeds the text rasterizer limit"
        )));
    };

    let [r, g, b, a] = color.to_rgba8_straight();
    let brush = TextBrushRgba8 { r, g, b, a };
    let mut engine = TextLayoutEngine::new();
    let layout = engine.layout_plain(text, font_bytes, size_px, brush)?;

    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
        face_index,
    );

    let x0 = ((band_w as f32 - layout.width()) * 0.5).max(0.0);
    let y0 = ((band_h as f32 - layout.height()) * 0.5).max(0.0);

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(x0),
        f64::from(y0),
    )));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);
    Raster::from_premul_data(band_w, band_h, pixmap.data_as_u8_slice().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
