use crate::foundation::error::{QrylicError, QrylicResult};
use crate::foundation::math::luma_rec601_u8;

/// Luminance threshold below which an opaque pixel counts as dark.
pub(crate) const DARK_LUMA_THRESHOLD: u8 = 128;

/// Alpha threshold at or above which a pixel participates in dark classification.
pub(crate) const DARK_ALPHA_THRESHOLD: u8 = 128;

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Convert back to straight-alpha RGBA8 with rounding.
    pub fn to_straight_rgba(self) -> [u8; 4] {
        unpremul_rgba8([self.r, self.g, self.b, self.a])
    }

    /// Classify this pixel as dark per the styling pipeline's rule.
    ///
    /// Dark means alpha at or above the opacity threshold and Rec.601 luminance
    /// below the darkness threshold. Base code rasters are opaque, so the
    /// premultiplied channels equal the straight ones there.
    pub fn is_dark(self) -> bool {
        self.a >= DARK_ALPHA_THRESHOLD && luma_rec601_u8(self.r, self.g, self.b) < DARK_LUMA_THRESHOLD
    }
}

pub(crate) fn is_dark_bytes(px: &[u8]) -> bool {
    px[3] >= DARK_ALPHA_THRESHOLD && luma_rec601_u8(px[0], px[1], px[2]) < DARK_LUMA_THRESHOLD
}

pub(crate) fn unpremul_rgba8(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    fn unpremul(c: u8, a: u8) -> u8 {
        let c = u32::from(c);
        let a = u32::from(a);
        ((c * 255 + a / 2) / a).min(255) as u8
    }
    [unpremul(px[0], a), unpremul(px[1], a), unpremul(px[2], a), a]
}

/// A styling-pipeline raster: RGBA8 pixels, tightly packed, row-major.
///
/// Pixels are **premultiplied alpha** throughout the pipeline. Use
/// [`Raster::to_straight_rgba8`] when handing the buffer to an encoder that
/// expects unpremultiplied data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl Raster {
    /// Allocate a raster filled with one color.
    pub fn new(width: u32, height: u32, fill: Rgba8Premul) -> QrylicResult<Self> {
        let len = Self::expected_len(width, height)?;
        let data = [fill.r, fill.g, fill.b, fill.a].repeat(len / 4);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing premultiplied RGBA8 buffer, validating its geometry.
    pub fn from_premul_data(width: u32, height: u32, data: Vec<u8>) -> QrylicResult<Self> {
        let len = Self::expected_len(width, height)?;
        if data.len() != len {
            return Err(QrylicError::config(format!(
                "raster buffer length {} does not match {width}x{height} rgba8 ({len})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Re-check that the buffer length matches `width * height * 4`.
    ///
    /// Fields are public, so boundary APIs revalidate before trusting geometry.
    pub fn validate(&self) -> QrylicResult<()> {
        let len = Self::expected_len(self.width, self.height)?;
        if self.data.len() != len {
            return Err(QrylicError::config(format!(
                "raster buffer length {} does not match {}x{} rgba8 ({len})",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// Read one pixel, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.idx(x, y);
        Some(Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        })
    }

    /// Convert the whole buffer to straight-alpha RGBA8.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremul_rgba8([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    pub(crate) fn idx(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    pub(crate) fn put_px(&mut self, x: u32, y: u32, px: Rgba8Premul) {
        let i = self.idx(x, y);
        self.data[i] = px.r;
        self.data[i + 1] = px.g;
        self.data[i + 2] = px.b;
        self.data[i + 3] = px.a;
    }

    /// Fill the intersection of `[x0, x0+w) x [y0, y0+h)` with the raster.
    pub(crate) fn fill_rect(&mut self, x0: u32, y0: u32, w: u32, h: u32, px: Rgba8Premul) {
        let x_end = x0.saturating_add(w).min(self.width);
        let y_end = y0.saturating_add(h).min(self.height);
        for y in y0.min(self.height)..y_end {
            for x in x0..x_end {
                self.put_px(x, y, px);
            }
        }
    }

    fn expected_len(width: u32, height: u32) -> QrylicResult<usize> {
        if width == 0 || height == 0 {
            return Err(QrylicError::config("raster dimensions must be non-zero"));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| QrylicError::config("raster buffer size overflow"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
