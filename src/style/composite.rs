use crate::foundation::core::{Raster, Rgba8Premul};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over compositing of premultiplied pixels with an extra opacity.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Composite `src` over `dst` with its top-left corner at `(x0, y0)`,
/// clipped to `dst`.
pub(crate) fn over_patch(dst: &mut Raster, src: &Raster, x0: u32, y0: u32) {
    let x_end = x0.saturating_add(src.width).min(dst.width);
    let y_end = y0.saturating_add(src.height).min(dst.height);
    for y in y0.min(dst.height)..y_end {
        for x in x0..x_end {
            let di = dst.idx(x, y);
            let si = src.idx(x - x0, y - y0);
            let d = [
                dst.data[di],
                dst.data[di + 1],
                dst.data[di + 2],
                dst.data[di + 3],
            ];
            let s = [
                src.data[si],
                src.data[si + 1],
                src.data[si + 2],
                src.data[si + 3],
            ];
            let out = over(d, s, 1.0);
            dst.data[di..di + 4].copy_from_slice(&out);
        }
    }
}

/// Scale the color channels of a premultiplied pixel, keeping alpha.
pub(crate) fn shade(px: Rgba8Premul, factor: u8) -> Rgba8Premul {
    Rgba8Premul {
        r: mul_div255(u16::from(px.r), u16::from(factor)),
        g: mul_div255(u16::from(px.g), u16::from(factor)),
        b: mul_div255(u16::from(px.b), u16::from(factor)),
        a: px.a,
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/style/composite.rs"]
mod tests;
