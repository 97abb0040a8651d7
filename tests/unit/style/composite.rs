use super::*;
use crate::foundation::core::{Raster, Rgba8Premul};

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_patch_clips_to_destination() {
    let red = Rgba8Premul::from_straight_rgba(255, 0, 0, 255);
    let blue = Rgba8Premul::from_straight_rgba(0, 0, 255, 255);
    let mut dst = Raster::new(4, 4, red).unwrap();
    let src = Raster::new(3, 3, blue).unwrap();

    over_patch(&mut dst, &src, 2, 2);

    assert_eq!(dst.pixel(1, 1).unwrap(), red);
    assert_eq!(dst.pixel(2, 2).unwrap(), blue);
    assert_eq!(dst.pixel(3, 3).unwrap(), blue);
    // Rows past the edge were clipped, not wrapped.
    assert_eq!(dst.pixel(0, 3).unwrap(), red);
}

#[test]
fn shade_scales_color_and_keeps_alpha() {
    let px = Rgba8Premul {
        r: 200,
        g: 100,
        b: 0,
        a: 255,
    };
    let shaded = shade(px, 128);
    assert_eq!(shaded.a, 255);
    assert!(shaded.r < px.r);
    assert_eq!(shaded.r, ((200u32 * 128 + 127) / 255) as u8);
    assert_eq!(shaded.b, 0);
}
