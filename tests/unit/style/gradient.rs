use super::*;
use crate::foundation::core::{Raster, Rgba8Premul};

fn black() -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(0, 0, 0, 255)
}

fn two_stop_spec(kind: GradientKind) -> GradientSpec {
    GradientSpec {
        kind,
        stops: vec![
            ColorSpec::rgba(0.0, 0.0, 0.0, 1.0),
            ColorSpec::rgba(1.0, 1.0, 1.0, 1.0),
        ],
    }
}

#[test]
fn kind_none_skips_the_stage() {
    let input = Raster::new(4, 4, black()).unwrap();
    let spec = GradientSpec::default();
    assert!(apply_gradient(&input, &spec).unwrap().is_none());
}

#[test]
fn empty_stop_list_is_a_stage_failure() {
    let input = Raster::new(4, 4, black()).unwrap();
    let spec = GradientSpec {
        kind: GradientKind::Radial,
        stops: Vec::new(),
    };
    assert!(apply_gradient(&input, &spec).is_err());
}

#[test]
fn vertical_column_hits_both_endpoints_and_is_monotonic() {
    // The concrete scenario: a 100px-tall dark column under a black-to-white
    // vertical gradient lands on (0,0,0) at y=0 and (255,255,255) at y=99.
    let input = Raster::new(1, 100, black()).unwrap();
    let out = apply_gradient(&input, &two_stop_spec(GradientKind::LinearVertical))
        .unwrap()
        .unwrap();

    let top = out.pixel(0, 0).unwrap();
    let bottom = out.pixel(0, 99).unwrap();
    assert!(top.r <= 1 && top.g <= 1 && top.b <= 1);
    assert!(bottom.r >= 254 && bottom.g >= 254 && bottom.b >= 254);

    let mut prev = out.pixel(0, 0).unwrap();
    for y in 1..100 {
        let px = out.pixel(0, y).unwrap();
        assert!(px.r >= prev.r && px.g >= prev.g && px.b >= prev.b);
        prev = px;
    }
}

#[test]
fn horizontal_gradient_varies_along_x_only() {
    let input = Raster::new(10, 3, black()).unwrap();
    let out = apply_gradient(&input, &two_stop_spec(GradientKind::LinearHorizontal))
        .unwrap()
        .unwrap();

    assert_eq!(out.pixel(0, 0), out.pixel(0, 2));
    assert_eq!(out.pixel(0, 0).unwrap().r, 0);
    assert_eq!(out.pixel(9, 1).unwrap().r, 255);
}

#[test]
fn radial_maps_center_to_first_stop_and_corner_to_last() {
    let input = Raster::new(9, 9, black()).unwrap();
    let out = apply_gradient(&input, &two_stop_spec(GradientKind::Radial))
        .unwrap()
        .unwrap();

    assert_eq!(out.pixel(4, 4).unwrap().r, 0);
    assert_eq!(out.pixel(0, 0).unwrap().r, 255);
    assert_eq!(out.pixel(8, 8).unwrap().r, 255);
}

#[test]
fn light_pixels_pass_through_untouched() {
    let white = Rgba8Premul::from_straight_rgba(255, 255, 255, 255);
    let mut input = Raster::new(4, 4, white).unwrap();
    input.put_px(1, 1, black());

    let spec = GradientSpec {
        kind: GradientKind::LinearVertical,
        stops: vec![ColorSpec::rgba(1.0, 0.0, 0.0, 1.0)],
    };
    let out = apply_gradient(&input, &spec).unwrap().unwrap();

    assert_eq!(out.pixel(0, 0).unwrap(), white);
    let dark = out.pixel(1, 1).unwrap();
    assert_eq!((dark.r, dark.g, dark.b), (255, 0, 0));
}

#[test]
fn single_stop_acts_as_flat_recolor() {
    let input = Raster::new(3, 3, black()).unwrap();
    let spec = GradientSpec {
        kind: GradientKind::Radial,
        stops: vec![ColorSpec::rgba(0.0, 0.0, 0.25, 1.0)],
    };
    let out = apply_gradient(&input, &spec).unwrap().unwrap();
    let expected = ColorSpec::rgba(0.0, 0.0, 0.25, 1.0).to_rgba8_premul();
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(out.pixel(x, y).unwrap(), expected);
        }
    }
}

#[test]
fn color_at_clamps_out_of_range_positions() {
    let stops = [
        ColorSpec::rgba(0.0, 0.0, 0.0, 1.0),
        ColorSpec::rgba(0.5, 0.5, 0.5, 1.0),
        ColorSpec::rgba(1.0, 1.0, 1.0, 1.0),
    ];
    assert_eq!(color_at(&stops, -0.5), stops[0]);
    assert_eq!(color_at(&stops, 0.0), stops[0]);
    assert_eq!(color_at(&stops, 1.0), stops[2]);
    assert_eq!(color_at(&stops, 1.5), stops[2]);
    assert_eq!(color_at(&stops, 0.5), stops[1]);
}
