use super::*;
use crate::matrix::raster::{GridRenderOpts, render_grid};

const MS: u32 = 10;

fn grid_with_dark(dark: &[(u32, u32)]) -> ModuleGrid {
    let count = 21;
    let mut bits = vec![false; (count * count) as usize];
    for (x, y) in dark {
        bits[(y * count + x) as usize] = true;
    }
    ModuleGrid::new(count, 2, bits).unwrap()
}

fn base_for(grid: &ModuleGrid) -> Raster {
    let opts = GridRenderOpts {
        module_size: MS,
        ..GridRenderOpts::default()
    };
    render_grid(grid, &opts).unwrap()
}

fn spec(shape: ModuleShape) -> ModuleStyleSpec {
    ModuleStyleSpec {
        shape,
        corner_radius_ratio: 0.3,
    }
}

/// Pixel coordinates of the top-left corner of module `(mx, my)`.
fn module_origin(grid: &ModuleGrid, mx: u32, my: u32) -> (u32, u32) {
    let q = grid.quiet_zone();
    ((q + mx) * MS, (q + my) * MS)
}

#[test]
fn square_shape_skips_the_stage() {
    let grid = grid_with_dark(&[(3, 3)]);
    let base = base_for(&grid);
    let out = restyle_modules(&base, &grid, &spec(ModuleShape::Square)).unwrap();
    assert!(out.is_none());
}

#[test]
fn non_square_raster_is_a_stage_failure() {
    let grid = grid_with_dark(&[(3, 3)]);
    let bad = Raster::new(250, 240, Rgba8Premul::from_straight_rgba(255, 255, 255, 255)).unwrap();
    assert!(restyle_modules(&bad, &grid, &spec(ModuleShape::Dots)).is_err());
}

#[test]
fn misaligned_raster_edge_is_a_stage_failure() {
    let grid = grid_with_dark(&[(3, 3)]);
    // 21 modules + 2*2 quiet cells = 25 cells; 251 is not a multiple.
    let bad = Raster::new(251, 251, Rgba8Premul::from_straight_rgba(255, 255, 255, 255)).unwrap();
    assert!(restyle_modules(&bad, &grid, &spec(ModuleShape::Dots)).is_err());
}

#[test]
fn dots_carves_corners_and_keeps_the_center() {
    let grid = grid_with_dark(&[(3, 3)]);
    let base = base_for(&grid);
    let out = restyle_modules(&base, &grid, &spec(ModuleShape::Dots))
        .unwrap()
        .unwrap();

    let (x0, y0) = module_origin(&grid, 3, 3);
    let background = out.pixel(0, 0).unwrap();
    assert!(!background.is_dark());

    assert_eq!(out.pixel(x0, y0).unwrap(), background);
    assert_eq!(out.pixel(x0 + MS - 1, y0 + MS - 1).unwrap(), background);
    assert!(out.pixel(x0 + MS / 2, y0 + MS / 2).unwrap().is_dark());
    // The inscribed circle touches the edge midpoints.
    assert!(out.pixel(x0 + MS / 2, y0).unwrap().is_dark());
}

#[test]
fn rounded_carves_all_four_corners() {
    let grid = grid_with_dark(&[(5, 5)]);
    let base = base_for(&grid);
    let out = restyle_modules(&base, &grid, &spec(ModuleShape::Rounded))
        .unwrap()
        .unwrap();

    let (x0, y0) = module_origin(&grid, 5, 5);
    let background = out.pixel(0, 0).unwrap();
    for (cx, cy) in [
        (x0, y0),
        (x0 + MS - 1, y0),
        (x0, y0 + MS - 1),
        (x0 + MS - 1, y0 + MS - 1),
    ] {
        assert_eq!(out.pixel(cx, cy).unwrap(), background);
    }
    // Edge midpoints stay dark with a 0.3 radius.
    assert!(out.pixel(x0 + MS / 2, y0).unwrap().is_dark());
    assert!(out.pixel(x0, y0 + MS / 2).unwrap().is_dark());
}

#[test]
fn classy_carves_only_two_diagonal_corners() {
    let grid = grid_with_dark(&[(5, 5)]);
    let base = base_for(&grid);
    let out = restyle_modules(&base, &grid, &spec(ModuleShape::Classy))
        .unwrap()
        .unwrap();

    let (x0, y0) = module_origin(&grid, 5, 5);
    let background = out.pixel(0, 0).unwrap();
    assert_eq!(out.pixel(x0, y0).unwrap(), background);
    assert_eq!(out.pixel(x0 + MS - 1, y0 + MS - 1).unwrap(), background);
    assert!(out.pixel(x0 + MS - 1, y0).unwrap().is_dark());
    assert!(out.pixel(x0, y0 + MS - 1).unwrap().is_dark());
}

#[test]
fn light_modules_are_never_touched() {
    let grid = grid_with_dark(&[(3, 3)]);
    let base = base_for(&grid);
    let out = restyle_modules(&base, &grid, &spec(ModuleShape::Dots))
        .unwrap()
        .unwrap();

    let (x0, y0) = module_origin(&grid, 4, 4);
    for ly in 0..MS {
        for lx in 0..MS {
            assert_eq!(out.pixel(x0 + lx, y0 + ly), base.pixel(x0 + lx, y0 + ly));
        }
    }
}

#[test]
fn every_shape_keeps_module_centers_dark_on_a_real_code() {
    let code = qrcode::QrCode::new(b"https://example.com/qrylic").unwrap();
    let grid = ModuleGrid::from_qrcode(&code, 4).unwrap();
    let base = base_for(&grid);

    for shape in [
        ModuleShape::Dots,
        ModuleShape::Rounded,
        ModuleShape::ExtraRounded,
        ModuleShape::Classy,
        ModuleShape::ClassyRounded,
    ] {
        let out = restyle_modules(&base, &grid, &spec(shape))
            .unwrap()
            .unwrap();
        let q = grid.quiet_zone();
        for my in 0..grid.count() {
            for mx in 0..grid.count() {
                if !grid.is_dark(mx, my) {
                    continue;
                }
                let cx = (q + mx) * MS + MS / 2;
                let cy = (q + my) * MS + MS / 2;
                assert!(
                    out.pixel(cx, cy).unwrap().is_dark(),
                    "{shape:?} carved the center of module ({mx}, {my})"
                );
            }
        }
    }
}
