use doodle_canvas::fill::flood_fill;
use doodle_canvas::{CanvasConfig, DrawingSurface, NoOp, Raster};
use egui::{Color32, Pos2};
use image::Rgba;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

#[test]
fn test_fill_changes_only_enclosed_component() {
    let config = CanvasConfig::new(40, 40, Color32::WHITE).unwrap();
    let mut surface = DrawingSurface::new(config).unwrap();
    surface.set_brush_width(2.0);

    // Square outline; with width 2 the walls cover columns/rows 9..=10 and 29..=30
    let corners = [
        Pos2::new(10.0, 10.0),
        Pos2::new(30.0, 10.0),
        Pos2::new(30.0, 30.0),
        Pos2::new(10.0, 30.0),
        Pos2::new(10.0, 10.0),
    ];
    surface.begin_stroke(corners[0]).unwrap();
    for corner in &corners[1..] {
        surface.extend_stroke(*corner).unwrap();
    }
    surface.end_stroke().unwrap();

    let before = surface.composite();
    surface.set_color(Color32::RED);
    let report = surface.fill_at(Pos2::new(20.0, 20.0)).unwrap();
    let after = surface.composite();

    let inside = |x: u32, y: u32| (11..=28).contains(&x) && (11..=28).contains(&y);
    let mut changed = 0;
    for (x, y, pixel) in after.as_image().enumerate_pixels() {
        let old = before.as_image().get_pixel(x, y);
        if inside(x, y) {
            assert_eq!(*old, WHITE, "interior pixel ({}, {}) was not white", x, y);
            assert_eq!(*pixel, RED, "interior pixel ({}, {}) was not filled", x, y);
        }
        if pixel != old {
            assert!(inside(x, y), "pixel ({}, {}) outside the region changed", x, y);
            changed += 1;
        }
    }
    assert_eq!(changed, 18 * 18);
    assert_eq!(report.pixels_filled, changed);
    assert_eq!(report.target, WHITE);
}

#[test]
fn test_corner_seeds_complete_without_leaving_bounds() {
    let config = CanvasConfig::new(64, 32, Color32::WHITE).unwrap();
    let mut surface = DrawingSurface::new(config).unwrap();

    surface.set_color(Color32::RED);
    let report = surface.fill_at(Pos2::new(0.0, 0.0)).unwrap();
    assert_eq!(report.pixels_filled, 64 * 32);

    surface.set_color(Color32::BLACK);
    let report = surface.fill_at(Pos2::new(63.0, 31.0)).unwrap();
    assert_eq!(report.pixels_filled, 64 * 32);
    assert!(surface.composite().as_image().pixels().all(|p| *p == BLACK));
}

#[test]
fn test_fill_twice_with_same_color_is_idempotent() {
    let mut raster = Raster::filled(16, 16, Color32::WHITE);
    for y in 0..16 {
        raster.set(8, y, BLACK);
    }

    flood_fill(&mut raster, (2, 2), RED).unwrap();
    let once = raster.clone();
    assert_eq!(flood_fill(&mut raster, (2, 2), RED), Err(NoOp::NoOpFill));
    assert_eq!(raster, once);
    assert_eq!(raster.get(12, 2), Some(WHITE));
}

#[test]
fn test_large_fill_does_not_exhaust_stack() {
    // A serpentine corridor forces a long single-pixel-wide region
    let side = 512;
    let mut raster = Raster::filled(side, side, Color32::WHITE);
    for x in (1..side as i64).step_by(2) {
        let gap = if (x / 2) % 2 == 0 { side as i64 - 1 } else { 0 };
        for y in 0..side as i64 {
            if y != gap {
                raster.set(x, y, BLACK);
            }
        }
    }

    let report = flood_fill(&mut raster, (0, 0), RED).unwrap();
    let whites = side as usize * side as usize / 2 + side as usize / 2;
    assert_eq!(report.pixels_filled, whites);
    assert!(raster.as_image().pixels().all(|p| *p != WHITE));
}
