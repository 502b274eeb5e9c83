use image::Rgba;

use crate::error::NoOp;
use crate::raster::Raster;
use crate::stroke::Point;

/// Summary of a completed flood fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillReport {
    /// Color of the region that was replaced
    pub target: Rgba<u8>,
    pub pixels_filled: usize,
}

/// Pixel under a canvas-local point
pub fn seed_pixel(point: Point) -> (i64, i64) {
    (point.x.floor() as i64, point.y.floor() as i64)
}

/// Replaces the 4-connected region of exactly the seed's color with `color`.
///
/// Uses an explicit work stack; each popped coordinate is bounds-checked and
/// re-sampled before being painted, so the stack may hold stale or
/// out-of-range entries without harm. Leaves the raster untouched when the
/// seed is outside it or already has `color`.
pub fn flood_fill(raster: &mut Raster, seed: (i64, i64), color: Rgba<u8>) -> Result<FillReport, NoOp> {
    let (sx, sy) = seed;
    let target = raster
        .get(sx, sy)
        .ok_or(NoOp::InvalidCoordinate { x: sx, y: sy })?;
    if target == color {
        return Err(NoOp::NoOpFill);
    }

    let mut pixels_filled = 0;
    let mut stack: Vec<(i64, i64)> = Vec::with_capacity(4096);
    stack.push(seed);

    while let Some((x, y)) = stack.pop() {
        match raster.get(x, y) {
            Some(current) if current == target => {}
            _ => continue,
        }
        raster.set(x, y, color);
        pixels_filled += 1;

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    Ok(FillReport {
        target,
        pixels_filled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Pos2};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn test_fills_uniform_raster_completely() {
        let mut raster = Raster::filled(8, 6, Color32::WHITE);
        let report = flood_fill(&mut raster, (3, 3), RED).unwrap();
        assert_eq!(report.pixels_filled, 48);
        assert_eq!(report.target, Rgba([255, 255, 255, 255]));
        assert!(raster.as_image().pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_same_color_is_noop() {
        let mut raster = Raster::filled(4, 4, Color32::RED);
        let before = raster.clone();
        assert_eq!(flood_fill(&mut raster, (1, 1), RED), Err(NoOp::NoOpFill));
        assert_eq!(raster, before);
    }

    #[test]
    fn test_seed_outside_raster_is_rejected() {
        let mut raster = Raster::filled(4, 4, Color32::WHITE);
        assert_eq!(
            flood_fill(&mut raster, (4, 0), RED),
            Err(NoOp::InvalidCoordinate { x: 4, y: 0 })
        );
        assert!(flood_fill(&mut raster, (-1, 2), RED).is_err());
    }

    #[test]
    fn test_diagonal_gaps_do_not_leak() {
        // Diagonal wall from top-left to bottom-right
        let mut raster = Raster::filled(5, 5, Color32::WHITE);
        for i in 0..5 {
            raster.set(i, i, BLACK);
        }
        let report = flood_fill(&mut raster, (4, 0), RED).unwrap();
        assert_eq!(report.pixels_filled, 10);
        assert_eq!(raster.get(0, 4), Some(Rgba([255, 255, 255, 255])));
        assert_eq!(raster.get(2, 2), Some(BLACK));
    }

    #[test]
    fn test_transparent_region_is_ordinary_target() {
        let mut raster = Raster::filled(3, 3, Color32::TRANSPARENT);
        raster.set(1, 1, BLACK);
        let report = flood_fill(&mut raster, (0, 0), Rgba([0, 0, 0, 128])).unwrap();
        assert_eq!(report.pixels_filled, 8);
        assert_eq!(raster.get(1, 1), Some(BLACK));
    }

    #[test]
    fn test_corner_seeds_stay_in_bounds() {
        let mut raster = Raster::filled(7, 5, Color32::WHITE);
        assert_eq!(flood_fill(&mut raster, (0, 0), RED).unwrap().pixels_filled, 35);
        let report = flood_fill(&mut raster, (6, 4), BLACK).unwrap();
        assert_eq!(report.pixels_filled, 35);
        assert_eq!(report.target, RED);
    }

    #[test]
    fn test_seed_pixel_floors_coordinates() {
        assert_eq!(seed_pixel(Pos2::new(2.9, 0.1)), (2, 0));
        assert_eq!(seed_pixel(Pos2::new(-0.5, 3.0)), (-1, 3));
    }
}
