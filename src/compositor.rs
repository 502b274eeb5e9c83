//! Deterministic rasterization of a background plus an ordered stroke list.
//!
//! Strokes are drawn as round-capped segments with hard edges: a pixel is
//! painted when its center lies within half the stroke width of the stroke's
//! path. No anti-aliasing, so fill boundaries stay pixel-exact.

use egui::Pos2;
use image::Rgba;

use crate::config::CanvasConfig;
use crate::history::{Background, Snapshot};
use crate::raster::Raster;
use crate::stroke::{distance_to_line_segment, MutableStroke, Point, Stroke, StrokeMode, StrokeRef};

/// Thinnest radius that still covers at least the pixel under the pointer
const MIN_RADIUS: f32 = 0.5;

/// Background first, then every stroke in insertion order
pub fn render(config: &CanvasConfig, background: &Background, strokes: &[StrokeRef]) -> Raster {
    let mut raster = background_raster(config, background);
    for stroke in strokes {
        paint_stroke(&mut raster, config, stroke);
    }
    raster
}

pub fn render_snapshot(config: &CanvasConfig, snapshot: &Snapshot) -> Raster {
    render(config, snapshot.background(), snapshot.strokes())
}

/// The snapshot with an in-progress stroke drawn on top
pub fn render_with_preview(
    config: &CanvasConfig,
    snapshot: &Snapshot,
    active: Option<&MutableStroke>,
) -> Raster {
    let mut raster = render_snapshot(config, snapshot);
    if let Some(active) = active {
        paint_stroke(&mut raster, config, &active.to_stroke());
    }
    raster
}

fn background_raster(config: &CanvasConfig, background: &Background) -> Raster {
    match background {
        Background::Blank => Raster::blank(config),
        Background::Raster(raster) => raster.as_ref().clone(),
    }
}

fn paint_stroke(raster: &mut Raster, config: &CanvasConfig, stroke: &Stroke) {
    let pixel = match stroke.mode() {
        StrokeMode::Draw => stroke.color(),
        StrokeMode::Erase => Rgba(config.background),
    };
    let radius = (stroke.width() / 2.0).max(MIN_RADIUS);

    match stroke.points() {
        [] => {}
        [only] => stamp_segment(raster, *only, *only, radius, pixel),
        points => {
            for pair in points.windows(2) {
                stamp_segment(raster, pair[0], pair[1], radius, pixel);
            }
        }
    }
}

/// Paints every pixel whose center is within `radius` of the segment `a..b`
fn stamp_segment(raster: &mut Raster, a: Point, b: Point, radius: f32, pixel: Rgba<u8>) {
    let min_x = (a.x.min(b.x) - radius).floor().max(0.0) as i64;
    let min_y = (a.y.min(b.y) - radius).floor().max(0.0) as i64;
    let max_x = ((a.x.max(b.x) + radius).ceil() as i64).min(raster.width() as i64 - 1);
    let max_y = ((a.y.max(b.y) + radius).ceil() as i64).min(raster.height() as i64 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if distance_to_line_segment(center, a, b) <= radius {
                raster.set(x, y, pixel);
            }
        }
    }
}
