use egui::Pos2;
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Canvas-local coordinates, in pixels
pub type Point = Pos2;

/// How a stroke's pixels are composited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeMode {
    /// Paints the stroke color
    Draw,
    /// Paints the canvas background color back
    Erase,
}

// Immutable stroke for sharing
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    color: Rgba<u8>,
    width: f32,
    mode: StrokeMode,
}

// Mutable stroke for editing
#[derive(Debug, Clone)]
pub struct MutableStroke {
    points: Vec<Point>,
    color: Rgba<u8>,
    width: f32,
    mode: StrokeMode,
}

// Define a reference-counted type alias for Stroke
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(color: Rgba<u8>, width: f32, mode: StrokeMode, points: Vec<Point>) -> Self {
        Self {
            points,
            color,
            width,
            mode,
        }
    }

    pub fn new_ref(color: Rgba<u8>, width: f32, mode: StrokeMode, points: Vec<Point>) -> StrokeRef {
        Arc::new(Self::new(color, width, mode, points))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Exact RGBA written for `Draw` pixels
    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }
}

impl MutableStroke {
    /// Starts a stroke seeded with its first point
    pub fn new(start: Point, color: Rgba<u8>, width: f32, mode: StrokeMode) -> Self {
        Self {
            points: vec![start],
            color,
            width,
            mode,
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    // Convert to an immutable Stroke
    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.color, self.width, self.mode, self.points.clone())
    }

    pub fn into_stroke_ref(self) -> StrokeRef {
        Arc::new(Stroke::new(self.color, self.width, self.mode, self.points))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Calculate distance from a point to a line segment
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}
