use egui::Color32;
use image::Rgba;
use std::sync::Arc;

use crate::compositor;
use crate::config::{BrushSettings, CanvasConfig};
use crate::engine::{StrokeEngine, Tool};
use crate::error::{CanvasResult, NoOp};
use crate::export::{self, ExportedImage};
use crate::fill::{self, FillReport};
use crate::history::{Background, History, Snapshot};
use crate::input::InputEvent;
use crate::raster::Raster;
use crate::stroke::Point;

/// Operations a host invokes on a drawing canvas.
///
/// This is the whole contract between the canvas and whatever owns the
/// round: submission, timers and networking stay on the host side.
pub trait CanvasHandle {
    /// Encode the current composite. Before any drawing this is the blank canvas.
    fn request_image_export(&self) -> CanvasResult<ExportedImage>;

    /// Reset to a single blank snapshot
    fn clear_all(&mut self);

    fn undo(&mut self) -> Result<(), NoOp>;

    fn redo(&mut self) -> Result<(), NoOp>;
}

/// A single player's canvas: history, active gesture and tool settings
#[derive(Debug)]
pub struct DrawingSurface {
    config: CanvasConfig,
    history: History,
    engine: StrokeEngine,
    tool: Tool,
    brush: BrushSettings,
}

impl DrawingSurface {
    pub fn new(config: CanvasConfig) -> CanvasResult<Self> {
        config.validate()?;
        log::info!(
            "Created {}x{} drawing surface",
            config.width,
            config.height
        );
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CanvasConfig) -> Self {
        Self {
            config,
            history: History::new(),
            engine: StrokeEngine::new(),
            tool: Tool::default(),
            brush: BrushSettings::default(),
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The snapshot currently on screen
    pub fn current(&self) -> &Snapshot {
        self.history.current()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switching tools abandons any stroke in progress
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            self.engine.cancel();
            self.tool = tool;
        }
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn set_brush(&mut self, brush: BrushSettings) {
        self.brush = brush;
    }

    pub fn set_color(&mut self, color: Color32) {
        self.brush.set_color(color);
    }

    pub fn set_brush_width(&mut self, width: f32) {
        self.brush.width = width.max(0.0);
    }

    pub fn is_drawing(&self) -> bool {
        self.engine.is_drawing()
    }

    /// Points collected so far by the gesture in progress, 0 when idle
    pub fn active_stroke_len(&self) -> usize {
        self.engine
            .active_stroke()
            .map_or(0, |stroke| stroke.points().len())
    }

    pub fn begin_stroke(&mut self, point: Point) -> Result<(), NoOp> {
        self.engine
            .begin(point, self.tool, Rgba(self.brush.color), self.brush.width)
    }

    pub fn extend_stroke(&mut self, point: Point) -> Result<(), NoOp> {
        self.engine.extend(point)
    }

    /// Commits the active stroke on top of the current snapshot
    pub fn end_stroke(&mut self) -> Result<(), NoOp> {
        let stroke = self.engine.end()?;
        log::info!(
            "Committed {:?} stroke with {} points",
            stroke.mode(),
            stroke.points().len()
        );
        let snapshot = self.history.current().with_stroke(stroke);
        self.history.push(snapshot);
        Ok(())
    }

    /// Flood-fills the composite from `point` with the brush color and bakes
    /// the result into a new stroke-less background.
    pub fn fill_at(&mut self, point: Point) -> Result<FillReport, NoOp> {
        let color = Rgba(self.brush.color);
        let mut raster = compositor::render_snapshot(&self.config, self.history.current());
        let report = fill::flood_fill(&mut raster, fill::seed_pixel(point), color)?;

        log::info!(
            "Filled {} pixels at ({:.0}, {:.0})",
            report.pixels_filled,
            point.x,
            point.y
        );
        self.history
            .push(Snapshot::new(Vec::new(), Background::Raster(Arc::new(raster))));
        Ok(report)
    }

    /// Dispatches a translated input event to the active tool
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), NoOp> {
        let result = match event {
            InputEvent::PointerDown { location } if !location.is_in_canvas => {
                Err(NoOp::InvalidCoordinate {
                    x: location.position.x as i64,
                    y: location.position.y as i64,
                })
            }
            InputEvent::PointerDown { location } => match self.tool {
                Tool::Fill => self.fill_at(location.position).map(|_| ()),
                Tool::Brush | Tool::Eraser => self.begin_stroke(location.position),
            },
            InputEvent::PointerMove { location } => {
                if self.engine.is_drawing() {
                    self.extend_stroke(location.position)
                } else {
                    // Hovering without a gesture
                    Ok(())
                }
            }
            InputEvent::PointerUp { location } => self
                .extend_stroke(location.position)
                .and_then(|()| self.end_stroke()),
            InputEvent::PointerLeave => self.end_stroke(),
        };

        if let Err(reason) = &result {
            log::debug!("Ignored {:?}: {}", event, reason);
        }
        result
    }

    /// The committed canvas state, rendered
    pub fn composite(&self) -> Raster {
        compositor::render_snapshot(&self.config, self.history.current())
    }

    /// The committed state plus the stroke being drawn, for live display
    pub fn preview(&self) -> Raster {
        compositor::render_with_preview(
            &self.config,
            self.history.current(),
            self.engine.active_stroke(),
        )
    }
}

impl Default for DrawingSurface {
    /// A 500x500 white canvas
    fn default() -> Self {
        Self::from_valid_config(CanvasConfig::default())
    }
}

impl CanvasHandle for DrawingSurface {
    fn request_image_export(&self) -> CanvasResult<ExportedImage> {
        if self.history.current().is_blank() {
            log::debug!("Exporting blank canvas");
        }
        export::encode_png(&self.composite())
    }

    fn clear_all(&mut self) {
        self.engine.cancel();
        self.history.reset();
        log::info!("Cleared canvas");
    }

    fn undo(&mut self) -> Result<(), NoOp> {
        self.engine.cancel();
        let snapshot = self.history.undo()?;
        log::info!("Undo to snapshot {}", snapshot.id());
        Ok(())
    }

    fn redo(&mut self) -> Result<(), NoOp> {
        self.engine.cancel();
        let snapshot = self.history.redo()?;
        log::info!("Redo to snapshot {}", snapshot.id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputLocation;
    use crate::raster::to_pixel;
    use egui::Pos2;

    fn surface() -> DrawingSurface {
        let config = CanvasConfig::new(40, 30, Color32::WHITE).unwrap();
        DrawingSurface::new(config).unwrap()
    }

    fn at(x: f32, y: f32) -> InputLocation {
        InputLocation {
            position: Pos2::new(x, y),
            is_in_canvas: true,
        }
    }

    #[test]
    fn test_stroke_commit_pushes_one_snapshot() {
        let mut surface = surface();
        surface.begin_stroke(Pos2::new(5.0, 5.0)).unwrap();
        surface.extend_stroke(Pos2::new(20.0, 5.0)).unwrap();
        assert_eq!(surface.history().len(), 1);

        surface.end_stroke().unwrap();
        assert_eq!(surface.history().len(), 2);
        assert_eq!(surface.current().strokes().len(), 1);
        assert_eq!(surface.current().background(), &Background::Blank);
    }

    #[test]
    fn test_preview_includes_active_stroke() {
        let mut surface = surface();
        surface.begin_stroke(Pos2::new(5.0, 5.0)).unwrap();
        surface.extend_stroke(Pos2::new(20.0, 5.0)).unwrap();

        assert_eq!(surface.preview().get(10, 5), Some(to_pixel(Color32::BLACK)));
        assert_eq!(surface.composite().get(10, 5), Some(to_pixel(Color32::WHITE)));
    }

    #[test]
    fn test_fill_discards_strokes_into_background() {
        let mut surface = surface();
        surface.begin_stroke(Pos2::new(0.0, 15.0)).unwrap();
        surface.extend_stroke(Pos2::new(40.0, 15.0)).unwrap();
        surface.end_stroke().unwrap();

        surface.set_color(Color32::RED);
        let report = surface.fill_at(Pos2::new(1.0, 1.0)).unwrap();
        assert!(report.pixels_filled > 0);
        assert!(surface.current().strokes().is_empty());
        assert!(matches!(surface.current().background(), Background::Raster(_)));
        assert_eq!(surface.composite().get(1, 1), Some(to_pixel(Color32::RED)));
        assert_eq!(surface.composite().get(1, 28), Some(to_pixel(Color32::WHITE)));
        assert_eq!(surface.composite().get(1, 15), Some(to_pixel(Color32::BLACK)));
    }

    #[test]
    fn test_translucent_brush_writes_exact_bytes() {
        let mut surface = surface();
        surface.set_brush(BrushSettings {
            color: [10, 20, 30, 40],
            width: 4.0,
        });
        surface.begin_stroke(Pos2::new(5.5, 5.5)).unwrap();
        surface.end_stroke().unwrap();
        assert_eq!(surface.current().strokes()[0].color(), Rgba([10, 20, 30, 40]));
        assert_eq!(surface.composite().get(5, 5), Some(Rgba([10, 20, 30, 40])));

        surface.set_brush(BrushSettings {
            color: [200, 100, 50, 100],
            width: 4.0,
        });
        surface.fill_at(Pos2::new(30.0, 25.0)).unwrap();
        assert_eq!(surface.composite().get(30, 25), Some(Rgba([200, 100, 50, 100])));
        assert_eq!(surface.composite().get(5, 5), Some(Rgba([10, 20, 30, 40])));
    }

    #[test]
    fn test_fill_tool_dispatch_and_noop() {
        let mut surface = surface();
        surface.set_tool(Tool::Fill);
        surface.set_color(Color32::WHITE);
        assert_eq!(
            surface.handle_event(InputEvent::PointerDown { location: at(3.0, 3.0) }),
            Err(NoOp::NoOpFill)
        );
        assert_eq!(surface.history().len(), 1);
    }

    #[test]
    fn test_pointer_down_outside_canvas_is_ignored() {
        let mut surface = surface();
        let location = InputLocation {
            position: Pos2::new(40.0, 0.0),
            is_in_canvas: false,
        };
        assert!(surface.handle_event(InputEvent::PointerDown { location }).is_err());
        assert!(!surface.is_drawing());
    }

    #[test]
    fn test_pointer_leave_commits_stroke() {
        let mut surface = surface();
        surface.handle_event(InputEvent::PointerDown { location: at(2.0, 2.0) }).unwrap();
        surface.handle_event(InputEvent::PointerMove { location: at(8.0, 2.0) }).unwrap();
        surface.handle_event(InputEvent::PointerLeave).unwrap();
        assert_eq!(surface.history().len(), 2);
        assert_eq!(surface.current().strokes()[0].points().len(), 2);
    }

    #[test]
    fn test_hover_without_gesture_is_accepted() {
        let mut surface = surface();
        assert!(surface.handle_event(InputEvent::PointerMove { location: at(8.0, 2.0) }).is_ok());
        assert_eq!(
            surface.handle_event(InputEvent::PointerUp { location: at(8.0, 2.0) }),
            Err(NoOp::NotDrawing)
        );
    }

    #[test]
    fn test_switching_tool_abandons_stroke() {
        let mut surface = surface();
        surface.begin_stroke(Pos2::new(2.0, 2.0)).unwrap();
        surface.set_tool(Tool::Eraser);
        assert!(!surface.is_drawing());
        assert_eq!(surface.end_stroke(), Err(NoOp::NotDrawing));
    }

    #[test]
    fn test_clear_all_resets_history() {
        let mut surface = surface();
        surface.begin_stroke(Pos2::new(2.0, 2.0)).unwrap();
        surface.end_stroke().unwrap();
        surface.clear_all();
        assert_eq!(surface.history().len(), 1);
        assert!(surface.current().is_blank());
        assert_eq!(surface.undo(), Err(NoOp::HistoryUnderflow));
    }
}
