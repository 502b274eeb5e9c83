use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::NoOp;
use crate::stroke::{MutableStroke, Point, StrokeMode, StrokeRef};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Fill,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Brush, Tool::Eraser, Tool::Fill];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Eraser => "Eraser",
            Tool::Fill => "Fill",
        }
    }

    /// The stroke mode this tool draws with, if it draws strokes at all
    pub fn stroke_mode(&self) -> Option<StrokeMode> {
        match self {
            Tool::Brush => Some(StrokeMode::Draw),
            Tool::Eraser => Some(StrokeMode::Erase),
            Tool::Fill => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
enum EngineState {
    #[default]
    Idle,
    Drawing {
        stroke: MutableStroke,
    },
}

/// Collects points into a stroke while a draw or erase gesture is active
#[derive(Debug, Clone, Default)]
pub struct StrokeEngine {
    state: EngineState,
}

impl StrokeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle -> Drawing, seeding a new stroke with `point`
    pub fn begin(&mut self, point: Point, tool: Tool, color: Rgba<u8>, width: f32) -> Result<(), NoOp> {
        if self.is_drawing() {
            return Err(NoOp::AlreadyDrawing);
        }
        let mode = tool.stroke_mode().ok_or(NoOp::UnsupportedTool(tool.name()))?;

        self.state = EngineState::Drawing {
            stroke: MutableStroke::new(point, color, width, mode),
        };
        Ok(())
    }

    pub fn extend(&mut self, point: Point) -> Result<(), NoOp> {
        match &mut self.state {
            EngineState::Drawing { stroke } => {
                stroke.add_point(point);
                Ok(())
            }
            EngineState::Idle => Err(NoOp::NotDrawing),
        }
    }

    /// Drawing -> Idle, handing back the finished stroke
    pub fn end(&mut self) -> Result<StrokeRef, NoOp> {
        match std::mem::take(&mut self.state) {
            EngineState::Drawing { stroke } => Ok(stroke.into_stroke_ref()),
            EngineState::Idle => Err(NoOp::NotDrawing),
        }
    }

    /// Drops any stroke in progress without producing it
    pub fn cancel(&mut self) {
        self.state = EngineState::Idle;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, EngineState::Drawing { .. })
    }

    pub fn active_stroke(&self) -> Option<&MutableStroke> {
        match &self.state {
            EngineState::Drawing { stroke } => Some(stroke),
            EngineState::Idle => None,
        }
    }
}
