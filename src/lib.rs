#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod compositor;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod fill;
pub mod history;
pub mod input;
pub mod raster;
pub mod stroke;
pub mod surface;

pub use app::{DoodleApp, DoodleSettings};
pub use config::{BrushSettings, CanvasConfig, MAX_CANVAS_SIDE};
pub use engine::{StrokeEngine, Tool};
pub use error::{CanvasError, CanvasResult, NoOp};
pub use export::ExportedImage;
pub use fill::FillReport;
pub use history::{Background, History, Snapshot};
pub use input::{CanvasTransform, InputEvent, InputHandler, InputLocation};
pub use raster::Raster;
pub use stroke::{Point, Stroke, StrokeMode, StrokeRef};
pub use surface::{CanvasHandle, DrawingSurface};
