use thiserror::Error;

/// Reasons an operation left the canvas untouched.
///
/// None of these are failures: the surface absorbs them and stays in the
/// state it was in before the call. They are returned so the host (and the
/// tests) can tell *why* nothing happened.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NoOp {
    /// A sampled point falls outside the raster
    #[error("coordinate ({x}, {y}) is outside the canvas")]
    InvalidCoordinate { x: i64, y: i64 },
    /// The seed pixel already has the fill color
    #[error("seed pixel already has the fill color")]
    NoOpFill,
    /// Undo requested while at the blank canvas
    #[error("nothing to undo")]
    HistoryUnderflow,
    /// Redo requested while at the newest snapshot
    #[error("nothing to redo")]
    HistoryOverflow,
    /// A stroke operation arrived while no stroke is active
    #[error("no stroke in progress")]
    NotDrawing,
    /// A new stroke was requested while one is already active
    #[error("a stroke is already in progress")]
    AlreadyDrawing,
    /// The selected tool does not produce strokes
    #[error("tool {0} cannot draw strokes")]
    UnsupportedTool(&'static str),
}

/// Recoverable host-level failures
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("invalid canvas configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type CanvasResult<T> = Result<T, CanvasError>;
