use std::sync::Arc;
use uuid::Uuid;

use crate::error::NoOp;
use crate::raster::RasterRef;
use crate::stroke::StrokeRef;

/// What the strokes of a snapshot are drawn over
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// The configured background color
    Blank,
    /// A raster baked by a fill
    Raster(RasterRef),
}

/// Complete, immutable canvas state
#[derive(Debug, Clone)]
pub struct Snapshot {
    id: Uuid,
    strokes: Arc<[StrokeRef]>,
    background: Background,
}

impl Snapshot {
    pub fn new(strokes: Vec<StrokeRef>, background: Background) -> Self {
        Self {
            id: Uuid::new_v4(),
            strokes: strokes.into(),
            background,
        }
    }

    pub fn blank() -> Self {
        Self::new(Vec::new(), Background::Blank)
    }

    /// Unique per snapshot; hosts compare it to detect state changes
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// This snapshot's strokes followed by `stroke`, over the same background
    pub fn with_stroke(&self, stroke: StrokeRef) -> Self {
        let mut strokes = self.strokes.to_vec();
        strokes.push(stroke);
        Self::new(strokes, self.background.clone())
    }

    pub fn is_blank(&self) -> bool {
        self.strokes.is_empty() && self.background == Background::Blank
    }
}

/// Linear, cursor-addressed undo/redo history.
///
/// Never empty: index 0 always holds the blank canvas.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            snapshots: vec![Snapshot::blank()],
            cursor: 0,
        }
    }

    /// Drops the redo branch, appends `snapshot` and moves the cursor onto it
    pub fn push(&mut self, snapshot: Snapshot) {
        let discarded = self.snapshots.len() - (self.cursor + 1);
        if discarded > 0 {
            log::debug!("Discarding {} redo snapshot(s)", discarded);
        }
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn undo(&mut self) -> Result<&Snapshot, NoOp> {
        if self.cursor == 0 {
            return Err(NoOp::HistoryUnderflow);
        }
        self.cursor -= 1;
        Ok(&self.snapshots[self.cursor])
    }

    pub fn redo(&mut self) -> Result<&Snapshot, NoOp> {
        if self.cursor + 1 >= self.snapshots.len() {
            return Err(NoOp::HistoryOverflow);
        }
        self.cursor += 1;
        Ok(&self.snapshots[self.cursor])
    }

    /// Back to a single blank snapshot
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.snapshots.push(Snapshot::blank());
        self.cursor = 0;
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        // Index 0 is always present
        false
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }
}
