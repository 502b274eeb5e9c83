use egui::{Context, Event, PointerButton, Pos2, Rect, TouchId, TouchPhase, Vec2};

use crate::config::CanvasConfig;
use crate::stroke::Point;

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Canvas-local position in pixels, clamped to the canvas
    pub position: Point,
    /// Whether the unclamped position was over the canvas
    pub is_in_canvas: bool,
}

/// Maps screen positions onto canvas pixels.
///
/// The canvas may be displayed at any on-screen position and scale; the
/// transform divides out both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    screen_rect: Rect,
    canvas_size: Vec2,
}

impl CanvasTransform {
    pub fn new(screen_rect: Rect, config: &CanvasConfig) -> Self {
        Self {
            screen_rect,
            canvas_size: Vec2::new(config.width as f32, config.height as f32),
        }
    }

    /// Update the on-screen rectangle (e.g. if the window is resized)
    pub fn set_screen_rect(&mut self, rect: Rect) {
        self.screen_rect = rect;
    }

    pub fn screen_rect(&self) -> Rect {
        self.screen_rect
    }

    pub fn to_canvas(&self, screen: Pos2) -> InputLocation {
        let size = self.screen_rect.size();
        let scale = Vec2::new(
            if size.x > 0.0 { self.canvas_size.x / size.x } else { 1.0 },
            if size.y > 0.0 { self.canvas_size.y / size.y } else { 1.0 },
        );
        let local = (screen - self.screen_rect.min) * scale;
        let is_in_canvas = local.x >= 0.0
            && local.y >= 0.0
            && local.x < self.canvas_size.x
            && local.y < self.canvas_size.y;

        InputLocation {
            position: Pos2::new(
                local.x.clamp(0.0, self.canvas_size.x),
                local.y.clamp(0.0, self.canvas_size.y),
            ),
            is_in_canvas,
        }
    }
}

/// Gesture-level input, already translated to canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button or first touch went down
    PointerDown { location: InputLocation },
    /// Pointer moved (with or without a gesture in progress)
    PointerMove { location: InputLocation },
    /// Primary button or first touch was released
    PointerUp { location: InputLocation },
    /// Pointer left the window or the touch was cancelled
    PointerLeave,
}

/// Handles converting raw egui input into canvas-local InputEvents
pub struct InputHandler {
    transform: CanvasTransform,
    primary_touch: Option<TouchId>,
}

impl InputHandler {
    pub fn new(transform: CanvasTransform) -> Self {
        Self {
            transform,
            primary_touch: None,
        }
    }

    pub fn set_screen_rect(&mut self, rect: Rect) {
        self.transform.set_screen_rect(rect);
    }

    pub fn transform(&self) -> &CanvasTransform {
        &self.transform
    }

    /// Process this frame's raw egui input.
    ///
    /// `canvas_hovered` is false when another layer (a popup, a window) sits
    /// between the pointer and the canvas.
    pub fn process_input(&mut self, ctx: &Context, canvas_hovered: bool) -> Vec<InputEvent> {
        let raw_events = ctx.input(|input| input.events.clone());
        self.process_events(&raw_events, canvas_hovered)
    }

    /// Translate a batch of egui events.
    ///
    /// While a touch contact is primary, emulated pointer events are ignored
    /// so a touch gesture is not reported twice; additional contacts are
    /// ignored entirely. Presses only start a gesture when `canvas_hovered`;
    /// moves and releases always pass so a gesture in progress can finish.
    pub fn process_events(&mut self, raw_events: &[Event], canvas_hovered: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in raw_events {
            match event {
                Event::Touch {
                    phase: TouchPhase::Start,
                    ..
                } if !canvas_hovered => {}
                Event::Touch { id, phase, pos, .. } => {
                    if let Some(translated) = self.process_touch(*id, *phase, *pos) {
                        events.push(translated);
                    }
                }
                _ if self.primary_touch.is_some() => {}
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    let location = self.transform.to_canvas(*pos);
                    if !*pressed {
                        events.push(InputEvent::PointerUp { location });
                    } else if canvas_hovered {
                        events.push(InputEvent::PointerDown { location });
                    }
                }
                Event::PointerMoved(pos) => {
                    events.push(InputEvent::PointerMove {
                        location: self.transform.to_canvas(*pos),
                    });
                }
                Event::PointerGone => events.push(InputEvent::PointerLeave),
                _ => {}
            }
        }

        events
    }

    fn process_touch(&mut self, id: TouchId, phase: TouchPhase, pos: Pos2) -> Option<InputEvent> {
        let location = self.transform.to_canvas(pos);
        match (self.primary_touch, phase) {
            (None, TouchPhase::Start) => {
                self.primary_touch = Some(id);
                Some(InputEvent::PointerDown { location })
            }
            (Some(primary), TouchPhase::Move) if primary == id => {
                Some(InputEvent::PointerMove { location })
            }
            (Some(primary), TouchPhase::End) if primary == id => {
                self.primary_touch = None;
                Some(InputEvent::PointerUp { location })
            }
            (Some(primary), TouchPhase::Cancel) if primary == id => {
                self.primary_touch = None;
                Some(InputEvent::PointerLeave)
            }
            _ => None,
        }
    }
}
