//! Pointer input
//!
//! Mouse and touch handlers push events here; the host loop drains the queue into
//! the next tick so input is only ever applied between simulation steps.

use glam::Vec2;

/// Pointer events in table coordinates. Touch maps onto the same variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Press: start aiming
    PointerDown { x: f32, y: f32 },
    /// Drag: update aim angle and power
    PointerMove { x: f32, y: f32 },
    /// Release: shoot
    PointerUp { x: f32, y: f32 },
}

impl InputEvent {
    pub fn position(&self) -> Vec2 {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerMove { x, y }
            | InputEvent::PointerUp { x, y } => Vec2::new(x, y),
        }
    }
}

/// Events waiting for the next tick
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
