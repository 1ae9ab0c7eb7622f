//! Pointer tracker: turns absolute cursor positions and wheel deltas into
//! [`InputEvent`]s.
//!
//! While an overlay (such as the control panel) owns the pointer, movement,
//! buttons and scroll are swallowed but the cursor position keeps updating,
//! so releasing the overlay never produces a jump.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::event::{InputEvent, PointerButton};

/// Pixels per wheel line for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: Option<Vec2>,
    overlay_captured: bool,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Mark whether an overlay currently wants the pointer.
    pub fn set_overlay_captured(&mut self, captured: bool) {
        self.overlay_captured = captured;
    }

    #[must_use]
    pub fn is_overlay_captured(&self) -> bool {
        self.overlay_captured
    }

    /// Process a `CursorMoved` event. The first position only seeds the
    /// tracker.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> Option<InputEvent> {
        let new_pos = Vec2::new(x as f32, y as f32);
        let previous = self.position.replace(new_pos)?;
        if self.overlay_captured {
            return None;
        }
        let delta = new_pos - previous;
        (delta != Vec2::ZERO).then_some(InputEvent::PointerMoved {
            dx: delta.x,
            dy: delta.y,
        })
    }

    /// Process a `CursorLeft` event; the next movement re-seeds.
    pub fn on_cursor_left(&mut self) {
        self.position = None;
    }

    /// Process a `MouseInput` event.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) -> Option<InputEvent> {
        let button = PointerButton::from_winit(button)?;
        let pressed = state == ElementState::Pressed;
        // Releases always go through so a drag never sticks.
        if self.overlay_captured && pressed {
            return None;
        }
        Some(InputEvent::PointerButton { button, pressed })
    }

    /// Process a `MouseWheel` event.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) -> Option<InputEvent> {
        if self.overlay_captured {
            return None;
        }
        let lines = match delta {
            MouseScrollDelta::LineDelta(_x, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
        (lines != 0.0).then_some(InputEvent::Scroll(lines))
    }
}
