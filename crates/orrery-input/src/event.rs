//! Input events delivered to the orrery once per frame.

use serde::{Deserialize, Serialize};
use winit::event::MouseButton;

use crate::bindings::Action;

/// Pointer buttons the orrery distinguishes.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum PointerButton {
    /// Drags the orbit camera.
    Left,
    Right,
    Middle,
}

impl PointerButton {
    /// Map a winit button; extra buttons are ignored.
    #[must_use]
    pub fn from_winit(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Self::Left),
            MouseButton::Right => Some(Self::Right),
            MouseButton::Middle => Some(Self::Middle),
            MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => None,
        }
    }
}

/// One discrete input occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A pointer button changed state.
    PointerButton { button: PointerButton, pressed: bool },
    /// Pointer movement in pixels since the previous event.
    PointerMoved { dx: f32, dy: f32 },
    /// Scroll in wheel lines; positive is away from the user.
    Scroll(f32),
    /// A held movement action was pressed or released.
    Held { action: Action, held: bool },
    ToggleFlyMode,
    /// Focus a planet by index, or the star for `None`.
    SelectFocus(Option<usize>),
    TogglePause,
    ResetAll,
    Quit,
}
