//! Held controls the camera reads each frame.

/// A control that stays active while held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeldControl {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    /// The pointer button that enables orbit dragging.
    OrbitDrag,
}

impl HeldControl {
    /// Every control, in bit order.
    pub const ALL: [HeldControl; 7] = [
        HeldControl::Forward,
        HeldControl::Backward,
        HeldControl::Left,
        HeldControl::Right,
        HeldControl::Up,
        HeldControl::Down,
        HeldControl::OrbitDrag,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of currently held controls, owned by the camera controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: u8,
}

impl InputState {
    pub fn set(&mut self, control: HeldControl, held: bool) {
        if held {
            self.held |= control.bit();
        } else {
            self.held &= !control.bit();
        }
    }

    #[must_use]
    pub fn is_held(&self, control: HeldControl) -> bool {
        self.held & control.bit() != 0
    }

    /// Whether any direction key is held (ignores the drag button).
    #[must_use]
    pub fn any_direction(&self) -> bool {
        self.held & !HeldControl::OrbitDrag.bit() != 0
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held = 0;
    }
}
