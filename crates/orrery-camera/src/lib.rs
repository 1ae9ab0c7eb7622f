//! Orbit and free-fly camera controller.
//!
//! The camera is a tagged [`CameraState`]: it either orbits a target point
//! at a distance or flies freely. Held keys and the drag button live in an
//! [`InputState`] owned by the [`CameraController`].

pub mod controller;
pub mod input_state;
pub mod settings;

pub use controller::{CameraController, CameraState, OrbitAnchor, spherical};
pub use input_state::{HeldControl, InputState};
pub use settings::{CameraSettings, PITCH_LIMIT};
