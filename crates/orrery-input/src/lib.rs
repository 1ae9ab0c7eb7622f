//! Input layer: key bindings, pointer tracking, and scripted replay, all
//! producing [`InputEvent`]s for the orrery.

pub mod bindings;
pub mod error;
pub mod event;
pub mod pointer;
pub mod script;

pub use bindings::{Action, Conflict, KeyBinding, KeyBindings, MAX_FOCUS_ROW, parse_key};
pub use error::InputError;
pub use event::{InputEvent, PointerButton};
pub use pointer::PointerTracker;
pub use script::{InputScript, ScriptStep};
