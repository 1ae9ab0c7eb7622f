//! Scripted input for headless runs.
//!
//! A script is a RON list of events keyed by frame number:
//!
//! ```ron
//! (steps: [
//!     (frame: 0, event: SelectFocus(Some(2))),
//!     (frame: 60, event: ToggleFlyMode),
//!     (frame: 61, event: Held(action: MoveForward, held: true)),
//!     (frame: 120, event: Held(action: MoveForward, held: false)),
//! ])
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::event::InputEvent;

/// An event due on a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frame: u64,
    pub event: InputEvent,
}

/// Frame-ordered input events, replayed with [`take_due`](Self::take_due).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
    #[serde(skip)]
    cursor: usize,
}

impl InputScript {
    /// Build a script; steps are stably sorted by frame.
    #[must_use]
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by_key(|step| step.frame);
        Self { steps, cursor: 0 }
    }

    pub fn from_ron(s: &str) -> Result<Self, InputError> {
        let parsed: Self = ron::from_str(s).map_err(InputError::ParseError)?;
        Ok(Self::new(parsed.steps))
    }

    pub fn to_ron(&self) -> Result<String, InputError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(InputError::SerializeError)
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let contents = std::fs::read_to_string(path).map_err(|source| InputError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&contents)
    }

    #[must_use]
    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Steps due at or before `frame` that have not been returned yet.
    pub fn take_due(&mut self, frame: u64) -> &[ScriptStep] {
        let start = self.cursor;
        let due = self.steps[start..]
            .iter()
            .take_while(|step| step.frame <= frame)
            .count();
        self.cursor += due;
        &self.steps[start..self.cursor]
    }

    /// Whether every step has been replayed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }
}
