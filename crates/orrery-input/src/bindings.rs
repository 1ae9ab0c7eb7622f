//! Key bindings: physical keys mapped to orrery [`Action`]s.
//!
//! [`KeyBindings`] is persisted as RON (`keybindings.ron`) and can be
//! overridden per action from `config.ron`. [`KeyBindings::translate`] turns
//! a key transition into an [`InputEvent`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use winit::keyboard::KeyCode;

use crate::error::InputError;
use crate::event::InputEvent;

/// Serde helper for [`KeyCode`], which doesn't implement serde natively.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        super::parse_key(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }
}

/// Parse a key from its winit name, e.g. `"KeyW"` or `"ShiftLeft"`.
#[must_use]
pub fn parse_key(name: &str) -> Option<KeyCode> {
    Some(match name {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Digit0" => KeyCode::Digit0,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6,
        "Digit7" => KeyCode::Digit7,
        "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "AltLeft" => KeyCode::AltLeft,
        "AltRight" => KeyCode::AltRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        _ => return None,
    })
}

/// Highest focus row reachable from the number keys (0 = star, 1..=8 planets).
pub const MAX_FOCUS_ROW: u8 = 8;

/// What a key does in the orrery.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Switch between orbit and fly camera.
    ToggleFlyMode,
    /// Pause or resume the simulation clock.
    TogglePause,
    /// Zero the clock and all body angles.
    ResetSimulation,
    Quit,
    /// Focus a picker row: 0 is the star, 1 the first planet.
    Focus(u8),
}

impl Action {
    /// Movement actions are held; everything else fires once per press.
    #[must_use]
    pub fn is_held(self) -> bool {
        matches!(
            self,
            Action::MoveForward
                | Action::MoveBackward
                | Action::MoveLeft
                | Action::MoveRight
                | Action::MoveUp
                | Action::MoveDown
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Focus(row) => write!(f, "Focus{row}"),
            other => write!(f, "{other:?}"),
        }
    }
}

impl FromStr for Action {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "MoveForward" => Action::MoveForward,
            "MoveBackward" => Action::MoveBackward,
            "MoveLeft" => Action::MoveLeft,
            "MoveRight" => Action::MoveRight,
            "MoveUp" => Action::MoveUp,
            "MoveDown" => Action::MoveDown,
            "ToggleFlyMode" => Action::ToggleFlyMode,
            "TogglePause" => Action::TogglePause,
            "ResetSimulation" => Action::ResetSimulation,
            "Quit" => Action::Quit,
            other => other
                .strip_prefix("Focus")
                .and_then(|row| row.parse::<u8>().ok())
                .filter(|row| *row <= MAX_FOCUS_ROW)
                .map(Action::Focus)
                .ok_or_else(|| InputError::UnknownAction(s.to_string()))?,
        };
        Ok(action)
    }
}

/// A bound key.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding(#[serde(with = "keycode_serde")] pub KeyCode);

/// A key bound to more than one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub key: KeyCode,
    pub actions: Vec<Action>,
}

/// Maps [`Action`]s to the keys that trigger them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub bindings: BTreeMap<Action, Vec<KeyBinding>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = BTreeMap::new();
        let mut bind = |action, key| {
            bindings.insert(action, vec![KeyBinding(key)]);
        };
        bind(Action::MoveForward, KeyCode::KeyW);
        bind(Action::MoveBackward, KeyCode::KeyS);
        bind(Action::MoveLeft, KeyCode::KeyA);
        bind(Action::MoveRight, KeyCode::KeyD);
        bind(Action::MoveUp, KeyCode::Space);
        bind(Action::MoveDown, KeyCode::ShiftLeft);
        bind(Action::ToggleFlyMode, KeyCode::KeyF);
        bind(Action::TogglePause, KeyCode::KeyP);
        bind(Action::ResetSimulation, KeyCode::KeyR);
        bind(Action::Quit, KeyCode::Escape);

        const DIGITS: [KeyCode; 9] = [
            KeyCode::Digit0,
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
        ];
        for (row, key) in (0..=MAX_FOCUS_ROW).zip(DIGITS) {
            bind(Action::Focus(row), key);
        }

        Self { bindings }
    }
}

impl KeyBindings {
    /// An empty map with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Replace the keys bound to `action`.
    pub fn set_bindings(&mut self, action: Action, keys: Vec<KeyCode>) {
        self.bindings
            .insert(action, keys.into_iter().map(KeyBinding).collect());
    }

    /// Keys bound to `action`.
    #[must_use]
    pub fn keys(&self, action: Action) -> Vec<KeyCode> {
        self.bindings
            .get(&action)
            .map(|keys| keys.iter().map(|k| k.0).collect())
            .unwrap_or_default()
    }

    /// The action bound to `key`. When several are, the first in action
    /// order wins.
    #[must_use]
    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| k.0 == key))
            .map(|(action, _)| *action)
    }

    /// Turn a key transition into an input event. Held actions report both
    /// press and release; one-shot actions fire on the initial press only.
    #[must_use]
    pub fn translate(&self, key: KeyCode, pressed: bool, repeat: bool) -> Option<InputEvent> {
        let action = self.action_for(key)?;
        if repeat {
            return None;
        }
        if action.is_held() {
            return Some(InputEvent::Held {
                action,
                held: pressed,
            });
        }
        if !pressed {
            return None;
        }
        Some(match action {
            Action::ToggleFlyMode => InputEvent::ToggleFlyMode,
            Action::TogglePause => InputEvent::TogglePause,
            Action::ResetSimulation => InputEvent::ResetAll,
            Action::Quit => InputEvent::Quit,
            Action::Focus(row) => InputEvent::SelectFocus(usize::from(row).checked_sub(1)),
            Action::MoveForward
            | Action::MoveBackward
            | Action::MoveLeft
            | Action::MoveRight
            | Action::MoveUp
            | Action::MoveDown => return None,
        })
    }

    /// Apply `action name -> key name` overrides, e.g. from `config.ron`.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Result<(), InputError> {
        for (action_name, key_name) in overrides {
            let action: Action = action_name.parse()?;
            let key = parse_key(key_name).ok_or_else(|| InputError::UnknownKey(key_name.clone()))?;
            self.set_bindings(action, vec![key]);
            debug!("Rebound {action} to {key_name}");
        }
        for conflict in self.detect_conflicts() {
            warn!(
                "Key {:?} is bound to several actions: {:?}",
                conflict.key, conflict.actions
            );
        }
        Ok(())
    }

    /// Keys bound to more than one action.
    #[must_use]
    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        let mut seen: Vec<(KeyCode, Vec<Action>)> = Vec::new();
        for (action, keys) in &self.bindings {
            for key in keys {
                match seen.iter_mut().find(|(k, _)| *k == key.0) {
                    Some((_, actions)) => actions.push(*action),
                    None => seen.push((key.0, vec![*action])),
                }
            }
        }
        seen.into_iter()
            .filter(|(_, actions)| actions.len() > 1)
            .map(|(key, actions)| Conflict { key, actions })
            .collect()
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Write the bindings to a RON file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), InputError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| InputError::WriteError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = self.to_ron().map_err(InputError::SerializeError)?;
        std::fs::write(path, contents).map_err(|source| InputError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load bindings from `path`, falling back to the defaults when the file
    /// is missing or malformed.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_ron(&contents) {
                Ok(bindings) => bindings,
                Err(e) => {
                    warn!(
                        "Malformed keybinding file {}: {e}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No keybinding file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!(
                    "Could not read keybinding file {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }
}
