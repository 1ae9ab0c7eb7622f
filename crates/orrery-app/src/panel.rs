//! Control panel seam.
//!
//! The panel widgets are drawn elsewhere. Each frame they read a
//! [`PanelSnapshot`] and send back zero or more [`PanelCommand`]s.

use orrery_scene::row_from_focus;

/// State the panel displays.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSnapshot {
    /// Whether the simulation clock is advancing.
    pub running: bool,
    pub speed_multiplier: f64,
    /// Focused planet; `None` is the star.
    pub focus: Option<usize>,
    /// Picker labels, star first.
    pub focus_names: Vec<String>,
    /// Human-readable simulated time, e.g. `"1 year 5 weeks 0 days"`.
    pub elapsed_label: String,
    pub fly_mode: bool,
}

impl PanelSnapshot {
    /// Row of the focus picker to highlight.
    #[must_use]
    pub fn focus_row(&self) -> usize {
        row_from_focus(self.focus)
    }

    /// Label shown on the focus picker.
    #[must_use]
    pub fn focus_label(&self) -> &str {
        self.focus_names
            .get(self.focus_row())
            .map_or("", String::as_str)
    }
}

/// A change requested through the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelCommand {
    SetRunning(bool),
    ToggleRunning,
    /// Clamped into the clock's supported range.
    SetSpeedMultiplier(f64),
    /// Planet index, or the star for `None`.
    SelectFocus(Option<usize>),
    ResetAll,
}
