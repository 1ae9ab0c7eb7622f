//! Which body the orbit camera follows.

use orrery_sim::SolarSystem;

/// Label for "no planet focused": the camera follows the star.
pub const STAR_FOCUS_LABEL: &str = "Sun";

/// Current focus plus a pending flag set by [`select`](Self::select).
///
/// A selection is a one-shot event: the next composed frame consumes it and
/// forces the camera out of fly mode. The focus index itself persists, so the
/// camera keeps following that planet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusSelection {
    index: Option<usize>,
    pending: bool,
}

impl FocusSelection {
    /// Start focused on `index` (or the star) without a pending selection.
    #[must_use]
    pub fn new(index: Option<usize>) -> Self {
        Self {
            index,
            pending: false,
        }
    }

    /// Focus the planet at `index`, or the star for `None`.
    pub fn select(&mut self, index: Option<usize>) {
        self.index = index;
        self.pending = true;
    }

    /// Focused planet index; `None` means the star.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clear and return the pending flag.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Focus choices for a picker: the star first, then each planet.
#[must_use]
pub fn focus_names(system: &SolarSystem) -> Vec<String> {
    std::iter::once(STAR_FOCUS_LABEL.to_string())
        .chain(system.planets.iter().map(|p| p.name().to_string()))
        .collect()
}

/// Map a picker row (0 = star) to a planet index.
#[must_use]
pub fn focus_from_row(row: usize) -> Option<usize> {
    row.checked_sub(1)
}

/// Map a planet index to its picker row.
#[must_use]
pub fn row_from_focus(focus: Option<usize>) -> usize {
    focus.map_or(0, |index| index + 1)
}
