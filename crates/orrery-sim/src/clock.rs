//! Simulation clock: converts real frame time into simulated time.

use orrery_config::{MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER};
use tracing::warn;

/// Seconds in one simulated day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

const DAYS_PER_YEAR: u64 = 365;
const DAYS_PER_WEEK: u64 = 7;

/// Pause flag, speed multiplier, and elapsed simulated days.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    running: bool,
    speed_multiplier: f64,
    elapsed_days: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            running: true,
            speed_multiplier: 1.0,
            elapsed_days: 0.0,
        }
    }
}

impl SimulationClock {
    /// Create a clock with the given state and a speed clamped to the
    /// supported range.
    pub fn new(running: bool, speed_multiplier: f64) -> Self {
        let mut clock = Self {
            running,
            ..Self::default()
        };
        clock.set_speed_multiplier(speed_multiplier);
        clock
    }

    /// Advance by `real_dt` wall-clock seconds and return the simulated
    /// seconds that elapsed. Returns 0 while paused.
    pub fn advance(&mut self, real_dt: f64) -> f64 {
        if !self.running || !real_dt.is_finite() || real_dt <= 0.0 {
            return 0.0;
        }
        let sim_dt = real_dt * self.speed_multiplier;
        self.elapsed_days += sim_dt / SECONDS_PER_DAY;
        sim_dt
    }

    /// Zero the elapsed time. Callers go through `Simulation::reset_all` so
    /// body angles are reset together with the clock.
    pub(crate) fn reset(&mut self) {
        self.elapsed_days = 0.0;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flip the pause state and return the new `running` value.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    #[must_use]
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Set simulated seconds per real second, clamped to
    /// `[MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER]`.
    pub fn set_speed_multiplier(&mut self, speed: f64) {
        if !speed.is_finite() {
            warn!("Ignoring non-finite speed multiplier {speed}");
            return;
        }
        self.speed_multiplier = speed.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
    }

    /// Elapsed simulated days since startup or the last reset.
    #[must_use]
    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }

    /// Render the elapsed time as years, weeks and days, e.g.
    /// `"1 year 5 weeks 0 days"`. Zero years and weeks are omitted; days
    /// are always shown.
    #[must_use]
    pub fn format_elapsed(&self) -> String {
        format_days(self.elapsed_days)
    }
}

fn format_days(elapsed_days: f64) -> String {
    let total = if elapsed_days.is_finite() && elapsed_days > 0.0 {
        elapsed_days.floor() as u64
    } else {
        0
    };
    let years = total / DAYS_PER_YEAR;
    let weeks = (total % DAYS_PER_YEAR) / DAYS_PER_WEEK;
    let days = total % DAYS_PER_YEAR % DAYS_PER_WEEK;

    let mut parts = Vec::with_capacity(3);
    if years > 0 {
        parts.push(unit(years, "year"));
    }
    if weeks > 0 {
        parts.push(unit(weeks, "week"));
    }
    parts.push(unit(days, "day"));
    parts.join(" ")
}

fn unit(count: u64, name: &str) -> String {
    if count == 1 {
        format!("{count} {name}")
    } else {
        format!("{count} {name}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(days: f64) -> SimulationClock {
        let mut clock = SimulationClock::default();
        clock.elapsed_days = days;
        clock
    }

    #[test]
    fn test_advance_scales_by_multiplier() {
        let mut clock = SimulationClock::new(true, 86_400.0);
        let sim_dt = clock.advance(0.5);
        assert_eq!(sim_dt, 43_200.0);
        assert!((clock.elapsed_days() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_paused_advance_is_idempotent() {
        let mut clock = SimulationClock::new(true, 3600.0);
        clock.advance(10.0);
        let before = clock.elapsed_days();
        clock.set_running(false);
        for dt in [0.016, 1.0, 1000.0, 0.0] {
            assert_eq!(clock.advance(dt), 0.0);
        }
        assert_eq!(clock.elapsed_days(), before);
    }

    #[test]
    fn test_negative_and_nan_deltas_ignored() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        assert_eq!(clock.elapsed_days(), 0.0);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut clock = SimulationClock::default();
        clock.set_speed_multiplier(0.0);
        assert_eq!(clock.speed_multiplier(), MIN_SPEED_MULTIPLIER);
        clock.set_speed_multiplier(1e12);
        assert_eq!(clock.speed_multiplier(), MAX_SPEED_MULTIPLIER);
        clock.set_speed_multiplier(f64::NAN);
        assert_eq!(clock.speed_multiplier(), MAX_SPEED_MULTIPLIER);
    }

    #[test]
    fn test_toggle_running() {
        let mut clock = SimulationClock::default();
        assert!(clock.is_running());
        assert!(!clock.toggle_running());
        assert!(clock.toggle_running());
    }

    #[test]
    fn test_reset_zeroes_elapsed() {
        let mut clock = clock_at(12.5);
        clock.reset();
        assert_eq!(clock.elapsed_days(), 0.0);
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(clock_at(0.0).format_elapsed(), "0 days");
    }

    #[test]
    fn test_format_400_days() {
        assert_eq!(clock_at(400.0).format_elapsed(), "1 year 5 weeks 0 days");
    }

    #[test]
    fn test_format_pluralizes_each_unit() {
        assert_eq!(clock_at(1.0).format_elapsed(), "1 day");
        assert_eq!(clock_at(8.0).format_elapsed(), "1 week 1 day");
        assert_eq!(clock_at(731.0).format_elapsed(), "2 years 0 days");
        assert_eq!(clock_at(365.0 + 14.0 + 3.0).format_elapsed(), "1 year 2 weeks 3 days");
    }

    #[test]
    fn test_format_truncates_partial_days() {
        assert_eq!(clock_at(6.99).format_elapsed(), "6 days");
    }
}
