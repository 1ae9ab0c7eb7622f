//! Angle bookkeeping for circular orbits and self-rotation.
//!
//! Speeds are in degrees per simulated second. Every update wraps the angle
//! with a Euclidean remainder, so a step covering many full turns (or a
//! negative, retrograde step) still lands on the right residue.

use crate::body::{CelestialBody, Planet};
use crate::clock::SECONDS_PER_DAY;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Wrap an angle in degrees into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative rounds up to exactly 360.0.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Angular speed (deg/s) of an orbit with the given period in days.
/// A negative period encodes a retrograde orbit.
#[must_use]
pub fn orbit_speed_from_period_days(period_days: f64) -> f64 {
    360.0 / (period_days * SECONDS_PER_DAY)
}

/// Angular speed (deg/s) of a spin with the given period in hours.
/// A negative period encodes retrograde rotation (Venus, Uranus).
#[must_use]
pub fn rotation_speed_from_period_hours(period_hours: f64) -> f64 {
    360.0 / (period_hours * SECONDS_PER_HOUR)
}

impl CelestialBody {
    /// Advance both angles by `sim_dt` simulated seconds.
    pub fn advance(&mut self, sim_dt: f64) {
        self.orbit_angle = wrap_degrees(self.orbit_angle + sim_dt * self.orbit_angular_speed);
        self.rotation_angle =
            wrap_degrees(self.rotation_angle + sim_dt * self.rotation_angular_speed);
    }

    /// Zero both accumulated angles.
    pub fn reset_angles(&mut self) {
        self.orbit_angle = 0.0;
        self.rotation_angle = 0.0;
    }
}

/// Advance a planet and, with the same `sim_dt`, each of its moons.
pub fn update(planet: &mut Planet, sim_dt: f64) {
    planet.body.advance(sim_dt);
    for moon in &mut planet.moons {
        moon.advance(sim_dt);
    }
}
