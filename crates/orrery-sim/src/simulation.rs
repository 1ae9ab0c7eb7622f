//! The star, its planets, and the clock that drives them.

use orrery_config::Config;
use tracing::info;

use crate::body::{Planet, Star};
use crate::catalog::{self, TextureSource};
use crate::clock::SimulationClock;
use crate::error::BodyError;
use crate::kinematics;

/// The star and its planets. Moons and rings are owned by their planet.
#[derive(Clone, Debug, PartialEq)]
pub struct SolarSystem {
    pub star: Star,
    pub planets: Vec<Planet>,
}

impl SolarSystem {
    #[must_use]
    pub fn new(star: Star, planets: Vec<Planet>) -> Self {
        Self { star, planets }
    }

    /// Planet by index, if it exists.
    #[must_use]
    pub fn planet(&self, index: usize) -> Option<&Planet> {
        self.planets.get(index)
    }

    /// Advance every planet and moon by the same simulated step.
    pub fn advance(&mut self, sim_dt: f64) {
        for planet in &mut self.planets {
            kinematics::update(planet, sim_dt);
        }
    }

    fn reset_angles(&mut self) {
        for planet in &mut self.planets {
            planet.reset_angles();
        }
    }
}

/// Clock plus bodies, advanced together once per frame.
#[derive(Clone, Debug)]
pub struct Simulation {
    pub clock: SimulationClock,
    pub system: SolarSystem,
}

impl Simulation {
    #[must_use]
    pub fn new(clock: SimulationClock, system: SolarSystem) -> Self {
        Self { clock, system }
    }

    /// Build the built-in solar system with the clock and Sun spin from
    /// `config`.
    pub fn from_config(
        config: &Config,
        textures: &mut impl TextureSource,
    ) -> Result<Self, BodyError> {
        let system =
            catalog::solar_system_with_spin(textures, config.scene.star_spin_deg_per_sec)?;
        let clock = SimulationClock::new(
            config.simulation.start_running,
            config.simulation.speed_multiplier,
        );
        Ok(Self::new(clock, system))
    }

    /// Advance the clock by `real_dt` seconds, then move every body by the
    /// resulting simulated step. Returns that step.
    pub fn tick(&mut self, real_dt: f64) -> f64 {
        let sim_dt = self.clock.advance(real_dt);
        if sim_dt != 0.0 {
            self.system.advance(sim_dt);
        }
        sim_dt
    }

    /// Zero the elapsed time and every accumulated angle together.
    pub fn reset_all(&mut self) {
        self.clock.reset();
        self.system.reset_angles();
        info!("Simulation reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::TextureHandle;

    struct NoTextures;

    impl TextureSource for NoTextures {
        fn texture(&mut self, _asset: &str) -> TextureHandle {
            TextureHandle::MISSING
        }

        fn cubemap(&mut self, _faces: &[&str; 6]) -> TextureHandle {
            TextureHandle::MISSING
        }
    }

    fn simulation(speed: f64) -> Simulation {
        let mut config = Config::default();
        config.simulation.speed_multiplier = speed;
        Simulation::from_config(&config, &mut NoTextures).unwrap()
    }

    #[test]
    fn test_from_config_applies_clock_settings() {
        let mut config = Config::default();
        config.simulation.start_running = false;
        config.simulation.speed_multiplier = 3600.0;
        let sim = Simulation::from_config(&config, &mut NoTextures).unwrap();
        assert!(!sim.clock.is_running());
        assert_eq!(sim.clock.speed_multiplier(), 3600.0);
        assert_eq!(sim.system.star.spin_rate, 12.0);
    }

    #[test]
    fn test_one_simulated_day_moves_earth() {
        let mut sim = simulation(86_400.0);
        let start = sim.system.planets[2].body.orbit_angle;
        let sim_dt = sim.tick(1.0);
        assert_eq!(sim_dt, 86_400.0);
        let moved = sim.system.planets[2].body.orbit_angle - start;
        assert!((moved - 360.0 / 365.256).abs() < 1e-9);
        assert!((sim.clock.elapsed_days() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_moons_share_parent_time_step() {
        let mut sim = simulation(86_400.0);
        sim.tick(27.3);
        let moon = &sim.system.planets[2].moons[0];
        // One full lunar period: back at the start, modulo float noise.
        let d = moon.orbit_angle.min(360.0 - moon.orbit_angle);
        assert!(d < 1e-6, "moon angle {}", moon.orbit_angle);
    }

    #[test]
    fn test_paused_tick_moves_nothing() {
        let mut sim = simulation(86_400.0);
        sim.clock.set_running(false);
        let before = sim.system.clone();
        assert_eq!(sim.tick(5.0), 0.0);
        assert_eq!(sim.system, before);
    }

    #[test]
    fn test_reset_all_zeroes_clock_and_angles() {
        let mut sim = simulation(1_000_000.0);
        sim.tick(3.0);
        sim.reset_all();
        assert_eq!(sim.clock.elapsed_days(), 0.0);
        for planet in &sim.system.planets {
            assert_eq!(planet.body.orbit_angle, 0.0);
            assert_eq!(planet.body.rotation_angle, 0.0);
            for moon in &planet.moons {
                assert_eq!(moon.orbit_angle, 0.0);
            }
        }
    }

    #[test]
    fn test_max_speed_keeps_angles_in_range() {
        let mut sim = simulation(f64::MAX);
        for _ in 0..10 {
            sim.tick(0.25);
        }
        for planet in &sim.system.planets {
            assert!((0.0..360.0).contains(&planet.body.orbit_angle));
            assert!((0.0..360.0).contains(&planet.body.rotation_angle));
        }
    }

    #[test]
    fn test_planet_lookup() {
        let sim = simulation(1.0);
        assert_eq!(sim.system.planet(5).map(Planet::name), Some("Saturn"));
        assert!(sim.system.planet(8).is_none());
    }
}
