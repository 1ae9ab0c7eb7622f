//! Orbital and rotational kinematics plus the simulation clock.
//!
//! Bodies move on fixed circular orbits; angles advance by simulated time and
//! wrap into `[0, 360)`. The clock converts real frame time into simulated
//! time under a speed multiplier and pause flag.

pub mod body;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod kinematics;
pub mod simulation;

pub use body::{BodyDesc, CelestialBody, Planet, Ring, Star, TextureHandle};
pub use catalog::{
    SKYBOX_FACES, SUN_SPIN_DEG_PER_SEC, TextureSource, skybox, solar_system,
    solar_system_with_spin,
};
pub use clock::{SECONDS_PER_DAY, SimulationClock};
pub use error::BodyError;
pub use kinematics::{
    orbit_speed_from_period_days, rotation_speed_from_period_hours, update, wrap_degrees,
};
pub use simulation::{Simulation, SolarSystem};
