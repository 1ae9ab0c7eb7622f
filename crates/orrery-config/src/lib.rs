//! Configuration system for the orrery.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, InputConfig, MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER,
    SceneConfig, SimulationConfig, WindowConfig,
};
pub use error::ConfigError;
