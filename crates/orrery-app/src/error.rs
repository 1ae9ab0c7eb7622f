//! Startup errors.

use orrery_config::ConfigError;
use orrery_input::InputError;
use orrery_sim::BodyError;

use crate::platform::PlatformError;

/// Anything that stops the orrery from starting.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The body catalog failed validation.
    #[error("invalid solar system: {0}")]
    Body(#[from] BodyError),

    /// Key bindings or input script.
    #[error(transparent)]
    Input(#[from] InputError),
}
