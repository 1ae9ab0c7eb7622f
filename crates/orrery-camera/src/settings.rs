//! Tunables for the orbit and fly cameras.

use orrery_config::CameraConfig;

/// Pitch limit in radians (±89°) for both camera modes.
pub const PITCH_LIMIT: f32 = 89.0_f32 * (std::f32::consts::PI / 180.0);

/// Camera tunables, built from [`CameraConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    /// Radians of yaw/pitch per pixel of pointer movement.
    pub sensitivity: f32,
    /// Closest orbit distance.
    pub min_distance: f32,
    /// Farthest orbit distance.
    pub max_distance: f32,
    /// Orbit distance multiplier per scroll notch (`distance *= zoom_factor^scroll`).
    pub zoom_factor: f32,
    /// Fly movement speed in units per real second.
    pub fly_speed: f32,
    /// Fly translation along the view direction per scroll notch.
    pub fly_scroll_step: f32,
    /// Orbit distance at startup.
    pub initial_distance: f32,
    /// Yaw at startup, in radians.
    pub initial_yaw: f32,
    /// Pitch at startup, in radians.
    pub initial_pitch: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::from(&CameraConfig::default())
    }
}

impl From<&CameraConfig> for CameraSettings {
    fn from(config: &CameraConfig) -> Self {
        Self {
            sensitivity: config.sensitivity,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            zoom_factor: config.zoom_factor,
            fly_speed: config.fly_speed,
            fly_scroll_step: config.fly_scroll_step,
            // Unvalidated configs may invert the range; never panic on it.
            initial_distance: config
                .initial_distance
                .min(config.max_distance)
                .max(config.min_distance),
            initial_yaw: config.initial_yaw_deg.to_radians(),
            initial_pitch: config
                .initial_pitch_deg
                .to_radians()
                .clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }
}
