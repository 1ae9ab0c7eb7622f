//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lowest speed multiplier the control panel exposes (simulated s per real s).
pub const MIN_SPEED_MULTIPLIER: f64 = 0.1;
/// Highest speed multiplier the control panel exposes: ten years per second.
pub const MAX_SPEED_MULTIPLIER: f64 = 315_360_000.0;

/// Top-level orrery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window / viewport settings.
    pub window: WindowConfig,
    /// Simulation clock settings.
    pub simulation: SimulationConfig,
    /// Camera controller settings.
    pub camera: CameraConfig,
    /// Scene composition settings.
    pub scene: SceneConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration. Only the aspect ratio and projection feed the core;
/// the window itself belongs to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

/// Simulation clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated seconds per real second at startup.
    pub speed_multiplier: f64,
    /// Whether the clock runs at startup.
    pub start_running: bool,
    /// Longest real frame delta fed to the clock, in seconds.
    pub max_frame_time: f64,
}

/// Camera controller configuration. Angles are in degrees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Radians of yaw/pitch per pixel of pointer movement.
    pub sensitivity: f32,
    /// Closest orbit distance.
    pub min_distance: f32,
    /// Farthest orbit distance.
    pub max_distance: f32,
    /// Orbit distance multiplier per scroll notch.
    pub zoom_factor: f32,
    /// Free-fly speed in scene units per second.
    pub fly_speed: f32,
    /// Free-fly displacement per scroll notch.
    pub fly_scroll_step: f32,
    /// Orbit distance at startup.
    pub initial_distance: f32,
    /// Yaw at startup.
    pub initial_yaw_deg: f32,
    /// Pitch at startup.
    pub initial_pitch_deg: f32,
}

/// Scene composition configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Line segments per orbit path.
    pub orbit_segments: u32,
    /// Star self-spin in degrees per real second.
    pub star_spin_deg_per_sec: f64,
    /// Planet index focused at startup (`None` = the star).
    pub initial_focus: Option<usize>,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Invert Y axis for camera look.
    pub invert_y: bool,
    /// Keybinding overrides (action name -> key name).
    pub keybindings: HashMap<String, String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Emit a frame summary every this many frames (0 disables).
    pub summary_interval: u64,
    /// Re-read `config.ron` every this many frames (0 disables).
    pub reload_interval: u64,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Solar System Explorer".to_string(),
            fov_y_deg: 45.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            start_running: true,
            max_frame_time: 0.25,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.0045,
            min_distance: 0.5,
            max_distance: 200.0,
            zoom_factor: 0.9,
            fly_speed: 40.0,
            fly_scroll_step: 2.0,
            initial_distance: 12.0,
            initial_yaw_deg: 90.0,
            initial_pitch_deg: -10.0,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            orbit_segments: 128,
            star_spin_deg_per_sec: 12.0,
            initial_focus: None,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            invert_y: false,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            summary_interval: 600,
            reload_interval: 120,
        }
    }
}

impl WindowConfig {
    /// Viewport aspect ratio (width / height), guarding a zero height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

// --- Validation ---

impl Config {
    /// Reject settings that would produce degenerate camera or clock state.
    ///
    /// Comparisons are negated so that NaN fails every check.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        if !(cam.min_distance > 0.0) {
            return Err(invalid("camera.min_distance", "must be positive"));
        }
        if !(cam.max_distance >= cam.min_distance) {
            return Err(invalid(
                "camera.max_distance",
                format!("must be >= min_distance ({})", cam.min_distance),
            ));
        }
        if !(cam.zoom_factor > 0.0 && cam.zoom_factor < 1.0) {
            return Err(invalid("camera.zoom_factor", "must be in (0, 1)"));
        }
        if !(cam.fly_speed >= 0.0) {
            return Err(invalid("camera.fly_speed", "must be non-negative"));
        }
        let speed = self.simulation.speed_multiplier;
        if !(MIN_SPEED_MULTIPLIER..=MAX_SPEED_MULTIPLIER).contains(&speed) {
            return Err(invalid(
                "simulation.speed_multiplier",
                format!("must be within [{MIN_SPEED_MULTIPLIER}, {MAX_SPEED_MULTIPLIER}]"),
            ));
        }
        if !(self.simulation.max_frame_time > 0.0) {
            return Err(invalid("simulation.max_frame_time", "must be positive"));
        }
        if self.scene.orbit_segments < 3 {
            return Err(invalid("scene.orbit_segments", "must be at least 3"));
        }
        let win = &self.window;
        if !(win.near > 0.0 && win.far > win.near) {
            return Err(invalid("window.far", "clip planes need 0 < near < far"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("orbit_segments: 128"));
    }

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), simulation: (speed_multiplier: 86400.0))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.simulation.speed_multiplier, 86400.0);
        assert!(config.simulation.start_running);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_inverted_distance_range_rejected() {
        let mut config = Config::default();
        config.camera.min_distance = 50.0;
        config.camera.max_distance = 10.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "camera.max_distance",
                ..
            }
        ));
    }

    #[test]
    fn test_speed_multiplier_out_of_range_rejected() {
        let mut config = Config::default();
        config.simulation.speed_multiplier = 0.0;
        assert!(config.validate().is_err());
        config.simulation.speed_multiplier = f64::NAN;
        assert!(config.validate().is_err());
        config.simulation.speed_multiplier = MAX_SPEED_MULTIPLIER;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_aspect_ratio_guards_zero_height() {
        let window = WindowConfig {
            height: 0,
            ..Default::default()
        };
        assert!(window.aspect_ratio().is_finite());
        assert!((WindowConfig::default().aspect_ratio() - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.simulation.speed_multiplier = 3600.0;
        config.scene.initial_focus = Some(2);

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(loaded, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.ron"),
            "(camera: (min_distance: -1.0))",
        )
        .unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.camera.fly_speed = 80.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().camera.fly_speed, 80.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
