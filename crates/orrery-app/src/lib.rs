//! Orrery application layer.
//!
//! Wires the simulation, camera and scene composer into a per-frame pipeline,
//! routes input and control panel commands, reloads `config.ron`, and drives
//! headless runs.

pub mod app;
pub mod error;
pub mod frame_timer;
pub mod headless;
pub mod panel;
pub mod platform;
pub mod reload;
pub mod textures;

pub use app::Orrery;
pub use error::AppError;
pub use frame_timer::{FrameTimer, MAX_FRAME_TIME};
pub use headless::{HeadlessRun, RunReport};
pub use panel::{PanelCommand, PanelSnapshot};
pub use platform::{APP_NAME, KEYBINDINGS_FILE, PlatformDirs, PlatformError};
pub use reload::ConfigWatch;
pub use textures::TextureRegistry;
