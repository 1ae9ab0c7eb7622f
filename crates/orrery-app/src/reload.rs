//! Periodic `config.ron` hot reload for long-running sessions.

use std::path::PathBuf;

use orrery_config::{CliArgs, Config};
use tracing::{info, warn};

/// Watches `config.ron` for edits.
///
/// Changes are detected against the config as it was last read from disk,
/// then the command-line overrides are layered on top again so a reload never
/// undoes a flag the session was started with.
#[derive(Debug)]
pub struct ConfigWatch {
    config_dir: PathBuf,
    on_disk: Config,
    overrides: CliArgs,
    interval: u64,
}

impl ConfigWatch {
    /// `on_disk` is the config as loaded, before CLI overrides.
    pub fn new(config_dir: impl Into<PathBuf>, on_disk: Config, overrides: CliArgs) -> Self {
        let interval = on_disk.debug.reload_interval;
        Self {
            config_dir: config_dir.into(),
            on_disk,
            overrides,
            interval,
        }
    }

    /// Frames between polls; `0` means never.
    #[must_use]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Whether the file should be re-read before `frame`.
    #[must_use]
    pub fn is_due(&self, frame: u64) -> bool {
        self.interval > 0 && frame > 0 && frame % self.interval == 0
    }

    /// Re-read the file. Returns the effective config (CLI overrides applied)
    /// when it changed and is valid.
    pub fn poll(&mut self) -> Option<Config> {
        let reloaded = match self.on_disk.reload(&self.config_dir) {
            Ok(Some(config)) => config,
            Ok(None) => return None,
            Err(e) => {
                warn!("Config reload failed, keeping current settings: {e}");
                return None;
            }
        };

        self.interval = reloaded.debug.reload_interval;
        let mut effective = reloaded.clone();
        self.on_disk = reloaded;
        effective.apply_cli_overrides(&self.overrides);
        if let Err(e) = effective.validate() {
            warn!("Reloaded config is invalid with command-line overrides: {e}");
            return None;
        }
        info!("Picked up changes to {}", self.config_dir.join("config.ron").display());
        Some(effective)
    }
}
