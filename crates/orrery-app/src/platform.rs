//! Where the orrery keeps its files.
//!
//! Config and logs live under the OS configuration directory (XDG on Linux,
//! Known Folders on Windows, Library on macOS), or under a directory given on
//! the command line.

use std::path::{Path, PathBuf};

/// Errors that can occur while resolving or creating directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Directory name under the OS configuration root.
pub const APP_NAME: &str = "orrery";

/// File holding user key bindings, next to `config.ron`.
pub const KEYBINDINGS_FILE: &str = "keybindings.ron";

/// Resolved directories for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDirs {
    /// `config.ron` and `keybindings.ron`.
    pub config_dir: PathBuf,
    /// JSON log file (debug builds).
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the OS directories without creating them.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        Ok(Self::resolve_with_root(&config_base))
    }

    /// Resolve directories rooted under a custom base path.
    #[must_use]
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Use `config_dir` as given, with logs in a `logs` subdirectory.
    #[must_use]
    pub fn from_config_dir(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            log_dir: config_dir.join("logs"),
        }
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }

    #[must_use]
    pub fn keybindings_path(&self) -> PathBuf {
        self.config_dir.join(KEYBINDINGS_FILE)
    }
}
