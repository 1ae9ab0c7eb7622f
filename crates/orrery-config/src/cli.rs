//! Command-line argument parsing for the orrery.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "orrery", about = "Solar system explorer simulation core")]
pub struct CliArgs {
    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Simulated seconds per real second.
    #[arg(long)]
    pub speed: Option<f64>,

    /// Start with the simulation clock paused.
    #[arg(long)]
    pub paused: bool,

    /// Planet index to focus at startup (0 = Mercury).
    #[arg(long)]
    pub focus: Option<usize>,

    /// Number of frames to run before exiting.
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Fixed real seconds per frame; measured wall time is used when absent.
    #[arg(long)]
    pub frame_dt: Option<f64>,

    /// RON input script to replay.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(speed) = args.speed {
            self.simulation.speed_multiplier = speed;
        }
        if args.paused {
            self.simulation.start_running = false;
        }
        if let Some(focus) = args.focus {
            self.scene.initial_focus = Some(focus);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
