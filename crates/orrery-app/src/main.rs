//! Headless orrery runner.
//!
//! Loads `config.ron`, builds the solar system and camera, and runs the frame
//! pipeline for a fixed number of frames, optionally replaying a scripted
//! input tour.
//!
//! Run with: `cargo run -p orrery-app -- --frames 600 --frame-dt 0.016`

use std::process::ExitCode;

use clap::Parser;
use orrery_app::{
    AppError, ConfigWatch, FrameTimer, HeadlessRun, Orrery, PlatformDirs, TextureRegistry,
};
use orrery_config::{CliArgs, Config};
use orrery_input::{InputScript, KeyBindings};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (dirs, on_disk, config) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            orrery_log::init_logging(None, false, None);
            error!("Startup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Orrery starting");
    info!("Config directory: {}", dirs.config_dir.display());

    let watch = ConfigWatch::new(&dirs.config_dir, on_disk, args.clone());
    match run(&args, &dirs, &config, watch) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns the directories, the config as read from disk, and the effective
/// config with CLI overrides applied.
fn load_config(args: &CliArgs) -> Result<(PlatformDirs, Config, Config), AppError> {
    let dirs = match &args.config {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let on_disk = Config::load_or_create(&dirs.config_dir)?;
    let mut config = on_disk.clone();
    config.apply_cli_overrides(args);
    config.validate()?;
    Ok((dirs, on_disk, config))
}

fn run(
    args: &CliArgs,
    dirs: &PlatformDirs,
    config: &Config,
    watch: ConfigWatch,
) -> Result<(), AppError> {
    let bindings = KeyBindings::load(&dirs.keybindings_path());
    let mut app = Orrery::with_bindings(config, &mut TextureRegistry::new(), bindings)?;

    let script = match &args.script {
        Some(path) => {
            let script = InputScript::load(path)?;
            info!(
                "Replaying {} scripted events from {}",
                script.steps().len(),
                path.display()
            );
            Some(script)
        }
        None => None,
    };

    let mut timer = FrameTimer::new(config.simulation.max_frame_time);
    let report = HeadlessRun {
        frames: args.frames,
        frame_dt: args.frame_dt,
        script,
        summary_interval: config.debug.summary_interval,
        config_watch: (watch.interval() > 0).then_some(watch),
    }
    .run(&mut app, &mut timer);

    info!(
        "Finished after {} frames ({:.2}s real, {:.2} simulated days){}",
        report.frames_run,
        report.real_seconds,
        report.elapsed_days,
        if report.quit_requested {
            ", quit requested"
        } else {
            ""
        }
    );
    Ok(())
}
