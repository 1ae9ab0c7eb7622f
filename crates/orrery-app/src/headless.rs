//! Windowless frame loop: fixed or measured frame times, optional scripted
//! input, config hot reload, periodic summaries.

use orrery_input::InputScript;
use orrery_scene::FrameScene;
use tracing::{info, warn};

use crate::app::Orrery;
use crate::frame_timer::FrameTimer;
use crate::reload::ConfigWatch;

/// How a headless run is paced and fed.
#[derive(Debug, Default)]
pub struct HeadlessRun {
    /// Frames to run unless a quit event arrives first.
    pub frames: u64,
    /// Fixed real seconds per frame; measured wall time when `None`.
    pub frame_dt: Option<f64>,
    pub script: Option<InputScript>,
    /// Log a summary every this many frames; `0` disables.
    pub summary_interval: u64,
    /// Polled between frames; changes are applied before the next tick.
    pub config_watch: Option<ConfigWatch>,
}

/// What a finished run did.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub frames_run: u64,
    pub quit_requested: bool,
    pub elapsed_days: f64,
    pub real_seconds: f64,
    /// Uniform bytes the renderer would upload for the last frame.
    pub upload_bytes: usize,
    /// The last composed frame, if any frame ran.
    pub last_scene: Option<FrameScene>,
}

impl HeadlessRun {
    /// Drive `app` until the frame budget runs out or it asks to quit.
    ///
    /// Script events due on a frame are delivered before that frame ticks.
    pub fn run(mut self, app: &mut Orrery, timer: &mut FrameTimer) -> RunReport {
        let mut last_scene = None;
        let mut frames_run = 0;

        for frame in 0..self.frames {
            if let Some(watch) = self.config_watch.as_mut()
                && watch.is_due(frame)
                && let Some(config) = watch.poll()
            {
                match app.apply_config(&config) {
                    Ok(()) => self.summary_interval = config.debug.summary_interval,
                    Err(e) => warn!("Ignoring reloaded config: {e}"),
                }
            }
            if let Some(script) = self.script.as_mut() {
                for step in script.take_due(frame) {
                    app.handle_event(step.event);
                }
            }
            if app.quit_requested() {
                break;
            }

            let real_dt = match self.frame_dt {
                Some(dt) => timer.advance(dt),
                None => timer.tick(),
            };
            let scene = app.tick(real_dt);
            frames_run += 1;

            if self.summary_interval > 0 && frames_run % self.summary_interval == 0 {
                log_summary(app, &scene);
            }
            last_scene = Some(scene);
        }

        if let Some(scene) = &last_scene {
            log_summary(app, scene);
        }

        RunReport {
            frames_run,
            quit_requested: app.quit_requested(),
            elapsed_days: app.simulation().clock.elapsed_days(),
            real_seconds: app.real_seconds(),
            upload_bytes: last_scene.as_ref().map_or(0, FrameScene::upload_size),
            last_scene,
        }
    }
}

fn log_summary(app: &Orrery, scene: &FrameScene) {
    let snapshot = app.snapshot();
    info!(
        "Frame {}: {} ({}, x{}) | focus {} | {} camera at ({:.2}, {:.2}, {:.2}) | {} draws, {} uniform bytes",
        app.frame_count(),
        snapshot.elapsed_label,
        if snapshot.running { "running" } else { "paused" },
        snapshot.speed_multiplier,
        snapshot.focus_label(),
        if snapshot.fly_mode { "fly" } else { "orbit" },
        scene.eye.x,
        scene.eye.y,
        scene.eye.z,
        scene.draw_list.len(),
        scene.upload_size(),
    );
}
