//! End-to-end headless runs through the public API.

use orrery_app::{
    FrameTimer, HeadlessRun, Orrery, PanelCommand, PlatformDirs, RunReport, TextureRegistry,
};
use orrery_config::Config;
use orrery_input::{InputScript, KeyBindings};
use orrery_scene::{BlendMode, RenderPass};

const TOUR: &str = r"
    (steps: [
        (frame: 0, event: SelectFocus(Some(2))),
        (frame: 10, event: PointerButton(button: Left, pressed: true)),
        (frame: 10, event: PointerMoved(dx: 25.0, dy: -10.0)),
        (frame: 11, event: PointerButton(button: Left, pressed: false)),
        (frame: 12, event: Scroll(2.0)),
        (frame: 20, event: ToggleFlyMode),
        (frame: 21, event: Held(action: MoveForward, held: true)),
        (frame: 30, event: Held(action: MoveForward, held: false)),
        (frame: 40, event: SelectFocus(Some(5))),
    ])
";

fn run_tour(frames: u64) -> (Orrery, RunReport) {
    let mut config = Config::default();
    config.simulation.speed_multiplier = 86_400.0;
    let mut app = Orrery::new(&config, &mut TextureRegistry::new()).unwrap();
    let report = HeadlessRun {
        frames,
        frame_dt: Some(1.0 / 60.0),
        script: Some(InputScript::from_ron(TOUR).unwrap()),
        summary_interval: 0,
        config_watch: None,
    }
    .run(&mut app, &mut FrameTimer::default());
    (app, report)
}

#[test]
fn test_identical_tours_compose_identical_frames() {
    let (_, a) = run_tour(60);
    let (_, b) = run_tour(60);
    assert_eq!(a.frames_run, 60);
    assert_eq!(a, b);
}

#[test]
fn test_tour_ends_in_orbit_around_saturn() {
    let (app, report) = run_tour(60);
    let scene = report.last_scene.unwrap();
    // Focusing Saturn after flying forces the orbit camera back on.
    assert!(!app.camera().is_fly());
    assert_eq!(app.focus().index(), Some(5));
    assert_eq!(scene.target, app.simulation().system.planets[5].position());
    assert!((report.elapsed_days - 1.0).abs() < 1e-9);
}

#[test]
fn test_tour_flies_between_focus_changes() {
    let (app, _) = run_tour(35);
    assert!(app.camera().is_fly());
}

#[test]
fn test_scene_passes_and_render_state() {
    let (_, report) = run_tour(1);
    let scene = report.last_scene.unwrap();
    assert!(scene.draw_list.is_pass_ordered());

    let skybox = scene.draw_list.pass(RenderPass::Skybox).next().unwrap();
    assert!(!skybox.state.depth_write);

    let ring = scene.draw_list.pass(RenderPass::Rings).next().unwrap();
    assert_eq!(ring.state.blend, BlendMode::Alpha);
    assert!(!ring.state.depth_write);
    assert!(ring.state.depth_test);
}

#[test]
fn test_paused_start_keeps_clock_at_zero() {
    let mut config = Config::default();
    config.simulation.start_running = false;
    let mut app = Orrery::new(&config, &mut TextureRegistry::new()).unwrap();
    let report = HeadlessRun {
        frames: 30,
        frame_dt: Some(0.1),
        ..Default::default()
    }
    .run(&mut app, &mut FrameTimer::default());
    assert_eq!(report.elapsed_days, 0.0);
    assert_eq!(app.snapshot().elapsed_label, "0 days");

    app.apply_command(PanelCommand::SetRunning(true));
    app.apply_command(PanelCommand::SetSpeedMultiplier(86_400.0));
    app.tick(0.25);
    assert!(app.simulation().clock.elapsed_days() > 0.0);
}

#[test]
fn test_config_and_bindings_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let dirs = PlatformDirs::resolve_with_root(tmp.path());
    dirs.create_dirs().unwrap();

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap();
    config.scene.initial_focus = Some(3);
    config.save(&dirs.config_dir).unwrap();
    let config = Config::load_or_create(&dirs.config_dir).unwrap();
    assert_eq!(config.scene.initial_focus, Some(3));

    KeyBindings::default()
        .save(&dirs.keybindings_path())
        .unwrap();
    let bindings = KeyBindings::load(&dirs.keybindings_path());
    assert_eq!(bindings, KeyBindings::default());

    let mut app =
        Orrery::with_bindings(&config, &mut TextureRegistry::new(), bindings).unwrap();
    let scene = app.tick(0.016);
    assert_eq!(scene.target, app.simulation().system.planets[3].position());
}
