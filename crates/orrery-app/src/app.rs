//! The per-frame pipeline: input, clock, kinematics, camera, composition.

use orrery_camera::{CameraController, CameraSettings, HeldControl};
use orrery_config::Config;
use orrery_input::{Action, InputEvent, KeyBindings, PointerButton, PointerTracker};
use orrery_scene::{FocusSelection, FrameScene, Projection, SceneComposer, focus_names};
use orrery_sim::{Simulation, TextureSource};
use tracing::{debug, info, warn};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use crate::error::AppError;
use crate::panel::{PanelCommand, PanelSnapshot};

/// One orrery instance: owns the simulation, the camera and everything that
/// turns them into a [`FrameScene`].
pub struct Orrery {
    simulation: Simulation,
    camera: CameraController,
    composer: SceneComposer,
    focus: FocusSelection,
    /// Config currently in effect; reloads are diffed against it.
    config: Config,
    /// Bindings before `config.input.keybindings` overrides.
    base_bindings: KeyBindings,
    bindings: KeyBindings,
    pointer: PointerTracker,
    invert_y: bool,
    /// Wall time since start; drives the star spin, unaffected by pause.
    real_seconds: f64,
    frame_count: u64,
    quit_requested: bool,
}

impl Orrery {
    /// Build with the default key bindings plus any overrides in `config`.
    pub fn new(config: &Config, textures: &mut impl TextureSource) -> Result<Self, AppError> {
        Self::with_bindings(config, textures, KeyBindings::default())
    }

    /// Build with `bindings`, then apply `config.input.keybindings` on top.
    pub fn with_bindings(
        config: &Config,
        textures: &mut impl TextureSource,
        base_bindings: KeyBindings,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let simulation = Simulation::from_config(config, textures)?;
        let skybox = orrery_sim::skybox(textures);
        let composer = SceneComposer::from_config(&simulation.system, config, skybox);
        let mut bindings = base_bindings.clone();
        bindings.apply_overrides(&config.input.keybindings)?;

        let mesh_triangles: usize = composer.sphere().triangle_count()
            + composer
                .ring_meshes()
                .iter()
                .map(|ring| ring.mesh.triangle_count())
                .sum::<usize>();
        debug!(
            "Static geometry: {} orbit paths, {} ring meshes, {} triangles",
            composer.orbit_paths().len(),
            composer.ring_meshes().len(),
            mesh_triangles
        );

        let initial_focus = config.scene.initial_focus;
        if let Some(index) = initial_focus
            && simulation.system.planet(index).is_none()
        {
            warn!("Initial focus {index} is out of range; following the star");
        }

        info!(
            "Orrery ready: {} planets, speed x{}, {}",
            simulation.system.planets.len(),
            simulation.clock.speed_multiplier(),
            if simulation.clock.is_running() {
                "running"
            } else {
                "paused"
            }
        );

        Ok(Self {
            simulation,
            camera: CameraController::from_config(&config.camera),
            composer,
            focus: FocusSelection::new(initial_focus),
            config: config.clone(),
            base_bindings,
            bindings,
            pointer: PointerTracker::new(),
            invert_y: config.input.invert_y,
            real_seconds: 0.0,
            frame_count: 0,
            quit_requested: false,
        })
    }

    /// Run one frame of `real_dt` seconds and compose the result.
    ///
    /// Kinematics runs before composition, so the scene reflects this frame's
    /// positions. Fly movement uses real time, not simulated time.
    pub fn tick(&mut self, real_dt: f64) -> FrameScene {
        let real_dt = if real_dt.is_finite() && real_dt > 0.0 {
            real_dt
        } else {
            0.0
        };
        self.real_seconds += real_dt;
        self.frame_count += 1;

        self.simulation.tick(real_dt);
        self.camera.move_fly(real_dt as f32);
        self.composer.compose(
            &self.simulation.system,
            &mut self.camera,
            &mut self.focus,
            self.real_seconds,
        )
    }

    /// Route one input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerButton {
                button: PointerButton::Left,
                pressed,
            } => self.camera.set_key_held(HeldControl::OrbitDrag, pressed),
            InputEvent::PointerButton { .. } => {}
            InputEvent::PointerMoved { dx, dy } => {
                let dy = if self.invert_y { -dy } else { dy };
                self.camera.apply_pointer_delta(dx, dy);
            }
            InputEvent::Scroll(delta) => self.camera.apply_scroll(delta),
            InputEvent::Held { action, held } => {
                if let Some(control) = held_control(action) {
                    self.camera.set_key_held(control, held);
                }
            }
            InputEvent::ToggleFlyMode => {
                self.camera.toggle_fly_mode();
            }
            InputEvent::SelectFocus(index) => self.select_focus(index),
            InputEvent::TogglePause => {
                let running = self.simulation.clock.toggle_running();
                info!("Simulation {}", if running { "resumed" } else { "paused" });
            }
            InputEvent::ResetAll => self.simulation.reset_all(),
            InputEvent::Quit => {
                info!("Quit requested");
                self.quit_requested = true;
            }
        }
    }

    /// Apply a control panel request.
    pub fn apply_command(&mut self, command: PanelCommand) {
        match command {
            PanelCommand::SetRunning(running) => self.simulation.clock.set_running(running),
            PanelCommand::ToggleRunning => {
                self.simulation.clock.toggle_running();
            }
            PanelCommand::SetSpeedMultiplier(speed) => {
                self.simulation.clock.set_speed_multiplier(speed);
                debug!(
                    "Speed multiplier: {}",
                    self.simulation.clock.speed_multiplier()
                );
            }
            PanelCommand::SelectFocus(index) => self.select_focus(index),
            PanelCommand::ResetAll => self.simulation.reset_all(),
        }
    }

    /// Apply a reloaded config to the running instance.
    ///
    /// Only settings that changed since the last applied config are touched,
    /// so a speed chosen on the control panel survives an unrelated edit.
    /// The solar system, clock state and focus are left alone, and the
    /// viewport aspect ratio stays with the host. On error nothing changes.
    pub fn apply_config(&mut self, config: &Config) -> Result<(), AppError> {
        config.validate()?;
        let mut bindings = self.base_bindings.clone();
        bindings.apply_overrides(&config.input.keybindings)?;
        self.bindings = bindings;

        let old = &self.config;
        if config.simulation.speed_multiplier != old.simulation.speed_multiplier {
            self.simulation
                .clock
                .set_speed_multiplier(config.simulation.speed_multiplier);
        }
        if config.camera != old.camera {
            self.camera.set_settings(CameraSettings::from(&config.camera));
        }
        if config.window != old.window {
            let aspect_ratio = self.composer.projection().aspect_ratio;
            self.composer.set_projection(Projection {
                aspect_ratio,
                ..Projection::from(&config.window)
            });
        }
        self.invert_y = config.input.invert_y;
        self.config = config.clone();
        info!("Applied reloaded config");
        Ok(())
    }

    /// State for the control panel.
    #[must_use]
    pub fn snapshot(&self) -> PanelSnapshot {
        let clock = &self.simulation.clock;
        PanelSnapshot {
            running: clock.is_running(),
            speed_multiplier: clock.speed_multiplier(),
            focus: self.focus.index(),
            focus_names: focus_names(&self.simulation.system),
            elapsed_label: clock.format_elapsed(),
            fly_mode: self.camera.is_fly(),
        }
    }

    fn select_focus(&mut self, index: Option<usize>) {
        match index.map(|i| self.simulation.system.planet(i)) {
            Some(None) => warn!("Focus index {index:?} is out of range; following the star"),
            Some(Some(planet)) => debug!("Focus: {}", planet.name()),
            None => debug!("Focus: star"),
        }
        self.focus.select(index);
    }

    // --- winit-facing input ---

    /// Translate a keyboard transition through the key bindings.
    pub fn on_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) {
        if let Some(event) = self.bindings.translate(key, pressed, repeat) {
            self.handle_event(event);
        }
    }

    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        if let Some(event) = self.pointer.on_cursor_moved(x, y) {
            self.handle_event(event);
        }
    }

    pub fn on_cursor_left(&mut self) {
        self.pointer.on_cursor_left();
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if let Some(event) = self.pointer.on_button(button, state) {
            self.handle_event(event);
        }
    }

    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        if let Some(event) = self.pointer.on_scroll(delta) {
            self.handle_event(event);
        }
    }

    /// Mark whether the control panel wants the pointer this frame.
    pub fn set_overlay_captured(&mut self, captured: bool) {
        self.pointer.set_overlay_captured(captured);
    }

    /// Focus lost: release every held control so nothing sticks.
    pub fn on_focus_lost(&mut self) {
        self.camera.release_all();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.composer.set_viewport(width, height);
    }

    // --- accessors ---

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    #[must_use]
    pub fn composer(&self) -> &SceneComposer {
        &self.composer
    }

    #[must_use]
    pub fn focus(&self) -> &FocusSelection {
        &self.focus
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    #[must_use]
    pub fn real_seconds(&self) -> f64 {
        self.real_seconds
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

/// Camera control driven by a held movement action.
fn held_control(action: Action) -> Option<HeldControl> {
    Some(match action {
        Action::MoveForward => HeldControl::Forward,
        Action::MoveBackward => HeldControl::Backward,
        Action::MoveLeft => HeldControl::Left,
        Action::MoveRight => HeldControl::Right,
        Action::MoveUp => HeldControl::Up,
        Action::MoveDown => HeldControl::Down,
        Action::ToggleFlyMode
        | Action::TogglePause
        | Action::ResetSimulation
        | Action::Quit
        | Action::Focus(_) => return None,
    })
}
