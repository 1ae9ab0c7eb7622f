//! Dual-mode camera: orbit around a target, or fly freely.
//!
//! Yaw and pitch are in radians and share one spherical convention in both
//! modes: `(cos p cos y, sin p, cos p sin y)`. In orbit mode that vector
//! points from the target to the eye; in fly mode it is the view direction.

use glam::{Mat4, Vec3};
use orrery_config::CameraConfig;
use tracing::debug;

use crate::input_state::{HeldControl, InputState};
use crate::settings::{CameraSettings, PITCH_LIMIT};

// Below this the summed fly direction is treated as "no movement".
const MIN_MOVE_LENGTH: f32 = 1e-4;

/// Orbit target and distance, kept while flying so the orbit pose can be
/// restored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitAnchor {
    pub target: Vec3,
    pub distance: f32,
}

/// Camera pose, tagged by mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraState {
    Orbit {
        target: Vec3,
        distance: f32,
        yaw: f32,
        pitch: f32,
    },
    Fly {
        position: Vec3,
        yaw: f32,
        pitch: f32,
        anchor: OrbitAnchor,
    },
}

impl CameraState {
    /// Eye position in world space.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        match *self {
            CameraState::Orbit {
                target,
                distance,
                yaw,
                pitch,
            } => target + distance * spherical(yaw, pitch),
            CameraState::Fly { position, .. } => position,
        }
    }

    #[must_use]
    pub fn yaw(&self) -> f32 {
        match *self {
            CameraState::Orbit { yaw, .. } | CameraState::Fly { yaw, .. } => yaw,
        }
    }

    #[must_use]
    pub fn pitch(&self) -> f32 {
        match *self {
            CameraState::Orbit { pitch, .. } | CameraState::Fly { pitch, .. } => pitch,
        }
    }

    #[must_use]
    pub fn is_fly(&self) -> bool {
        matches!(self, CameraState::Fly { .. })
    }

    /// Right-handed view matrix for the current pose.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        match *self {
            CameraState::Orbit { target, .. } => Mat4::look_at_rh(self.eye(), target, Vec3::Y),
            CameraState::Fly {
                position,
                yaw,
                pitch,
                ..
            } => Mat4::look_at_rh(position, position + spherical(yaw, pitch), Vec3::Y),
        }
    }
}

/// Unit vector for the given yaw and pitch.
#[must_use]
pub fn spherical(yaw: f32, pitch: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw)
}

/// Owns the camera state, its tunables, and the held-control set.
///
/// The input mutators are [`apply_pointer_delta`](Self::apply_pointer_delta),
/// [`apply_scroll`](Self::apply_scroll), [`set_key_held`](Self::set_key_held)
/// and [`toggle_fly_mode`](Self::toggle_fly_mode). The frame driver calls
/// [`set_target`](Self::set_target), [`move_fly`](Self::move_fly) and
/// [`enter_orbit`](Self::enter_orbit).
#[derive(Clone, Debug)]
pub struct CameraController {
    state: CameraState,
    settings: CameraSettings,
    input: InputState,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl CameraController {
    /// Start in orbit mode around the origin using the initial pose from
    /// `settings`.
    #[must_use]
    pub fn new(settings: CameraSettings) -> Self {
        let state = CameraState::Orbit {
            target: Vec3::ZERO,
            distance: settings.initial_distance,
            yaw: settings.initial_yaw,
            pitch: settings.initial_pitch,
        };
        Self {
            state,
            settings,
            input: InputState::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(CameraSettings::from(config))
    }

    #[must_use]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    #[must_use]
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Swap in new tunables, e.g. after a config reload. The pose is kept;
    /// only the orbit distance is pulled into the new range.
    pub fn set_settings(&mut self, settings: CameraSettings) {
        let (min, max) = (settings.min_distance, settings.max_distance);
        match &mut self.state {
            CameraState::Orbit { distance, .. } => *distance = distance.min(max).max(min),
            CameraState::Fly { anchor, .. } => {
                anchor.distance = anchor.distance.min(max).max(min);
            }
        }
        self.settings = settings;
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn is_fly(&self) -> bool {
        self.state.is_fly()
    }

    /// Current eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.state.eye()
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.state.view_matrix()
    }

    /// Rotate from a pointer movement in pixels. Orbit mode only rotates
    /// while the drag control is held; fly mode always does.
    pub fn apply_pointer_delta(&mut self, dx: f32, dy: f32) {
        if !self.is_fly() && !self.input.is_held(HeldControl::OrbitDrag) {
            return;
        }
        let sensitivity = self.settings.sensitivity;
        match &mut self.state {
            CameraState::Orbit { yaw, pitch, .. } | CameraState::Fly { yaw, pitch, .. } => {
                *yaw -= dx * sensitivity;
                *pitch = (*pitch - dy * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
            }
        }
    }

    /// Zoom (orbit) or translate along the view direction (fly).
    pub fn apply_scroll(&mut self, delta: f32) {
        let settings = &self.settings;
        match &mut self.state {
            CameraState::Orbit { distance, .. } => {
                *distance = (*distance * settings.zoom_factor.powf(delta))
                    .min(settings.max_distance)
                    .max(settings.min_distance);
            }
            CameraState::Fly {
                position,
                yaw,
                pitch,
                ..
            } => {
                *position += spherical(*yaw, *pitch) * delta * settings.fly_scroll_step;
            }
        }
    }

    /// Record a control as held or released.
    pub fn set_key_held(&mut self, control: HeldControl, held: bool) {
        self.input.set(control, held);
    }

    /// Switch between orbit and fly. Entering fly places the eye where the
    /// orbit eye was; entering orbit restores the anchored target and
    /// distance with the current yaw and pitch. Returns `true` if the camera
    /// is now flying.
    pub fn toggle_fly_mode(&mut self) -> bool {
        self.state = match self.state {
            CameraState::Orbit {
                target,
                distance,
                yaw,
                pitch,
            } => CameraState::Fly {
                position: self.state.eye(),
                yaw,
                pitch,
                anchor: OrbitAnchor { target, distance },
            },
            CameraState::Fly {
                yaw, pitch, anchor, ..
            } => CameraState::Orbit {
                target: anchor.target,
                distance: anchor.distance,
                yaw,
                pitch,
            },
        };
        debug!("Fly mode: {}", if self.is_fly() { "on" } else { "off" });
        self.is_fly()
    }

    /// Leave fly mode if active. Returns `true` if the mode changed.
    pub fn enter_orbit(&mut self) -> bool {
        if self.is_fly() {
            self.toggle_fly_mode();
            true
        } else {
            false
        }
    }

    /// Re-center the orbit on `target`. While flying, the anchor is updated
    /// so the next orbit pose uses it.
    pub fn set_target(&mut self, point: Vec3) {
        match &mut self.state {
            CameraState::Orbit { target, .. } => *target = point,
            CameraState::Fly { anchor, .. } => anchor.target = point,
        }
    }

    /// Integrate fly movement for `dt` real seconds from the held direction
    /// keys. Does nothing in orbit mode.
    pub fn move_fly(&mut self, dt: f32) {
        if !self.input.any_direction() {
            return;
        }
        let CameraState::Fly {
            position,
            yaw,
            pitch,
            ..
        } = &mut self.state
        else {
            return;
        };

        let forward = spherical(*yaw, *pitch);
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = Vec3::Y;

        let mut dir = Vec3::ZERO;
        if self.input.is_held(HeldControl::Forward) {
            dir += forward;
        }
        if self.input.is_held(HeldControl::Backward) {
            dir -= forward;
        }
        if self.input.is_held(HeldControl::Right) {
            dir += right;
        }
        if self.input.is_held(HeldControl::Left) {
            dir -= right;
        }
        if self.input.is_held(HeldControl::Up) {
            dir += up;
        }
        if self.input.is_held(HeldControl::Down) {
            dir -= up;
        }

        if dir.length() > MIN_MOVE_LENGTH {
            *position += dir.normalize() * self.settings.fly_speed * dt;
        }
    }

    /// Release all held controls.
    pub fn release_all(&mut self) {
        self.input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn flying() -> CameraController {
        let mut cam = CameraController::default();
        cam.toggle_fly_mode();
        cam
    }

    fn fly_position(cam: &CameraController) -> Vec3 {
        match cam.state() {
            CameraState::Fly { position, .. } => *position,
            CameraState::Orbit { .. } => panic!("expected fly mode"),
        }
    }

    fn orbit_distance(cam: &CameraController) -> f32 {
        match cam.state() {
            CameraState::Orbit { distance, .. } => *distance,
            CameraState::Fly { .. } => panic!("expected orbit mode"),
        }
    }

    #[test]
    fn test_initial_orbit_pose() {
        let cam = CameraController::default();
        assert!(!cam.is_fly());
        // yaw 90°, pitch -10°, distance 12 around the origin.
        let eye = cam.eye();
        assert!(eye.x.abs() < EPS);
        assert!((eye.length() - 12.0).abs() < EPS);
        assert!(eye.y < 0.0);
        assert!(eye.z > 11.0);
    }

    #[test]
    fn test_orbit_to_fly_keeps_eye() {
        let mut cam = CameraController::default();
        cam.set_target(Vec3::new(4.0, 0.0, -2.0));
        let eye_before = cam.eye();
        assert!(cam.toggle_fly_mode());
        assert!((fly_position(&cam) - eye_before).length() < EPS);
    }

    #[test]
    fn test_fly_to_orbit_is_bit_identical() {
        let mut cam = CameraController::default();
        cam.set_target(Vec3::new(1.0, 2.0, 3.0));
        cam.apply_scroll(3.0);
        cam.toggle_fly_mode();
        cam.apply_pointer_delta(37.0, -12.0);
        let (yaw, pitch) = (cam.state().yaw(), cam.state().pitch());
        let CameraState::Fly { anchor, .. } = *cam.state() else {
            panic!("expected fly mode");
        };

        assert!(!cam.toggle_fly_mode());
        let CameraState::Orbit {
            target,
            distance,
            yaw: y,
            pitch: p,
        } = *cam.state()
        else {
            panic!("expected orbit mode");
        };
        assert_eq!(target.to_array(), anchor.target.to_array());
        assert_eq!(distance.to_bits(), anchor.distance.to_bits());
        assert_eq!(y.to_bits(), yaw.to_bits());
        assert_eq!(p.to_bits(), pitch.to_bits());
    }

    #[test]
    fn test_orbit_drag_requires_button() {
        let mut cam = CameraController::default();
        let before = *cam.state();
        cam.apply_pointer_delta(100.0, 50.0);
        assert_eq!(*cam.state(), before);

        cam.set_key_held(HeldControl::OrbitDrag, true);
        cam.apply_pointer_delta(100.0, 0.0);
        assert!((cam.state().yaw() - (before.yaw() - 0.45)).abs() < EPS);
    }

    #[test]
    fn test_fly_look_is_unconditional() {
        let mut cam = flying();
        let yaw = cam.state().yaw();
        cam.apply_pointer_delta(-10.0, 0.0);
        assert!((cam.state().yaw() - (yaw + 0.045)).abs() < EPS);
    }

    #[test]
    fn test_pitch_clamped_in_both_modes() {
        let mut cam = CameraController::default();
        cam.set_key_held(HeldControl::OrbitDrag, true);
        for dy in [-5000.0, 3.0, 10_000.0, -1.0, -99_999.0] {
            cam.apply_pointer_delta(0.0, dy);
            assert!(cam.state().pitch().abs() <= PITCH_LIMIT);
        }
        cam.toggle_fly_mode();
        for dy in [1e6, -1e6, 42.0] {
            cam.apply_pointer_delta(7.0, dy);
            assert!(cam.state().pitch().abs() <= PITCH_LIMIT);
        }
    }

    #[test]
    fn test_zoom_is_exponential_and_clamped() {
        let mut cam = CameraController::default();
        cam.apply_scroll(1.0);
        assert!((orbit_distance(&cam) - 12.0 * 0.9).abs() < EPS);
        cam.apply_scroll(-1.0);
        assert!((orbit_distance(&cam) - 12.0).abs() < EPS);

        cam.apply_scroll(500.0);
        assert_eq!(orbit_distance(&cam), 0.5);
        cam.apply_scroll(-500.0);
        assert_eq!(orbit_distance(&cam), 200.0);
    }

    #[test]
    fn test_fly_scroll_moves_along_view() {
        let mut cam = flying();
        let start = fly_position(&cam);
        let forward = spherical(cam.state().yaw(), cam.state().pitch());
        cam.apply_scroll(1.5);
        let moved = fly_position(&cam) - start;
        assert!((moved - forward * 3.0).length() < EPS);
    }

    #[test]
    fn test_move_fly_without_keys_is_noop() {
        let mut cam = flying();
        let start = fly_position(&cam);
        cam.move_fly(1.0);
        assert_eq!(fly_position(&cam), start);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut cam = flying();
        let start = fly_position(&cam);
        cam.set_key_held(HeldControl::Forward, true);
        cam.set_key_held(HeldControl::Backward, true);
        cam.move_fly(1.0);
        assert!((fly_position(&cam) - start).length() < EPS);
        assert!(fly_position(&cam).is_finite());
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let mut cam = flying();
        let start = fly_position(&cam);
        cam.set_key_held(HeldControl::Forward, true);
        cam.set_key_held(HeldControl::Right, true);
        cam.set_key_held(HeldControl::Up, true);
        cam.move_fly(0.5);
        let travelled = (fly_position(&cam) - start).length();
        assert!((travelled - 40.0 * 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_move_fly_ignored_in_orbit() {
        let mut cam = CameraController::default();
        cam.set_key_held(HeldControl::Forward, true);
        let before = *cam.state();
        cam.move_fly(1.0);
        assert_eq!(*cam.state(), before);
    }

    #[test]
    fn test_set_target_while_flying_updates_anchor() {
        let mut cam = flying();
        let position = fly_position(&cam);
        cam.set_target(Vec3::new(9.0, 0.0, 0.0));
        assert_eq!(fly_position(&cam), position);
        cam.enter_orbit();
        let CameraState::Orbit { target, .. } = *cam.state() else {
            panic!("expected orbit mode");
        };
        assert_eq!(target, Vec3::new(9.0, 0.0, 0.0));
    }

    #[test]
    fn test_enter_orbit_reports_change() {
        let mut cam = flying();
        assert!(cam.enter_orbit());
        assert!(!cam.enter_orbit());
    }

    #[test]
    fn test_view_matrix_is_finite_at_pitch_limit() {
        let mut cam = CameraController::default();
        cam.set_key_held(HeldControl::OrbitDrag, true);
        cam.apply_pointer_delta(0.0, -1e6);
        assert!(cam.view_matrix().is_finite());
        cam.toggle_fly_mode();
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn test_drag_button_alone_does_not_fly() {
        let mut cam = flying();
        let start = fly_position(&cam);
        cam.set_key_held(HeldControl::OrbitDrag, true);
        cam.move_fly(1.0);
        assert_eq!(fly_position(&cam), start);
    }

    #[test]
    fn test_set_settings_pulls_distance_into_range() {
        let mut cam = CameraController::default();
        let narrow = CameraSettings {
            min_distance: 1.0,
            max_distance: 5.0,
            fly_speed: 3.0,
            ..CameraSettings::default()
        };
        cam.set_settings(narrow.clone());
        assert_eq!(orbit_distance(&cam), 5.0);
        assert_eq!(cam.settings(), &narrow);

        let mut cam = flying();
        cam.set_settings(narrow);
        cam.toggle_fly_mode();
        assert_eq!(orbit_distance(&cam), 5.0);
    }
}
