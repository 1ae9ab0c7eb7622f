//! Model matrices for bodies, rings and the skybox.

use glam::{Mat3, Mat4, Vec3};

/// Base rotation about X that turns the sphere mesh's Z poles to world +Y.
pub const POLES_UP_DEG: f32 = -90.0;

/// `T(position) * Rx(poles up) * Ry(tilt) * Rz(spin) * S(size)`.
///
/// Tilt is applied before spin, so the body spins about its tilted axis.
#[must_use]
pub fn body_model(position: Vec3, axial_tilt_deg: f32, rotation_deg: f64, size: f32) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_x(POLES_UP_DEG.to_radians())
        * Mat4::from_rotation_y(axial_tilt_deg.to_radians())
        * Mat4::from_rotation_z((rotation_deg as f32).to_radians())
        * Mat4::from_scale(Vec3::splat(size))
}

/// `T(position) * Rx(tilt) * S(scale)`. Independent of the planet's own
/// tilt and spin.
#[must_use]
pub fn ring_model(position: Vec3, tilt_deg: f32, scale: f32) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_x(tilt_deg.to_radians())
        * Mat4::from_scale(Vec3::splat(scale))
}

/// View matrix with the translation removed, so the skybox stays at
/// infinity.
#[must_use]
pub fn skybox_view(view: Mat4) -> Mat4 {
    Mat4::from_mat3(Mat3::from_mat4(view))
}
