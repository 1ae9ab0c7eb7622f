//! Celestial bodies: planets with optional moons and rings, and the central star.

use glam::Vec3;

use crate::error::BodyError;
use crate::kinematics::{
    orbit_speed_from_period_days, rotation_speed_from_period_hours, wrap_degrees,
};

/// Opaque texture handle issued by the asset layer. `0` means "missing";
/// whether a missing texture is skipped or drawn with a fallback is the
/// renderer's decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// The "no texture" handle.
    pub const MISSING: Self = Self(0);

    /// Whether the asset layer failed to provide this texture.
    #[must_use]
    pub fn is_missing(self) -> bool {
        self == Self::MISSING
    }
}

/// Static description of a body, as found in the startup tables.
#[derive(Clone, Debug)]
pub struct BodyDesc {
    /// Display name.
    pub name: &'static str,
    /// Orbit radius around the parent, in scene units.
    pub orbit_radius: f32,
    /// Orbital period in days; negative for retrograde orbits.
    pub orbital_period_days: f64,
    /// Rotation period in hours; negative for retrograde spin.
    pub rotation_period_hours: f64,
    /// Axial tilt in degrees.
    pub axial_tilt: f32,
    /// Uniform mesh scale.
    pub size: f32,
    /// Orbit angle at startup, in degrees.
    pub initial_orbit_angle: f64,
    /// Surface texture.
    pub texture: TextureHandle,
}

/// A planet or moon on a circular orbit around its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    /// Display name.
    pub name: String,
    /// Orbit radius around the parent, in scene units.
    pub orbit_radius: f32,
    /// Degrees per simulated second; negative is retrograde.
    pub orbit_angular_speed: f64,
    /// Degrees per simulated second; negative is retrograde.
    pub rotation_angular_speed: f64,
    /// Axial tilt in degrees.
    pub axial_tilt: f32,
    /// Uniform mesh scale.
    pub size: f32,
    /// Surface texture.
    pub texture: TextureHandle,
    /// Position around the parent in degrees, in `[0, 360)`.
    pub orbit_angle: f64,
    /// Self-spin in degrees, in `[0, 360)`.
    pub rotation_angle: f64,
}

impl CelestialBody {
    /// Build a body from its static description, rejecting geometry that
    /// would render as NaN or with a negative scale.
    pub fn new(desc: BodyDesc) -> Result<Self, BodyError> {
        let name = desc.name.to_string();
        if !desc.size.is_finite() || desc.size <= 0.0 {
            return Err(BodyError::NonPositiveSize {
                name,
                size: desc.size,
            });
        }
        if !desc.orbit_radius.is_finite() || desc.orbit_radius < 0.0 {
            return Err(BodyError::InvalidOrbitRadius {
                name,
                radius: desc.orbit_radius,
            });
        }
        for (kind, period) in [
            ("orbital", desc.orbital_period_days),
            ("rotation", desc.rotation_period_hours),
        ] {
            if !period.is_finite() || period == 0.0 {
                return Err(BodyError::InvalidPeriod { name, kind, period });
            }
        }
        if !desc.axial_tilt.is_finite() {
            return Err(BodyError::NonFinite {
                name,
                field: "axial_tilt",
            });
        }
        if !desc.initial_orbit_angle.is_finite() {
            return Err(BodyError::NonFinite {
                name,
                field: "initial_orbit_angle",
            });
        }

        Ok(Self {
            name,
            orbit_radius: desc.orbit_radius,
            orbit_angular_speed: orbit_speed_from_period_days(desc.orbital_period_days),
            rotation_angular_speed: rotation_speed_from_period_hours(desc.rotation_period_hours),
            axial_tilt: desc.axial_tilt,
            size: desc.size,
            texture: desc.texture,
            orbit_angle: wrap_degrees(desc.initial_orbit_angle),
            rotation_angle: 0.0,
        })
    }

    /// Offset from the parent in the orbital (XZ) plane.
    #[must_use]
    pub fn orbital_offset(&self) -> Vec3 {
        let angle = (self.orbit_angle as f32).to_radians();
        Vec3::new(
            angle.cos() * self.orbit_radius,
            0.0,
            angle.sin() * self.orbit_radius,
        )
    }
}

/// Saturn-style ring drawn around a planet.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    /// Inner edge as a fraction of the ring mesh's unit radius.
    pub inner_radius: f32,
    /// Outer edge as a fraction of the ring mesh's unit radius.
    pub outer_radius: f32,
    /// Inclination about the X axis, in degrees.
    pub tilt: f32,
    /// Ring scale relative to the planet size.
    pub scale: f32,
    /// Ring texture (usually with alpha).
    pub texture: TextureHandle,
}

impl Ring {
    /// Validate ring radii for the named planet.
    pub fn new(
        planet: &str,
        inner_radius: f32,
        outer_radius: f32,
        tilt: f32,
        scale: f32,
        texture: TextureHandle,
    ) -> Result<Self, BodyError> {
        let radii_ok = inner_radius.is_finite()
            && outer_radius.is_finite()
            && inner_radius > 0.0
            && inner_radius < outer_radius;
        if !radii_ok {
            return Err(BodyError::InvalidRing {
                name: planet.to_string(),
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(BodyError::NonPositiveSize {
                name: format!("{planet} ring"),
                size: scale,
            });
        }
        if !tilt.is_finite() {
            return Err(BodyError::NonFinite {
                name: planet.to_string(),
                field: "ring tilt",
            });
        }
        Ok(Self {
            inner_radius,
            outer_radius,
            tilt,
            scale,
            texture,
        })
    }
}

/// A planet orbiting the star, owning its moons and optional ring.
#[derive(Clone, Debug, PartialEq)]
pub struct Planet {
    /// The planet itself.
    pub body: CelestialBody,
    /// Moons, orbiting relative to the planet's position.
    pub moons: Vec<CelestialBody>,
    /// Optional ring.
    pub ring: Option<Ring>,
}

impl Planet {
    /// A planet with no moons and no ring.
    #[must_use]
    pub fn new(body: CelestialBody) -> Self {
        Self {
            body,
            moons: Vec::new(),
            ring: None,
        }
    }

    /// Attach a moon.
    #[must_use]
    pub fn with_moon(mut self, moon: CelestialBody) -> Self {
        self.moons.push(moon);
        self
    }

    /// Attach a ring.
    #[must_use]
    pub fn with_ring(mut self, ring: Ring) -> Self {
        self.ring = Some(ring);
        self
    }

    /// Planet name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.body.name
    }

    /// World position; planets orbit the star at the origin.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.body.orbital_offset()
    }

    /// Zero the planet's angles and those of its moons.
    pub fn reset_angles(&mut self) {
        self.body.reset_angles();
        for moon in &mut self.moons {
            moon.reset_angles();
        }
    }
}

/// The central star. It sits at the origin and spins with real time.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    /// Display name.
    pub name: String,
    /// Uniform mesh scale.
    pub size: f32,
    /// Self-spin in degrees per real second.
    pub spin_rate: f64,
    /// Surface texture.
    pub texture: TextureHandle,
}

impl Star {
    /// Validate and build a star.
    pub fn new(
        name: &str,
        size: f32,
        spin_rate: f64,
        texture: TextureHandle,
    ) -> Result<Self, BodyError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(BodyError::NonPositiveSize {
                name: name.to_string(),
                size,
            });
        }
        if !spin_rate.is_finite() {
            return Err(BodyError::NonFinite {
                name: name.to_string(),
                field: "spin_rate",
            });
        }
        Ok(Self {
            name: name.to_string(),
            size,
            spin_rate,
            texture,
        })
    }

    /// Spin angle in degrees after `real_seconds` of wall time.
    #[must_use]
    pub fn spin_angle(&self, real_seconds: f64) -> f64 {
        wrap_degrees(real_seconds * self.spin_rate)
    }
}
