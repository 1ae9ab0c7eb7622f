//! The built-in solar system: the Sun, eight planets, Earth's Moon and
//! Saturn's ring.

use tracing::debug;

use crate::body::{BodyDesc, CelestialBody, Planet, Ring, Star, TextureHandle};
use crate::error::BodyError;
use crate::simulation::SolarSystem;

/// Resolves asset paths to texture handles. Implemented by the asset layer;
/// a loader that fails should hand back [`TextureHandle::MISSING`].
pub trait TextureSource {
    /// A 2D texture.
    fn texture(&mut self, asset: &str) -> TextureHandle;

    /// A cube map from six faces in +X, -X, +Y, -Y, +Z, -Z order.
    fn cubemap(&mut self, faces: &[&str; 6]) -> TextureHandle;
}

/// Starfield cube map faces, in [`TextureSource::cubemap`] order.
pub const SKYBOX_FACES: [&str; 6] = [
    "assets/skybox/starfield_rt.tga",
    "assets/skybox/starfield_lf.tga",
    "assets/skybox/starfield_up.tga",
    "assets/skybox/starfield_dn.tga",
    "assets/skybox/starfield_ft.tga",
    "assets/skybox/starfield_bk.tga",
];

/// Sun self-spin in degrees per real second.
pub const SUN_SPIN_DEG_PER_SEC: f64 = 12.0;

struct PlanetRow {
    name: &'static str,
    texture: &'static str,
    orbit_radius: f32,
    orbital_period_days: f64,
    rotation_period_hours: f64,
    axial_tilt: f32,
    size: f32,
    initial_orbit_angle: f64,
}

const PLANETS: [PlanetRow; 8] = [
    PlanetRow {
        name: "Mercury",
        texture: "assets/mercury.jpg",
        orbit_radius: 2.0,
        orbital_period_days: 87.97,
        rotation_period_hours: 1407.6,
        axial_tilt: 0.01,
        size: 0.09,
        initial_orbit_angle: 0.0,
    },
    PlanetRow {
        name: "Venus",
        texture: "assets/venus.jpg",
        orbit_radius: 3.0,
        orbital_period_days: 224.7,
        rotation_period_hours: -5832.5,
        axial_tilt: 177.4,
        size: 0.19,
        initial_orbit_angle: 60.0,
    },
    PlanetRow {
        name: "Earth",
        texture: "assets/earth.jpg",
        orbit_radius: 4.0,
        orbital_period_days: 365.256,
        rotation_period_hours: 23.93,
        axial_tilt: 23.44,
        size: 0.205,
        initial_orbit_angle: 120.0,
    },
    PlanetRow {
        name: "Mars",
        texture: "assets/mars.jpg",
        orbit_radius: 5.0,
        orbital_period_days: 687.0,
        rotation_period_hours: 24.62,
        axial_tilt: 25.19,
        size: 0.14,
        initial_orbit_angle: 200.0,
    },
    PlanetRow {
        name: "Jupiter",
        texture: "assets/jupiter.jpg",
        orbit_radius: 7.0,
        orbital_period_days: 4331.0,
        rotation_period_hours: 9.93,
        axial_tilt: 3.13,
        size: 0.48,
        initial_orbit_angle: 20.0,
    },
    PlanetRow {
        name: "Saturn",
        texture: "assets/saturn.jpg",
        orbit_radius: 9.0,
        orbital_period_days: 10747.0,
        rotation_period_hours: 10.56,
        axial_tilt: 26.73,
        size: 0.42,
        initial_orbit_angle: 300.0,
    },
    PlanetRow {
        name: "Uranus",
        texture: "assets/uranus.jpg",
        orbit_radius: 11.5,
        orbital_period_days: 30589.0,
        rotation_period_hours: -17.24,
        axial_tilt: 97.77,
        size: 0.28,
        initial_orbit_angle: 340.0,
    },
    PlanetRow {
        name: "Neptune",
        texture: "assets/neptune.jpg",
        orbit_radius: 14.0,
        orbital_period_days: 59800.0,
        rotation_period_hours: 16.11,
        axial_tilt: 28.32,
        size: 0.27,
        initial_orbit_angle: 80.0,
    },
];

// Tidally locked: one spin per orbit.
const MOON_PERIOD_DAYS: f64 = 27.3;

/// Resolve the starfield cube map.
pub fn skybox(textures: &mut impl TextureSource) -> TextureHandle {
    textures.cubemap(&SKYBOX_FACES)
}

/// Build the solar system, resolving every texture through `textures`.
pub fn solar_system(textures: &mut impl TextureSource) -> Result<SolarSystem, BodyError> {
    solar_system_with_spin(textures, SUN_SPIN_DEG_PER_SEC)
}

/// As [`solar_system`], with a configurable Sun spin rate.
pub fn solar_system_with_spin(
    textures: &mut impl TextureSource,
    sun_spin_deg_per_sec: f64,
) -> Result<SolarSystem, BodyError> {
    let sun = Star::new(
        "Sun",
        1.4,
        sun_spin_deg_per_sec,
        textures.texture("assets/sun.jpg"),
    )?;

    let mut planets = Vec::with_capacity(PLANETS.len());
    for row in &PLANETS {
        let body = CelestialBody::new(BodyDesc {
            name: row.name,
            orbit_radius: row.orbit_radius,
            orbital_period_days: row.orbital_period_days,
            rotation_period_hours: row.rotation_period_hours,
            axial_tilt: row.axial_tilt,
            size: row.size,
            initial_orbit_angle: row.initial_orbit_angle,
            texture: textures.texture(row.texture),
        })?;
        let mut planet = Planet::new(body);

        match row.name {
            "Earth" => {
                let moon = CelestialBody::new(BodyDesc {
                    name: "Moon",
                    orbit_radius: 0.3,
                    orbital_period_days: MOON_PERIOD_DAYS,
                    rotation_period_hours: MOON_PERIOD_DAYS * 24.0,
                    axial_tilt: 0.0,
                    size: 0.05,
                    initial_orbit_angle: 0.0,
                    texture: textures.texture("assets/moon.jpg"),
                })?;
                planet = planet.with_moon(moon);
            }
            "Saturn" => {
                let ring = Ring::new(
                    row.name,
                    0.85,
                    1.1,
                    26.7,
                    2.0,
                    textures.texture("assets/saturn_ring.png"),
                )?;
                planet = planet.with_ring(ring);
            }
            _ => {}
        }

        planets.push(planet);
    }

    debug!("Built solar system with {} planets", planets.len());
    Ok(SolarSystem::new(sun, planets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::orbit_speed_from_period_days;

    /// Hands out sequential handles and records each request.
    #[derive(Default)]
    struct CountingTextures {
        requested: Vec<String>,
    }

    impl TextureSource for CountingTextures {
        fn texture(&mut self, asset: &str) -> TextureHandle {
            self.requested.push(asset.to_string());
            TextureHandle(self.requested.len() as u32)
        }

        fn cubemap(&mut self, faces: &[&str; 6]) -> TextureHandle {
            self.texture(faces[0])
        }
    }

    struct NoTextures;

    impl TextureSource for NoTextures {
        fn texture(&mut self, _asset: &str) -> TextureHandle {
            TextureHandle::MISSING
        }

        fn cubemap(&mut self, _faces: &[&str; 6]) -> TextureHandle {
            TextureHandle::MISSING
        }
    }

    #[test]
    fn test_eight_planets_in_order() {
        let system = solar_system(&mut CountingTextures::default()).unwrap();
        let names: Vec<&str> = system.planets.iter().map(Planet::name).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
    }

    #[test]
    fn test_only_earth_has_moon_and_only_saturn_has_ring() {
        let system = solar_system(&mut CountingTextures::default()).unwrap();
        for planet in &system.planets {
            assert_eq!(planet.moons.len(), usize::from(planet.name() == "Earth"));
            assert_eq!(planet.ring.is_some(), planet.name() == "Saturn");
        }
    }

    #[test]
    fn test_retrograde_rotations() {
        let system = solar_system(&mut CountingTextures::default()).unwrap();
        let venus = &system.planets[1].body;
        let uranus = &system.planets[6].body;
        assert!(venus.rotation_angular_speed < 0.0);
        assert!(uranus.rotation_angular_speed < 0.0);
        assert!(system.planets[2].body.rotation_angular_speed > 0.0);
    }

    #[test]
    fn test_moon_is_tidally_locked() {
        let system = solar_system(&mut CountingTextures::default()).unwrap();
        let moon = &system.planets[2].moons[0];
        assert!((moon.orbit_angular_speed - moon.rotation_angular_speed).abs() < 1e-15);
        assert!(
            (moon.orbit_angular_speed - orbit_speed_from_period_days(MOON_PERIOD_DAYS)).abs()
                < 1e-15
        );
    }

    #[test]
    fn test_initial_angles() {
        let system = solar_system(&mut CountingTextures::default()).unwrap();
        let angles: Vec<f64> = system.planets.iter().map(|p| p.body.orbit_angle).collect();
        assert_eq!(angles, [0.0, 60.0, 120.0, 200.0, 20.0, 300.0, 340.0, 80.0]);
    }

    #[test]
    fn test_every_texture_requested_once() {
        let mut textures = CountingTextures::default();
        let system = solar_system(&mut textures).unwrap();
        // Sun, eight planets, the Moon and Saturn's ring.
        assert_eq!(textures.requested.len(), 11);
        assert_eq!(system.star.texture, TextureHandle(1));
        assert!(textures.requested.contains(&"assets/saturn_ring.png".to_string()));
    }

    #[test]
    fn test_missing_textures_still_build() {
        let system = solar_system(&mut NoTextures).unwrap();
        assert!(system.star.texture.is_missing());
        assert!(system.planets.iter().all(|p| p.body.texture.is_missing()));
    }

    #[test]
    fn test_skybox_uses_cubemap_faces() {
        let mut textures = CountingTextures::default();
        let handle = skybox(&mut textures);
        assert_eq!(handle, TextureHandle(1));
        assert_eq!(textures.requested, ["assets/skybox/starfield_rt.tga"]);
    }

    #[test]
    fn test_invalid_spin_rate_rejected() {
        assert!(solar_system_with_spin(&mut NoTextures, f64::INFINITY).is_err());
    }
}
