//! Per-frame scene composition: simulated state in, ordered draw list out.

use glam::{Mat4, Vec3};
use orrery_camera::CameraController;
use orrery_config::{Config, WindowConfig};
use orrery_sim::{Planet, SolarSystem, TextureHandle};
use tracing::debug;

use crate::draw_list::{DrawItem, DrawList, MeshId, RenderPass};
use crate::focus::FocusSelection;
use crate::mesh::{
    Mesh, OrbitPath, RING_SEGMENTS, RingMesh, SPHERE_SECTORS, SPHERE_STACKS, sphere,
};
use crate::transform::{body_model, ring_model, skybox_view};

/// Ambient term for lit bodies.
pub const AMBIENT_STRENGTH: f32 = 0.10;

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fov_y_deg: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_deg.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }
}

impl From<&WindowConfig> for Projection {
    fn from(window: &WindowConfig) -> Self {
        Self {
            fov_y_deg: window.fov_y_deg,
            aspect_ratio: window.aspect_ratio(),
            near: window.near,
            far: window.far,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameScene {
    pub draw_list: DrawList,
    pub view: Mat4,
    pub projection: Mat4,
    /// `view` without translation, for the skybox.
    pub skybox_view: Mat4,
    pub eye: Vec3,
    /// Point light at the star.
    pub light_position: Vec3,
    pub ambient: f32,
    /// Point the orbit camera is centered on.
    pub target: Vec3,
}

/// Turns the solar system and camera into a [`FrameScene`].
///
/// Static geometry is built once here: the shared body sphere, one orbit path
/// per planet from its orbit radius, and one ring mesh per ringed planet from
/// its ring radii.
#[derive(Clone, Debug)]
pub struct SceneComposer {
    sphere: Mesh,
    orbit_paths: Vec<OrbitPath>,
    ring_meshes: Vec<RingMesh>,
    projection: Projection,
    skybox_texture: TextureHandle,
}

impl SceneComposer {
    #[must_use]
    pub fn new(
        system: &SolarSystem,
        projection: Projection,
        orbit_segments: u32,
        skybox_texture: TextureHandle,
    ) -> Self {
        let orbit_paths = system
            .planets
            .iter()
            .enumerate()
            .map(|(i, planet)| OrbitPath::new(i, planet.body.orbit_radius, orbit_segments))
            .collect();
        let ring_meshes = system
            .planets
            .iter()
            .enumerate()
            .filter_map(|(i, planet)| {
                planet
                    .ring
                    .as_ref()
                    .map(|ring| RingMesh::new(i, ring, RING_SEGMENTS))
            })
            .collect();
        Self {
            sphere: sphere(1.0, SPHERE_SECTORS, SPHERE_STACKS),
            orbit_paths,
            ring_meshes,
            projection,
            skybox_texture,
        }
    }

    #[must_use]
    pub fn from_config(
        system: &SolarSystem,
        config: &Config,
        skybox_texture: TextureHandle,
    ) -> Self {
        Self::new(
            system,
            Projection::from(&config.window),
            config.scene.orbit_segments,
            skybox_texture,
        )
    }

    #[must_use]
    pub fn orbit_paths(&self) -> &[OrbitPath] {
        &self.orbit_paths
    }

    #[must_use]
    pub fn ring_meshes(&self) -> &[RingMesh] {
        &self.ring_meshes
    }

    /// Unit sphere shared by the star, planets and moons.
    #[must_use]
    pub fn sphere(&self) -> &Mesh {
        &self.sphere
    }

    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Replace the projection, e.g. after a config reload.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.projection.aspect_ratio = width as f32 / height.max(1) as f32;
    }

    /// Compose one frame.
    ///
    /// A pending focus selection is consumed first and forces the camera into
    /// orbit mode. The camera is then re-targeted on the focused planet (or
    /// the star when there is no valid focus). `real_seconds` drives the
    /// star's spin. Apart from those two camera/focus updates, this is pure.
    pub fn compose(
        &self,
        system: &SolarSystem,
        camera: &mut CameraController,
        focus: &mut FocusSelection,
        real_seconds: f64,
    ) -> FrameScene {
        if focus.take_pending() && camera.enter_orbit() {
            debug!("Focus selection ended fly mode");
        }

        let target = focus
            .index()
            .and_then(|index| system.planet(index))
            .map_or(Vec3::ZERO, Planet::position);
        camera.set_target(target);

        let view = camera.view_matrix();
        let draw_list = self.build_draw_list(system, real_seconds);

        FrameScene {
            draw_list,
            view,
            projection: self.projection.matrix(),
            skybox_view: skybox_view(view),
            eye: camera.eye(),
            light_position: Vec3::ZERO,
            ambient: AMBIENT_STRENGTH,
            target,
        }
    }

    fn build_draw_list(&self, system: &SolarSystem, real_seconds: f64) -> DrawList {
        let body_count: usize = system.planets.iter().map(|p| 1 + p.moons.len()).sum();
        let ring_count = system.planets.iter().filter(|p| p.ring.is_some()).count();
        let mut list = DrawList::with_capacity(2 + self.orbit_paths.len() + body_count + ring_count);

        // ── Background ──
        list.push(DrawItem::new(
            MeshId::Skybox,
            Mat4::IDENTITY,
            self.skybox_texture,
            RenderPass::Skybox,
            "Skybox",
        ));

        // ── Star ──
        let star = &system.star;
        list.push(DrawItem::new(
            MeshId::Sphere,
            body_model(Vec3::ZERO, 0.0, star.spin_angle(real_seconds), star.size),
            star.texture,
            RenderPass::Star,
            star.name.as_str(),
        ));

        // ── Orbit paths ──
        for path in &self.orbit_paths {
            let name = system
                .planet(path.planet)
                .map_or("", |planet| planet.name());
            list.push(DrawItem::new(
                path.mesh_id(),
                Mat4::IDENTITY,
                TextureHandle::MISSING,
                RenderPass::OrbitPaths,
                name,
            ));
        }

        // ── Planets and moons ──
        for planet in &system.planets {
            let body = &planet.body;
            let position = planet.position();
            list.push(DrawItem::new(
                MeshId::Sphere,
                body_model(position, body.axial_tilt, body.rotation_angle, body.size),
                body.texture,
                RenderPass::Bodies,
                body.name.as_str(),
            ));

            for moon in &planet.moons {
                let moon_position = position + moon.orbital_offset();
                list.push(DrawItem::new(
                    MeshId::Sphere,
                    body_model(moon_position, moon.axial_tilt, moon.rotation_angle, moon.size),
                    moon.texture,
                    RenderPass::Bodies,
                    moon.name.as_str(),
                ));
            }
        }

        // ── Rings ──
        for (i, planet) in system.planets.iter().enumerate() {
            if let Some(ring) = &planet.ring {
                list.push(DrawItem::new(
                    MeshId::Ring(i),
                    ring_model(planet.position(), ring.tilt, planet.body.size * ring.scale),
                    ring.texture,
                    RenderPass::Rings,
                    planet.name(),
                ));
            }
        }

        list
    }
}
