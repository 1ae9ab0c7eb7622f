//! CPU-side geometry for the meshes the scene references: the unit sphere,
//! the ring annulus, and orbit line strips.
//!
//! The renderer uploads these once at startup and binds them by [`MeshId`].

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use orrery_sim::Ring;

use crate::draw_list::MeshId;

/// Longitude and latitude subdivisions of the body sphere.
pub const SPHERE_SECTORS: u32 = 64;
pub const SPHERE_STACKS: u32 = 64;

/// Angular subdivisions of the ring annulus.
pub const RING_SEGMENTS: u32 = 256;

/// Interleaved vertex layout shared by the sphere and ring meshes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// UV sphere with its poles on the Z axis. Bodies are rotated -90° about X
/// so the poles point up.
#[must_use]
pub fn sphere(radius: f32, sectors: u32, stacks: u32) -> Mesh {
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    let sectors = sectors.max(3);
    let stacks = stacks.max(2);
    let mut mesh = Mesh {
        vertices: Vec::with_capacity(((sectors + 1) * (stacks + 1)) as usize),
        indices: Vec::with_capacity((sectors * stacks * 6) as usize),
    };

    for i in 0..=stacks {
        let stack_angle = -FRAC_PI_2 + i as f32 * PI / stacks as f32;
        let xy = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();
        for j in 0..=sectors {
            let sector_angle = j as f32 * TAU / sectors as f32;
            let position = Vec3::new(xy * sector_angle.cos(), xy * sector_angle.sin(), z);
            mesh.vertices.push(MeshVertex {
                position: position.to_array(),
                normal: position.normalize_or_zero().to_array(),
                uv: [j as f32 / sectors as f32, i as f32 / stacks as f32],
            });
        }
    }

    for i in 0..stacks {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;
        for _ in 0..sectors {
            // The first and last stacks collapse to a point: one triangle each.
            if i != 0 {
                mesh.indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stacks - 1 {
                mesh.indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }
    mesh
}

/// Flat annulus in the XZ plane between `inner` and `outer` radii, facing +Y.
/// `v` runs from 0 at the outer edge to 1 at the inner edge.
#[must_use]
pub fn ring(inner: f32, outer: f32, segments: u32) -> Mesh {
    use std::f32::consts::TAU;

    let segments = segments.max(3);
    let mut mesh = Mesh {
        vertices: Vec::with_capacity(((segments + 1) * 2) as usize),
        indices: Vec::with_capacity((segments * 6) as usize),
    };

    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (z, x) = (u * TAU).sin_cos();
        for (radius, v) in [(outer, 0.0), (inner, 1.0)] {
            mesh.vertices.push(MeshVertex {
                position: [radius * x, 0.0, radius * z],
                normal: [0.0, 1.0, 0.0],
                uv: [u, v],
            });
        }
    }

    for i in (0..segments * 2).step_by(2) {
        mesh.indices
            .extend_from_slice(&[i, i + 1, i + 2, i + 1, i + 3, i + 2]);
    }
    mesh
}

/// Closed circle of `radius` in the XZ plane as a line strip of
/// `segments + 1` points (the last repeats the first).
#[must_use]
pub fn orbit_line(radius: f32, segments: u32) -> Vec<Vec3> {
    use std::f32::consts::TAU;

    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * TAU;
            Vec3::new(theta.cos() * radius, 0.0, theta.sin() * radius)
        })
        .collect()
}

/// An orbit line for one planet, built once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitPath {
    /// Index of the planet this path belongs to.
    pub planet: usize,
    pub radius: f32,
    pub points: Vec<Vec3>,
}

impl OrbitPath {
    #[must_use]
    pub fn new(planet: usize, radius: f32, segments: u32) -> Self {
        Self {
            planet,
            radius,
            points: orbit_line(radius, segments),
        }
    }

    #[must_use]
    pub fn mesh_id(&self) -> MeshId {
        MeshId::OrbitPath(self.planet)
    }
}

/// Annulus geometry for one planet's ring, built once from its descriptor.
///
/// The radii are fractions of the unit ring; the draw item's model matrix
/// scales by planet size times the ring scale.
#[derive(Clone, Debug, PartialEq)]
pub struct RingMesh {
    /// Index of the planet this ring belongs to.
    pub planet: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub mesh: Mesh,
}

impl RingMesh {
    #[must_use]
    pub fn new(planet: usize, ring: &Ring, segments: u32) -> Self {
        Self {
            planet,
            inner_radius: ring.inner_radius,
            outer_radius: ring.outer_radius,
            mesh: self::ring(ring.inner_radius, ring.outer_radius, segments),
        }
    }

    #[must_use]
    pub fn mesh_id(&self) -> MeshId {
        MeshId::Ring(self.planet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertices_on_radius() {
        let mesh = sphere(2.0, 16, 8);
        assert_eq!(mesh.vertices.len(), 17 * 9);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_index_count() {
        let (sectors, stacks) = (16, 8);
        let mesh = sphere(1.0, sectors, stacks);
        // Two triangles per quad, minus one per sector at each pole.
        let expected = (sectors * stacks * 2 - sectors * 2) as usize;
        assert_eq!(mesh.triangle_count(), expected);
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn test_sphere_poles_on_z_axis() {
        let mesh = sphere(1.0, 8, 4);
        let south = Vec3::from(mesh.vertices[0].position);
        let north = Vec3::from(mesh.vertices.last().unwrap().position);
        assert!((south - Vec3::NEG_Z).length() < 1e-5);
        assert!((north - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_ring_radii() {
        let mesh = ring(0.85, 1.1, 32);
        assert_eq!(mesh.vertices.len(), 33 * 2);
        assert_eq!(mesh.triangle_count(), 64);
        for pair in mesh.vertices.chunks(2) {
            let outer = Vec3::from(pair[0].position).length();
            let inner = Vec3::from(pair[1].position).length();
            assert!((outer - 1.1).abs() < 1e-5);
            assert!((inner - 0.85).abs() < 1e-5);
        }
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn test_orbit_line_is_closed() {
        let points = orbit_line(4.0, 128);
        assert_eq!(points.len(), 129);
        assert!((points[0] - points[128]).length() < 1e-4);
        assert!(points.iter().all(|p| p.y == 0.0));
        assert!(points.iter().all(|p| (p.length() - 4.0).abs() < 1e-4));
    }

    #[test]
    fn test_vertex_is_pod() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        let v = MeshVertex::zeroed();
        assert_eq!(bytemuck::bytes_of(&v).len(), 32);
    }
}
