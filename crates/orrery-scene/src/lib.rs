//! Scene composition: turns the simulated solar system and the camera into
//! an ordered draw list with per-item transforms and render state.

pub mod composer;
pub mod draw_list;
pub mod focus;
pub mod mesh;
pub mod transform;
pub mod uniform;

pub use composer::{AMBIENT_STRENGTH, FrameScene, Projection, SceneComposer};
pub use draw_list::{BlendMode, DrawItem, DrawList, MeshId, RenderPass, RenderState};
pub use focus::{FocusSelection, STAR_FOCUS_LABEL, focus_from_row, focus_names, row_from_focus};
pub use mesh::{
    Mesh, MeshVertex, OrbitPath, RING_SEGMENTS, RingMesh, SPHERE_SECTORS, SPHERE_STACKS, orbit_line, ring,
    sphere,
};
pub use transform::{POLES_UP_DEG, body_model, ring_model, skybox_view};
pub use uniform::{FrameUniform, ObjectUniform};
