//! The ordered draw list handed to the renderer each frame.
//!
//! Items are emitted pass by pass: skybox, star, orbit paths, bodies, rings.
//! The skybox never writes depth so it cannot occlude anything; opaque bodies
//! resolve depth before the alpha-blended ring pass, which tests depth but
//! does not write it.

use glam::Mat4;
use orrery_sim::TextureHandle;

/// Which GPU mesh an item draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshId {
    /// Background cube.
    Skybox,
    /// Unit sphere shared by the star, planets and moons.
    Sphere,
    /// Line strip for the orbit of the planet at this index.
    OrbitPath(usize),
    /// Ring annulus of the planet at this index.
    Ring(usize),
}

/// Render passes in submission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderPass {
    Skybox,
    Star,
    OrbitPaths,
    Bodies,
    Rings,
}

/// Color blending for a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Overwrite the target.
    Opaque,
    /// `src_alpha, one_minus_src_alpha`.
    Alpha,
}

/// Fixed-function state the renderer sets before drawing an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderState {
    pub depth_test: bool,
    pub depth_write: bool,
    pub blend: BlendMode,
    pub cull_back_faces: bool,
}

impl RenderPass {
    /// The render state every item in this pass uses.
    #[must_use]
    pub fn render_state(self) -> RenderState {
        match self {
            RenderPass::Skybox => RenderState {
                depth_test: true,
                depth_write: false,
                blend: BlendMode::Opaque,
                cull_back_faces: false,
            },
            RenderPass::Star | RenderPass::OrbitPaths | RenderPass::Bodies => RenderState {
                depth_test: true,
                depth_write: true,
                blend: BlendMode::Opaque,
                cull_back_faces: true,
            },
            RenderPass::Rings => RenderState {
                depth_test: true,
                depth_write: false,
                blend: BlendMode::Alpha,
                cull_back_faces: false,
            },
        }
    }
}

/// One draw for the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshId,
    /// World transform.
    pub model: Mat4,
    pub texture: TextureHandle,
    pub pass: RenderPass,
    pub state: RenderState,
    /// Name of the body (or "Skybox") this item draws, for labels and logs.
    pub name: String,
}

impl DrawItem {
    /// Build an item whose render state follows from its pass.
    #[must_use]
    pub fn new(
        mesh: MeshId,
        model: Mat4,
        texture: TextureHandle,
        pass: RenderPass,
        name: impl Into<String>,
    ) -> Self {
        Self {
            mesh,
            model,
            texture,
            pass,
            state: pass.render_state(),
            name: name.into(),
        }
    }
}

/// Draw items in submission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append an item. Items must arrive in pass order.
    pub fn push(&mut self, item: DrawItem) {
        debug_assert!(
            self.items.last().is_none_or(|last| last.pass <= item.pass),
            "{:?} pushed after {:?}",
            item.pass,
            self.items.last().map(|last| last.pass)
        );
        self.items.push(item);
    }

    #[must_use]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items belonging to `pass`.
    pub fn pass(&self, pass: RenderPass) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |item| item.pass == pass)
    }

    /// Whether passes never go backwards through the list.
    #[must_use]
    pub fn is_pass_ordered(&self) -> bool {
        self.items.windows(2).all(|w| w[0].pass <= w[1].pass)
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawItem;
    type IntoIter = std::slice::Iter<'a, DrawItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
