//! GPU-ready uniform layouts for a composed frame.

use bytemuck::{Pod, Zeroable};

use crate::composer::FrameScene;
use crate::draw_list::{BlendMode, DrawItem};

/// Per-frame uniform: camera matrices and lighting.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Translation-free view for the skybox.
    pub skybox_view: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub ambient: f32,
    pub light_position: [f32; 3],
    pub _padding: f32,
}

impl From<&FrameScene> for FrameUniform {
    fn from(scene: &FrameScene) -> Self {
        Self {
            view: scene.view.to_cols_array_2d(),
            projection: scene.projection.to_cols_array_2d(),
            skybox_view: scene.skybox_view.to_cols_array_2d(),
            eye: scene.eye.to_array(),
            ambient: scene.ambient,
            light_position: scene.light_position.to_array(),
            _padding: 0.0,
        }
    }
}

/// Per-draw uniform.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Opaque texture handle; 0 means missing.
    pub texture: u32,
    /// 1 when alpha blended.
    pub blended: u32,
    pub _padding: [u32; 2],
}

impl From<&DrawItem> for ObjectUniform {
    fn from(item: &DrawItem) -> Self {
        Self {
            model: item.model.to_cols_array_2d(),
            texture: item.texture.0,
            blended: u32::from(item.state.blend == BlendMode::Alpha),
            _padding: [0; 2],
        }
    }
}

impl FrameScene {
    /// One [`ObjectUniform`] per draw item, in draw order.
    #[must_use]
    pub fn object_uniforms(&self) -> Vec<ObjectUniform> {
        self.draw_list.iter().map(ObjectUniform::from).collect()
    }

    /// Bytes the renderer uploads for this frame: the frame uniform followed
    /// by every object uniform.
    #[must_use]
    pub fn upload_size(&self) -> usize {
        let frame = FrameUniform::from(self);
        bytemuck::bytes_of(&frame).len()
            + bytemuck::cast_slice::<ObjectUniform, u8>(&self.object_uniforms()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_list::{MeshId, RenderPass};
    use glam::Mat4;
    use orrery_sim::TextureHandle;

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 80);
        assert_eq!(std::mem::size_of::<FrameUniform>(), 224);
        assert_eq!(std::mem::size_of::<FrameUniform>() % 16, 0);
    }

    #[test]
    fn test_object_uniform_from_ring_item() {
        let model = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let item = DrawItem::new(MeshId::Ring(5), model, TextureHandle(7), RenderPass::Rings, "Saturn");
        let uniform = ObjectUniform::from(&item);
        assert_eq!(uniform.texture, 7);
        assert_eq!(uniform.blended, 1);
        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 80);
    }

    #[test]
    fn test_frame_uniforms_follow_draw_order() {
        let mut list = crate::draw_list::DrawList::default();
        list.push(DrawItem::new(
            MeshId::Skybox,
            Mat4::IDENTITY,
            TextureHandle(1),
            RenderPass::Skybox,
            "Skybox",
        ));
        list.push(DrawItem::new(
            MeshId::Ring(5),
            Mat4::from_scale(glam::Vec3::splat(0.84)),
            TextureHandle(9),
            RenderPass::Rings,
            "Saturn",
        ));
        let scene = FrameScene {
            draw_list: list,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            skybox_view: Mat4::IDENTITY,
            eye: glam::Vec3::new(0.0, 1.0, 12.0),
            light_position: glam::Vec3::ZERO,
            ambient: 0.1,
            target: glam::Vec3::ZERO,
        };

        let objects = scene.object_uniforms();
        assert_eq!(objects.len(), 2);
        assert_eq!((objects[0].texture, objects[0].blended), (1, 0));
        assert_eq!((objects[1].texture, objects[1].blended), (9, 1));
        assert_eq!(scene.upload_size(), 224 + 2 * 80);

        let frame = FrameUniform::from(&scene);
        assert_eq!(frame.eye, [0.0, 1.0, 12.0]);
        assert_eq!(frame.ambient, 0.1);
    }
}
