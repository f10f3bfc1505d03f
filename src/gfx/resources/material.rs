//! Per-object material with color-override support
//!
//! Each scene object owns one material. By default the shader displays the
//! per-vertex colors baked into the mesh; setting an override color makes
//! the material color win, which is how the color-cycle timer and the
//! mark toggle recolor whole objects at once.

use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Diffuse color applied while the cycle timer is in its "red" phase.
pub const CYCLE_RED: [f32; 3] = [0.8, 0.1, 0.1];
/// Diffuse color applied while the cycle timer is in its "blue" phase.
pub const CYCLE_BLUE: [f32; 3] = [0.1, 0.1, 0.8];
/// Diffuse color pinned to the first object while it is marked.
pub const MARK_GREEN: [f32; 3] = [0.1, 0.8, 0.1];

/// GPU uniform data for materials.
///
/// Must match the `Material` struct in `shader.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    /// 1.0 when `base_color` replaces the per-vertex colors.
    pub override_vertex_color: f32,
    _padding: [f32; 3],
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material bind group management (slot 2 in the render pipeline).
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Material Bind Group Layout");

        MaterialBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &Device, ubo: &MaterialUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Material Bind Group"),
        );
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

/// Material state mirrored into a GPU uniform buffer on demand.
pub struct Material {
    base_color: [f32; 4],
    override_vertex_color: bool,
    dirty: bool,

    material_ubo: Option<MaterialUBO>,
    material_bindings: Option<MaterialBindings>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            override_vertex_color: false,
            dirty: true,
            material_ubo: None,
            material_bindings: None,
        }
    }
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the per-vertex colors with a single diffuse color.
    pub fn set_override_color(&mut self, color: [f32; 3]) {
        self.base_color = [color[0], color[1], color[2], 1.0];
        self.override_vertex_color = true;
        self.dirty = true;
    }

    /// Returns to showing the mesh's own per-vertex colors.
    pub fn clear_override(&mut self) {
        self.override_vertex_color = false;
        self.dirty = true;
    }

    pub fn override_color(&self) -> Option<[f32; 3]> {
        self.override_vertex_color.then(|| {
            [
                self.base_color[0],
                self.base_color[1],
                self.base_color[2],
            ]
        })
    }

    /// Syncs material state to the GPU, creating resources on first use.
    pub fn update_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        if self.material_ubo.is_none() {
            self.material_ubo = Some(MaterialUBO::new(device));
        }

        if self.material_bindings.is_none() {
            let mut bindings = MaterialBindings::new(device);
            bindings.create_bind_group(device, self.material_ubo.as_ref().unwrap());
            self.material_bindings = Some(bindings);
        }

        if !self.dirty {
            return;
        }

        let uniform_data = MaterialUniform {
            base_color: self.base_color,
            override_vertex_color: if self.override_vertex_color { 1.0 } else { 0.0 },
            _padding: [0.0; 3],
        };

        if let Some(ubo) = &mut self.material_ubo {
            ubo.update_content(queue, uniform_data);
        }
        self.dirty = false;
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.material_bindings.as_ref().map(|b| b.bind_group())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_round_trip() {
        let mut material = Material::new();
        assert_eq!(material.override_color(), None);

        material.set_override_color(CYCLE_RED);
        assert_eq!(material.override_color(), Some(CYCLE_RED));

        material.clear_override();
        assert_eq!(material.override_color(), None);
    }
}
