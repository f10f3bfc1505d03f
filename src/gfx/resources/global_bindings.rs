//! Global uniform bindings for camera and lighting data
//!
//! Manages the uniform buffer and bind group for per-frame state shared by
//! every object in the scene: the camera matrices and the headlight.

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content.
///
/// Must match the `Globals` struct in `shader.wgsl` exactly, including the
/// padding between the vec3 members.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],

    light_position: [f32; 3],
    _padding: f32,
    light_color: [f32; 3],
    light_intensity: f32,
}

unsafe impl bytemuck::Pod for GlobalUBOContent {}
unsafe impl bytemuck::Zeroable for GlobalUBOContent {}

/// Light color and intensity.
///
/// The light position is not configured here: the viewer runs a headlight,
/// so the position tracks the camera eye every frame.
#[derive(Copy, Clone, Debug)]
pub struct LightConfig {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Uploads camera and headlight data for the current frame.
///
/// The light is placed at the camera eye position so surfaces facing the
/// viewer are always lit.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    light: LightConfig,
) {
    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,

        light_position: [
            camera.view_position[0],
            camera.view_position[1],
            camera.view_position[2],
        ],
        _padding: 0.0,
        light_color: light.color,
        light_intensity: light.intensity,
    };

    ubo.update_content(queue, content);
}

/// Bind group layout and bind group for the global uniforms (slot 0 in the
/// render pipeline).
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Must be called once the uniform buffer exists, before rendering.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Globals Bind Group"),
        );
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet.
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}
