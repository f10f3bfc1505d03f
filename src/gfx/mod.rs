//! Graphics functionality for the viewer
//!
//! - **Camera** ([`camera`]) - Orbit camera driven by mouse input
//! - **Rendering** ([`rendering`]) - wgpu forward renderer
//! - **Scene** ([`scene`]) - Objects, meshes and color-cycle state
//! - **Resources** ([`resources`]) - Uniform buffers, materials, textures
//! - **Geometry** ([`geometry`]) - Procedural cone and capsule primitives

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
