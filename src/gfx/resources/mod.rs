//! GPU resource management
//!
//! Uniform buffers and bind groups shared across the frame, per-object
//! material resources, and texture helpers.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

pub use global_bindings::{GlobalBindings, GlobalUBO, LightConfig};
pub use material::Material;
pub use texture_resource::TextureResource;
