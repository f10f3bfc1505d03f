//! Scene management
//!
//! The scene is a flat list of drawable objects plus the camera and the
//! color-cycle state the viewer's timer advances.

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, MeshData, Mesh, Object};
pub use scene::{CyclePhase, Scene};
pub use vertex::Vertex3D;
