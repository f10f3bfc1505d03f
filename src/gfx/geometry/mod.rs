//! Procedural geometry generation
//!
//! Indexed primitive shapes (cone, capsule) generated without external
//! model files, with a conversion step into the flat per-vertex buffers
//! the rest of the viewer renders.

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::object::MeshData;

/// Indexed geometry with analytic per-vertex normals.
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Expands the indexed geometry into flat per-vertex buffers.
    ///
    /// Unlike file-loaded meshes, primitives keep their analytic normals
    /// through the expansion, so curved surfaces stay smooth.
    pub fn to_mesh_data(&self, color: [f32; 3]) -> MeshData {
        let mut data = MeshData {
            positions: Vec::with_capacity(self.indices.len()),
            colors: Vec::with_capacity(self.indices.len()),
            normals: Vec::with_capacity(self.indices.len()),
        };

        for &index in &self.indices {
            let i = index as usize;
            data.positions.push(self.vertices[i]);
            data.colors.push(color);
            data.normals.push(self.normals[i]);
        }

        data
    }
}
