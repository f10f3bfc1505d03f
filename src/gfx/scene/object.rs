use wgpu::Device;

use crate::gfx::resources::material::Material;

use super::vertex::Vertex3D;

/// CPU-side mesh data as three parallel per-vertex arrays.
///
/// Triangle `i` contributes vertices `3i..3i+2`; there is no index buffer.
/// The arrays must stay the same length, which `from_indexed` guarantees
/// and `is_consistent` checks.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
}

impl MeshData {
    /// Expands an indexed triangle list into flat per-vertex arrays.
    ///
    /// Every triangle is unrolled into three duplicated vertices carrying
    /// the triangle's face normal and the given solid color. Shared-vertex
    /// indexing from the source mesh is discarded. Triangles referencing
    /// out-of-range indices are skipped.
    pub fn from_indexed(
        positions: &[[f32; 3]],
        triangles: &[[u32; 3]],
        color: [f32; 3],
    ) -> Self {
        let mut data = MeshData {
            positions: Vec::with_capacity(triangles.len() * 3),
            colors: Vec::with_capacity(triangles.len() * 3),
            normals: Vec::with_capacity(triangles.len() * 3),
        };

        for triangle in triangles {
            let Some(corners) = fetch_corners(positions, triangle) else {
                log::warn!("skipping triangle with out-of-range vertex index {:?}", triangle);
                continue;
            };

            let normal = face_normal(corners[0], corners[1], corners[2]);
            for corner in corners {
                data.positions.push(corner);
                data.colors.push(color);
                data.normals.push(normal);
            }
        }

        data
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// True when the three arrays agree in length and hold whole triangles.
    pub fn is_consistent(&self) -> bool {
        self.positions.len() == self.colors.len()
            && self.positions.len() == self.normals.len()
            && self.positions.len() % 3 == 0
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn fetch_corners(positions: &[[f32; 3]], triangle: &[u32; 3]) -> Option<[[f32; 3]; 3]> {
    Some([
        *positions.get(triangle[0] as usize)?,
        *positions.get(triangle[1] as usize)?,
        *positions.get(triangle[2] as usize)?,
    ])
}

/// Unit face normal of a triangle, zero for degenerate triangles.
pub fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let edge1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let edge2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];

    let normal = [
        edge1[1] * edge2[2] - edge1[2] * edge2[1],
        edge1[2] * edge2[0] - edge1[0] * edge2[2],
        edge1[0] * edge2[1] - edge1[1] * edge2[0],
    ];

    let length = (normal[0].powi(2) + normal[1].powi(2) + normal[2].powi(2)).sqrt();
    if length > 0.0 {
        [normal[0] / length, normal[1] / length, normal[2] / length]
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Interleaved vertex data with its optional GPU buffer.
///
/// Meshes are drawn as plain triangle lists; the index buffers provided by
/// the file readers were already discarded during expansion.
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
}

impl Mesh {
    pub fn new(data: MeshData) -> Self {
        debug_assert!(data.is_consistent());

        let vertices: Vec<Vertex3D> = (0..data.vertex_count())
            .map(|i| Vertex3D {
                position: data.positions[i],
                color: data.colors[i],
                normal: data.normals[i],
            })
            .collect();

        let vertex_count = vertices.len() as u32;

        Self {
            vertices,
            vertex_buffer: None,
            vertex_count,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn triangle_count(&self) -> u32 {
        self.vertex_count / 3
    }
}

use cgmath::{Matrix4, Vector3};

/// Per-object uniform buffers and bind groups.
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A named drawable: one mesh, a transform, and a material.
pub struct Object {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Matrix4<f32>,
    pub material: Material,
    pub visible: bool,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        use cgmath::SquareMatrix;
        Self {
            name: name.into(),
            mesh,
            transform: Matrix4::identity(),
            material: Material::new(),
            visible: true,
            gpu_resources: None,
        }
    }

    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform = Matrix4::from_translation(translation);
    }

    /// Update the transformation matrix and sync to GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            // cgmath matrices are column-major, which is what the GPU expects
            let transform_data: &[f32; 16] = self.transform.as_ref();

            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        self.mesh.vertex_buffer = Some(vertex_buffer);

        let transform_data: &[f32; 16] = self.transform.as_ref();

        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }

    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }
}

use std::ops::Range;

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.draw(0..mesh.vertex_count, instances);
    }

    fn draw_object(&mut self, object: &'b Object) {
        self.draw_mesh(&object.mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

    #[test]
    fn expansion_duplicates_each_corner() {
        let quad_positions = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        let triangles = [[0, 1, 2], [0, 2, 3]];

        let data = MeshData::from_indexed(&quad_positions, &triangles, [0.5, 0.5, 0.5]);

        assert!(data.is_consistent());
        assert_eq!(data.vertex_count(), 6);
        assert_eq!(data.triangle_count(), 2);
        assert_eq!(data.positions[3], quad_positions[0]);
        assert_eq!(data.positions[4], quad_positions[2]);
        assert!(data.colors.iter().all(|c| *c == [0.5, 0.5, 0.5]));
    }

    #[test]
    fn face_normal_is_shared_by_all_three_vertices() {
        let data = MeshData::from_indexed(&TRIANGLE, &[[0, 1, 2]], [1.0, 1.0, 1.0]);

        // Counter-clockwise triangle in the XY plane faces +Z.
        for normal in &data.normals {
            assert!((normal[0]).abs() < 1.0e-6);
            assert!((normal[1]).abs() < 1.0e-6);
            assert!((normal[2] - 1.0).abs() < 1.0e-6);
        }
    }

    #[test]
    fn degenerate_triangle_gets_zero_normal() {
        let normal = face_normal([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]);
        assert_eq!(normal, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn out_of_range_indices_are_skipped() {
        let data = MeshData::from_indexed(&TRIANGLE, &[[0, 1, 9]], [1.0, 1.0, 1.0]);
        assert!(data.is_empty());
        assert!(data.is_consistent());
    }

    #[test]
    fn mesh_interleaves_parallel_arrays() {
        let data = MeshData::from_indexed(&TRIANGLE, &[[0, 1, 2]], [0.2, 0.4, 0.6]);
        let mesh = Mesh::new(data);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices[1].color, [0.2, 0.4, 0.6]);
    }
}
