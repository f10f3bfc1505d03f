//! STL loading via `stl_io`

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::gfx::scene::object::MeshData;

use super::{ImportError, DEFAULT_MESH_COLOR};

/// Loads an STL file as a single mesh buffer set.
pub fn load(path: &Path) -> Result<Vec<MeshData>, ImportError> {
    let mut reader = BufReader::new(File::open(path)?);
    read_from(&mut reader)
}

/// Decodes STL data (binary or ASCII) from any seekable reader.
///
/// The indexed mesh `stl_io` produces is expanded into flat buffers; its
/// index structure and stored facet normals are discarded in favor of
/// face normals computed from the vertex positions.
pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Vec<MeshData>, ImportError> {
    let indexed = stl_io::read_stl(reader)?;

    if let Err(err) = indexed.validate() {
        log::warn!("stl reader reported an inconsistency: {}", err);
    }

    let positions: Vec<[f32; 3]> = indexed
        .vertices
        .iter()
        .map(|v| [v[0], v[1], v[2]])
        .collect();

    let triangles: Vec<[u32; 3]> = indexed
        .faces
        .iter()
        .map(|face| {
            [
                face.vertices[0] as u32,
                face.vertices[1] as u32,
                face.vertices[2] as u32,
            ]
        })
        .collect();

    log::debug!(
        "stl: {} vertices, {} triangles",
        positions.len(),
        triangles.len()
    );

    Ok(vec![MeshData::from_indexed(
        &positions,
        &triangles,
        DEFAULT_MESH_COLOR,
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use stl_io::{Normal, Triangle, Vertex};

    fn tetra_triangles() -> Vec<Triangle> {
        let a = Vertex::new([0.0, 0.0, 0.0]);
        let b = Vertex::new([1.0, 0.0, 0.0]);
        let c = Vertex::new([0.0, 1.0, 0.0]);
        let d = Vertex::new([0.0, 0.0, 1.0]);
        let normal = Normal::new([0.0, 0.0, 1.0]);

        vec![
            Triangle {
                normal,
                vertices: [a, b, c],
            },
            Triangle {
                normal,
                vertices: [a, b, d],
            },
            Triangle {
                normal,
                vertices: [a, c, d],
            },
            Triangle {
                normal,
                vertices: [b, c, d],
            },
        ]
    }

    #[test]
    fn round_trip_through_stl_io() {
        let mut buffer = Cursor::new(Vec::new());
        stl_io::write_stl(&mut buffer, tetra_triangles().into_iter()).unwrap();
        buffer.set_position(0);

        let meshes = read_from(&mut buffer).unwrap();
        assert_eq!(meshes.len(), 1);

        let data = &meshes[0];
        assert!(data.is_consistent());
        // Four triangles, each expanded to three duplicated vertices.
        assert_eq!(data.triangle_count(), 4);
        assert_eq!(data.vertex_count(), 12);
        assert!(data.colors.iter().all(|c| *c == DEFAULT_MESH_COLOR));
    }

    #[test]
    fn truncated_input_is_an_error() {
        let mut buffer = Cursor::new(vec![0u8; 10]);
        assert!(read_from(&mut buffer).is_err());
    }
}
