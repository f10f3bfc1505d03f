//! 3MF loading via the `threemf` crate

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ::threemf::model::Model;

use crate::gfx::scene::object::MeshData;

use super::{ImportError, DEFAULT_MESH_COLOR};

/// Loads every mesh object from a 3MF package.
///
/// A package may hold several model parts and each part several object
/// resources; every object that carries mesh data becomes its own buffer
/// set. Non-mesh resources (components, build items) are skipped.
pub fn load(path: &Path) -> Result<Vec<MeshData>, ImportError> {
    let reader = BufReader::new(File::open(path)?);
    let models = ::threemf::read(reader)?;

    if models.is_empty() {
        return Err(ImportError::EmptyModel);
    }

    Ok(meshes_from_models(&models))
}

fn meshes_from_models(models: &[Model]) -> Vec<MeshData> {
    let mut meshes = Vec::new();

    for model in models {
        for object in &model.resources.object {
            let Some(mesh) = &object.mesh else {
                log::debug!("3mf: skipping non-mesh object resource {}", object.id);
                continue;
            };

            let positions: Vec<[f32; 3]> = mesh
                .vertices
                .vertex
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect();

            let triangles: Vec<[u32; 3]> = mesh
                .triangles
                .triangle
                .iter()
                .map(|t| [t.v1 as u32, t.v2 as u32, t.v3 as u32])
                .collect();

            log::debug!(
                "3mf: object {} has {} vertices, {} triangles",
                object.id,
                positions.len(),
                triangles.len()
            );

            meshes.push(MeshData::from_indexed(
                &positions,
                &triangles,
                DEFAULT_MESH_COLOR,
            ));
        }
    }

    meshes
}
