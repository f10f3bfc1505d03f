//! Mesh-format import
//!
//! File parsing is fully delegated: `stl_io` reads STL and the `threemf`
//! crate reads 3MF packages. This module only dispatches on the file
//! extension and copies the decoded geometry into the viewer's flat
//! per-vertex buffers, expanding indexed triangles along the way.

pub mod stl;
pub mod threemf;

use std::ffi::OsStr;
use std::path::Path;

use thiserror::Error;

use crate::gfx::scene::object::MeshData;

/// Per-vertex color given to file-loaded meshes.
pub const DEFAULT_MESH_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unknown input file extension: .{extension}")]
    UnsupportedExtension { extension: String },

    #[error("file contains no model data")]
    EmptyModel,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("3mf reader: {0}")]
    ThreeMf(#[from] ::threemf::Error),
}

/// Loads every mesh object from an STL or 3MF file.
///
/// The reader is picked by the lowercase file extension; anything other
/// than `.stl` or `.3mf` is rejected.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<MeshData>, ImportError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "stl" => stl::load(path),
        "3mf" => threemf::load(path),
        other => Err(ImportError::UnsupportedExtension {
            extension: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load("model.step").unwrap_err();
        assert!(matches!(
            err,
            ImportError::UnsupportedExtension { ref extension } if extension == "step"
        ));
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(matches!(
            load("model").unwrap_err(),
            ImportError::UnsupportedExtension { .. }
        ));
    }

    #[test]
    fn extension_dispatch_ignores_case() {
        // The file does not exist, so reaching an Io error proves the
        // uppercase extension was routed to the STL reader.
        assert!(matches!(
            load("NO_SUCH_FILE.STL").unwrap_err(),
            ImportError::Io(_)
        ));
    }
}
