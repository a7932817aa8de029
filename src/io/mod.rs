//! Mesh file export.
//!
//! This module writes a [`GridMesh`] as a triangle mesh in common formats.
//! Each grid cell becomes two triangles; the strip's seam is left open, so
//! the file shows the same surface the grid does.
//!
//! # Supported Formats
//!
//! | Format | Extension | Notes |
//! |--------|-----------|-------|
//! | Wavefront OBJ | `.obj` | Vertices, faces and `(u, v)` texture coordinates |
//! | STL | `.stl` | Binary |
//! | PLY | `.ply` | ASCII |
//!
//! # Usage
//!
//! ```no_run
//! use mobius::io::save;
//! use mobius::strip::MobiusStrip;
//!
//! let strip = MobiusStrip::new(1.0, 0.5, 30).unwrap();
//! save(strip.mesh(), "mobius.stl").unwrap();
//! ```

pub mod obj;
pub mod ply;
pub mod stl;

use std::path::Path;

use crate::error::{MobiusError, Result};
use crate::mesh::GridMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
    /// STL (stereolithography) format.
    Stl,
    /// PLY (Stanford polygon) format.
    Ply,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            "stl" => Some(Format::Stl),
            "ply" => Some(Format::Ply),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

/// Save a mesh with the format chosen by the file extension.
pub fn save<P: AsRef<Path>>(mesh: &GridMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| MobiusError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    tracing::debug!(path = %path.display(), ?format, "saving mesh");
    match format {
        Format::Obj => obj::save(mesh, path),
        Format::Stl => stl::save(mesh, path),
        Format::Ply => ply::save(mesh, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::StripParams;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("a.obj"), Some(Format::Obj));
        assert_eq!(Format::from_path("a.STL"), Some(Format::Stl));
        assert_eq!(Format::from_path("dir/a.ply"), Some(Format::Ply));
        assert_eq!(Format::from_path("a.glb"), None);
        assert_eq!(Format::from_path("noext"), None);
    }

    #[test]
    fn test_save_unknown_extension() {
        let mesh = GridMesh::sample(&StripParams::new(1.0, 0.5), 4).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = save(&mesh, dir.path().join("strip.xyz")).unwrap_err();
        assert!(matches!(err, MobiusError::UnsupportedFormat { ref extension } if extension == "xyz"));
    }

    #[test]
    fn test_save_dispatches_by_extension() {
        let mesh = GridMesh::sample(&StripParams::new(1.0, 0.5), 5).unwrap();
        let dir = tempfile::tempdir().unwrap();
        for name in ["strip.obj", "strip.stl", "strip.ply"] {
            let path = dir.path().join(name);
            save(&mesh, &path).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0, "{name} is empty");
        }
    }
}
