//! STL (stereolithography) export.
//!
//! Writes binary STL, which stores every triangle with its own copy of the
//! vertices and a facet normal.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{MobiusError, Result};
use crate::mesh::GridMesh;

/// Save a mesh to a binary STL file.
///
/// Degenerate triangles (zero area) are written with a zero normal.
///
/// # Example
///
/// ```no_run
/// use mobius::io::stl;
/// use mobius::mesh::GridMesh;
/// use mobius::strip::StripParams;
///
/// let mesh = GridMesh::sample(&StripParams::new(1.0, 0.5), 30).unwrap();
/// stl::save(&mesh, "output.stl").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &GridMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let (vertices, faces) = mesh.triangulate();

    let triangles: Vec<stl_io::Triangle> = faces
        .iter()
        .map(|f| {
            let p0 = &vertices[f[0]];
            let p1 = &vertices[f[1]];
            let p2 = &vertices[f[2]];

            let n = (p1 - p0)
                .cross(&(p2 - p0))
                .try_normalize(f64::EPSILON)
                .unwrap_or_else(nalgebra::Vector3::zeros);

            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [
                    stl_io::Vertex::new([p0.x as f32, p0.y as f32, p0.z as f32]),
                    stl_io::Vertex::new([p1.x as f32, p1.y as f32, p1.z as f32]),
                    stl_io::Vertex::new([p2.x as f32, p2.y as f32, p2.z as f32]),
                ],
            }
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| MobiusError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::StripParams;

    #[test]
    fn test_binary_stl_layout() {
        let mesh = GridMesh::sample(&StripParams::new(1.0, 0.5), 6).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.stl");
        save(&mesh, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
        assert_eq!(count, 2 * 5 * 5);
        // 80-byte header, 4-byte count, 50 bytes per triangle.
        assert_eq!(bytes.len(), 84 + 50 * count);
    }

    #[test]
    fn test_stl_reads_back() {
        let mesh = GridMesh::sample(&StripParams::new(1.0, 0.5), 8).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.stl");
        save(&mesh, &path).unwrap();

        let mut file = File::open(&path).unwrap();
        let stl = stl_io::read_stl(&mut file).unwrap();
        assert_eq!(stl.faces.len(), 2 * 7 * 7);
    }
}
