//! Wavefront OBJ export.
//!
//! Vertices carry texture coordinates derived from the grid parameters:
//! `s = u / 2π` and `t = (v + w/2) / w`, both in `[0, 1]`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::mesh::GridMesh;

/// Save a mesh to an OBJ file.
///
/// # Example
///
/// ```no_run
/// use mobius::io::obj;
/// use mobius::mesh::GridMesh;
/// use mobius::strip::StripParams;
///
/// let mesh = GridMesh::sample(&StripParams::new(1.0, 0.5), 30).unwrap();
/// obj::save(&mesh, "output.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &GridMesh, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh in OBJ format to any writer.
pub fn write<W: Write>(mesh: &GridMesh, writer: &mut W) -> Result<()> {
    let (vertices, faces) = mesh.triangulate();
    let (_, cols) = mesh.shape();
    let tex = texture_coords(mesh);

    writeln!(writer, "# Generated by mobius")?;
    writeln!(writer, "# {} vertices, {} faces", vertices.len(), faces.len())?;

    for v in &vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for (k, _) in vertices.iter().enumerate() {
        let (s, t) = (tex.0[k % cols], tex.1[k / cols]);
        writeln!(writer, "vt {} {}", s, t)?;
    }

    // OBJ indices are 1-based; vertex and texture indices coincide.
    for f in &faces {
        let (a, b, c) = (f[0] + 1, f[1] + 1, f[2] + 1);
        writeln!(writer, "f {a}/{a} {b}/{b} {c}/{c}")?;
    }

    Ok(())
}

/// Normalized `(s per column, t per row)`.
fn texture_coords(mesh: &GridMesh) -> (Vec<f64>, Vec<f64>) {
    let u = mesh.u();
    let v = mesh.v();
    let u_span = u.max() - u.min();
    let v_min = v.min();
    let v_span = v.max() - v_min;

    let normalize = |x: f64, lo: f64, span: f64| if span > 0.0 { (x - lo) / span } else { 0.0 };
    let s = u.iter().map(|&x| normalize(x, 0.0, u_span)).collect();
    let t = v.iter().map(|&x| normalize(x, v_min, v_span)).collect();
    (s, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::StripParams;

    #[test]
    fn test_obj_structure() {
        let mesh = GridMesh::sample(&StripParams::new(1.0, 0.5), 4).unwrap();
        let mut buf = Vec::new();
        write(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), 16);
        assert_eq!(count("vt "), 16);
        assert_eq!(count("f "), 18);
        assert!(text.lines().any(|l| l == "f 1/1 2/2 6/6"));
    }

    #[test]
    fn test_texture_coords_span_unit_square() {
        let mesh = GridMesh::sample(&StripParams::new(1.0, 0.5), 5).unwrap();
        let (s, t) = texture_coords(&mesh);
        assert_eq!(s.first(), Some(&0.0));
        assert_eq!(s.last(), Some(&1.0));
        assert_eq!(t.first(), Some(&0.0));
        assert_eq!(t.last(), Some(&1.0));
    }
}
