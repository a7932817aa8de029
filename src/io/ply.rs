//! PLY (Stanford polygon) export, ASCII flavor.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::mesh::GridMesh;

/// Save a mesh to a PLY file (ASCII format).
///
/// # Example
///
/// ```no_run
/// use mobius::io::ply;
/// use mobius::mesh::GridMesh;
/// use mobius::strip::StripParams;
///
/// let mesh = GridMesh::sample(&StripParams::new(1.0, 0.5), 30).unwrap();
/// ply::save(&mesh, "output.ply").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &GridMesh, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as ASCII PLY to any writer.
pub fn write<W: Write>(mesh: &GridMesh, writer: &mut W) -> Result<()> {
    let (vertices, faces) = mesh.triangulate();

    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by mobius")?;
    writeln!(writer, "element vertex {}", vertices.len())?;
    writeln!(writer, "property double x")?;
    writeln!(writer, "property double y")?;
    writeln!(writer, "property double z")?;
    writeln!(writer, "element face {}", faces.len())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for v in &vertices {
        writeln!(writer, "{} {} {}", v.x, v.y, v.z)?;
    }
    for f in &faces {
        writeln!(writer, "3 {} {} {}", f[0], f[1], f[2])?;
    }

    Ok(())
}
