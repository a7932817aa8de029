//! Sampled surface meshes.
//!
//! The primary type is [`GridMesh`], the strip evaluated on a regular
//! `(u, v)` grid and stored as three coordinate matrices `X`, `Y`, `Z`.
//!
//! # Example
//!
//! ```
//! use mobius::mesh::GridMesh;
//! use mobius::strip::StripParams;
//!
//! let mesh = GridMesh::sample(&StripParams::new(1.0, 0.5), 30).unwrap();
//! assert_eq!(mesh.shape(), (30, 30));
//!
//! let (vertices, triangles) = mesh.triangulate();
//! assert_eq!(vertices.len(), 900);
//! assert_eq!(triangles.len(), 2 * 29 * 29);
//! ```

mod grid;

pub use grid::{linspace, GridMesh, MIN_RESOLUTION};
