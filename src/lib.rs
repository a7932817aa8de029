//! # Mobius
//!
//! Parametric Möbius strips: sample them, draw them, and measure them.
//!
//! The strip with midline radius `R` and width `w` is the surface
//!
//! ```text
//! P(u, v) = ((R + v·cos(u/2))·cos(u), (R + v·cos(u/2))·sin(u), v·sin(u/2))
//! ```
//!
//! for `u ∈ [0, 2π)` and `v ∈ [-w/2, w/2]`.
//!
//! ## Features
//!
//! - **Exact differential geometry**: closed-form partial derivatives, area
//!   element and normals
//! - **Resolution-independent measurement**: surface area and edge length by
//!   adaptive Gauss–Kronrod quadrature, not by summing mesh triangles
//! - **Grid meshes**: `X`, `Y`, `Z` coordinate matrices at any resolution
//! - **Output**: PNG rendering and OBJ / STL / PLY export
//!
//! ## Quick Start
//!
//! ```
//! use mobius::prelude::*;
//!
//! let strip = MobiusStrip::new(1.0, 0.5, 30).unwrap();
//!
//! let mesh = strip.mesh();
//! assert_eq!(mesh.shape(), (30, 30));
//!
//! let area = strip.surface_area().unwrap();
//! let edge = strip.edge_length().unwrap();
//! assert!((area - 3.1499).abs() < 1e-4);
//! assert!((edge - 6.3337).abs() < 1e-4);
//! ```
//!
//! ## Controlling the Integrator
//!
//! ```
//! use mobius::prelude::*;
//!
//! let strip = MobiusStrip::new(2.0, 1.0, 10).unwrap();
//! let options = QuadratureOptions::default()
//!     .with_rel_tol(1e-12)
//!     .with_max_subdivisions(200);
//!
//! let area = strip.surface_area_with(&options).unwrap();
//! println!("area = {} ± {:e}", area.value, area.error);
//! ```
//!
//! ## Edge Length
//!
//! [`MobiusStrip::edge_length`](strip::MobiusStrip::edge_length) follows one
//! edge `v = w/2` for a single turn `u ∈ [0, 2π]`. The strip's boundary is a
//! single curve that closes only after two turns;
//! [`MobiusStrip::boundary_length`](strip::MobiusStrip::boundary_length)
//! measures all of it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;
pub mod render;
pub mod strip;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use mobius::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{Measurement, QuadratureOptions, QuadratureResult};
    pub use crate::error::{MobiusError, Result};
    pub use crate::mesh::GridMesh;
    pub use crate::render::RenderOptions;
    pub use crate::strip::{MobiusStrip, StripParams};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_default_strip() {
        let strip = MobiusStrip::new(1.0, 0.5, 30).unwrap();

        assert_eq!(strip.radius(), 1.0);
        assert_eq!(strip.width(), 0.5);
        assert_eq!(strip.resolution(), 30);
        assert_eq!(strip.mesh().num_points(), 900);

        let area = strip.surface_area().unwrap();
        let edge = strip.edge_length().unwrap();
        assert!(area.is_finite() && area > 0.0);
        assert!(edge.is_finite() && edge > 0.0);

        // A thin band: area is close to midline length times width.
        let band = 2.0 * std::f64::consts::PI * strip.radius() * strip.width();
        assert!((area - band).abs() / band < 0.01);
    }
}
