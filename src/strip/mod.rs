//! The Möbius strip.
//!
//! A strip is defined by its midline `radius`, its full `width`, and the
//! `resolution` of the sample grid used for display and export:
//!
//! ```text
//! x(u, v) = (R + v·cos(u/2))·cos(u)
//! y(u, v) = (R + v·cos(u/2))·sin(u)
//! z(u, v) = v·sin(u/2)
//! ```
//!
//! with `u ∈ [0, 2π)` and `v ∈ [-w/2, w/2]`. The `u/2` terms make the half
//! twist: `P(0, v) = P(2π, -v)`.
//!
//! # Example
//!
//! ```
//! use mobius::strip::MobiusStrip;
//!
//! let strip = MobiusStrip::new(1.0, 0.5, 30).unwrap();
//! let area = strip.surface_area().unwrap();
//! let edge = strip.edge_length().unwrap();
//! println!("Surface area: {area:.4}");
//! println!("Edge length: {edge:.4}");
//! ```

mod params;

pub use params::StripParams;

use crate::algo::measure::{self, Measurement};
use crate::algo::quadrature::QuadratureOptions;
use crate::error::Result;
use crate::mesh::GridMesh;

pub use crate::mesh::MIN_RESOLUTION;

/// A Möbius strip with validated parameters and its sample grid.
///
/// Parameters cannot change after construction; the mesh is built once in
/// [`MobiusStrip::new`]. Measurements are recomputed on every call and do not
/// depend on `resolution`.
#[derive(Debug, Clone)]
pub struct MobiusStrip {
    params: StripParams,
    resolution: usize,
    mesh: GridMesh,
}

impl MobiusStrip {
    /// Create a strip.
    ///
    /// # Errors
    ///
    /// [`MobiusError::InvalidParameter`](crate::error::MobiusError::InvalidParameter)
    /// if `radius` or `width` is not a positive finite number, or
    /// `resolution < MIN_RESOLUTION`. Values are never clamped.
    pub fn new(radius: f64, width: f64, resolution: usize) -> Result<Self> {
        let params = StripParams::new(radius, width);
        let mesh = GridMesh::sample(&params, resolution)?;
        tracing::debug!(radius, width, resolution, "built strip mesh");

        Ok(Self {
            params,
            resolution,
            mesh,
        })
    }

    /// Midline radius.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.params.radius
    }

    /// Full strip width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.params.width
    }

    /// Samples per parametric axis of the mesh.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// The underlying parametrization.
    #[inline]
    pub fn params(&self) -> &StripParams {
        &self.params
    }

    /// The sample grid (`resolution × resolution`).
    #[inline]
    pub fn mesh(&self) -> &GridMesh {
        &self.mesh
    }

    /// Surface area with default quadrature options.
    pub fn surface_area(&self) -> Result<f64> {
        self.surface_area_with(&QuadratureOptions::default())
            .map(|m| m.value)
    }

    /// Surface area with explicit quadrature options and diagnostics.
    pub fn surface_area_with(&self, options: &QuadratureOptions) -> Result<Measurement> {
        measure::surface_area(&self.params, options)
    }

    /// Length of one edge over a single sweep `u ∈ [0, 2π]`.
    ///
    /// This is half of the strip's boundary curve; see [`Self::boundary_length`].
    pub fn edge_length(&self) -> Result<f64> {
        self.edge_length_with(&QuadratureOptions::default())
            .map(|m| m.value)
    }

    /// Single-sweep edge length with explicit quadrature options.
    pub fn edge_length_with(&self, options: &QuadratureOptions) -> Result<Measurement> {
        measure::edge_length(&self.params, options)
    }

    /// Length of the complete boundary curve (`u ∈ [0, 4π]`).
    pub fn boundary_length(&self) -> Result<f64> {
        self.boundary_length_with(&QuadratureOptions::default())
            .map(|m| m.value)
    }

    /// Full boundary length with explicit quadrature options.
    pub fn boundary_length_with(&self, options: &QuadratureOptions) -> Result<Measurement> {
        measure::boundary_length(&self.params, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_invalid_parameters() {
        for (r, w, n) in [
            (0.0, 0.5, 30),
            (-1.0, 0.5, 30),
            (1.0, -1.0, 30),
            (1.0, 0.0, 30),
            (1.0, 0.5, 1),
            (1.0, 0.5, 0),
            (f64::NAN, 0.5, 30),
            (1.0, f64::INFINITY, 30),
        ] {
            let err = MobiusStrip::new(r, w, n).unwrap_err();
            assert!(err.is_invalid_parameter(), "({r}, {w}, {n}) gave {err}");
        }
    }

    #[test]
    fn test_accepts_minimum_resolution() {
        let strip = MobiusStrip::new(1.0, 0.5, 2).unwrap();
        assert_eq!(strip.mesh().shape(), (2, 2));
    }

    #[test]
    fn test_mesh_shape_and_finite() {
        for &(r, w, n) in &[(1.0, 0.5, 30), (0.1, 5.0, 3), (100.0, 0.01, 64)] {
            let strip = MobiusStrip::new(r, w, n).unwrap();
            let mesh = strip.mesh();
            assert_eq!(mesh.x().shape(), (n, n));
            assert_eq!(mesh.y().shape(), (n, n));
            assert_eq!(mesh.z().shape(), (n, n));
            assert!(mesh.is_finite());
        }
    }

    #[test]
    fn test_seam_columns_are_mirrored() {
        let n = 21;
        let strip = MobiusStrip::new(1.0, 0.5, n).unwrap();
        let mesh = strip.mesh();
        let last = n - 1;
        for i in 0..n {
            // The u = 2π column at v equals the u = 0 column at -v.
            assert_relative_eq!(mesh.x()[(i, last)], mesh.x()[(n - 1 - i, 0)], epsilon = 1e-12);
            assert_relative_eq!(mesh.y()[(i, last)], 0.0, epsilon = 1e-12);
            assert_relative_eq!(mesh.z()[(i, last)], 0.0, epsilon = 1e-12);
            assert_relative_eq!(mesh.y()[(i, 0)], 0.0, epsilon = 1e-12);
            assert_relative_eq!(mesh.z()[(i, 0)], 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_area_independent_of_resolution() {
        let coarse = MobiusStrip::new(1.0, 0.5, 2).unwrap().surface_area().unwrap();
        let fine = MobiusStrip::new(1.0, 0.5, 200).unwrap().surface_area().unwrap();
        assert_relative_eq!(coarse, fine, max_relative = 1e-6);
    }

    #[test]
    fn test_golden_values() {
        let strip = MobiusStrip::new(1.0, 0.5, 30).unwrap();
        assert!((strip.surface_area().unwrap() - 3.149_910_79).abs() < 1e-4);
        assert!((strip.edge_length().unwrap() - 6.333_652_53).abs() < 1e-4);
        assert!((strip.boundary_length().unwrap() - 12.667_305_05).abs() < 1e-4);
    }

    #[test]
    fn test_measurements_are_repeatable() {
        let strip = MobiusStrip::new(2.0, 1.0, 10).unwrap();
        assert_eq!(strip.surface_area().unwrap(), strip.surface_area().unwrap());
        assert_eq!(strip.edge_length().unwrap(), strip.edge_length().unwrap());
    }

    #[test]
    fn test_strip_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MobiusStrip>();
    }
}
