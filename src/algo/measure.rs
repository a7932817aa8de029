//! Surface area and edge length of a strip by adaptive quadrature.
//!
//! Both quantities are integrals of the exact differential elements of the
//! parametrization, so they do not depend on the mesh resolution:
//!
//! - **Surface area**: `∫∫ ‖∂P/∂u × ∂P/∂v‖ dv du` over
//!   `[0, 2π] × [-w/2, w/2]`.
//! - **Edge length**: `∫ ‖∂P/∂u(u, w/2)‖ du` over `[0, 2π]`. This is a single
//!   sweep along `v = +w/2`; the strip has one boundary curve, which closes up
//!   only after `u` has gone around twice. [`boundary_length`] integrates over
//!   `[0, 4π]` for the full loop.
//!
//! # Example
//!
//! ```
//! use mobius::algo::measure::{surface_area, edge_length};
//! use mobius::algo::quadrature::QuadratureOptions;
//! use mobius::strip::StripParams;
//!
//! let params = StripParams::new(1.0, 0.5);
//! let opts = QuadratureOptions::default();
//! let area = surface_area(&params, &opts).unwrap();
//! let edge = edge_length(&params, &opts).unwrap();
//! assert!((area.value - 3.14991).abs() < 1e-4);
//! assert!((edge.value - 6.33365).abs() < 1e-4);
//! ```

use std::f64::consts::PI;

use tracing::{info, instrument};

use super::quadrature::{integrate, integrate_2d, QuadratureOptions, QuadratureResult};
use crate::error::Result;
use crate::strip::StripParams;

/// A measured quantity together with the quadrature's diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// The measured value (finite, non-negative).
    pub value: f64,
    /// Estimated absolute error.
    pub error: f64,
    /// Number of outer intervals used by the integrator.
    pub subdivisions: usize,
    /// Number of outer integrand evaluations.
    pub evaluations: usize,
}

impl From<QuadratureResult> for Measurement {
    fn from(r: QuadratureResult) -> Self {
        Self {
            value: r.value,
            error: r.error,
            subdivisions: r.subdivisions,
            evaluations: r.evaluations,
        }
    }
}

/// Surface area of the strip.
///
/// # Errors
///
/// [`MobiusError::InvalidParameter`](crate::error::MobiusError::InvalidParameter)
/// if `params` fails [`StripParams::validate`], or any quadrature failure.
#[instrument(level = "debug", skip(options))]
pub fn surface_area(params: &StripParams, options: &QuadratureOptions) -> Result<Measurement> {
    params.validate()?;
    let h = params.half_width();
    let result = integrate_2d(
        |u, v| params.area_element(u, v),
        (0.0, 2.0 * PI),
        (-h, h),
        options,
    )?;
    info!(
        radius = params.radius,
        width = params.width,
        area = result.value,
        error = result.error,
        "surface area"
    );
    Ok(result.into())
}

/// Length of the edge `v = width / 2` over a single sweep `u ∈ [0, 2π]`.
///
/// See the module documentation for how this relates to the full boundary.
#[instrument(level = "debug", skip(options))]
pub fn edge_length(params: &StripParams, options: &QuadratureOptions) -> Result<Measurement> {
    let result = sweep_length(params, 2.0 * PI, options)?;
    info!(
        radius = params.radius,
        width = params.width,
        length = result.value,
        error = result.error,
        "edge length (single sweep)"
    );
    Ok(result.into())
}

/// Length of the strip's complete boundary curve, `u ∈ [0, 4π]` at `v = width / 2`.
#[instrument(level = "debug", skip(options))]
pub fn boundary_length(params: &StripParams, options: &QuadratureOptions) -> Result<Measurement> {
    let result = sweep_length(params, 4.0 * PI, options)?;
    info!(
        radius = params.radius,
        width = params.width,
        length = result.value,
        error = result.error,
        "boundary length"
    );
    Ok(result.into())
}

fn sweep_length(
    params: &StripParams,
    span: f64,
    options: &QuadratureOptions,
) -> Result<QuadratureResult> {
    params.validate()?;
    let v = params.half_width();
    integrate(|u| params.speed(u, v), 0.0, span, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const AREA_R1_W05: f64 = 3.149_910_791_929_4;
    const EDGE_R1_W05: f64 = 6.333_652_526_994_1;

    #[test]
    fn test_surface_area_golden() {
        let m = surface_area(&StripParams::new(1.0, 0.5), &QuadratureOptions::default()).unwrap();
        assert!((m.value - AREA_R1_W05).abs() < 1e-4);
        assert!(m.error < 1e-6);
    }

    #[test]
    fn test_edge_length_golden() {
        let m = edge_length(&StripParams::new(1.0, 0.5), &QuadratureOptions::default()).unwrap();
        assert!((m.value - EDGE_R1_W05).abs() < 1e-4);
    }

    #[test]
    fn test_boundary_is_twice_single_sweep() {
        // The v = -w/2 half of the loop is congruent to the v = +w/2 half.
        let p = StripParams::new(1.0, 0.5);
        let opts = QuadratureOptions::default();
        let edge = edge_length(&p, &opts).unwrap().value;
        let full = boundary_length(&p, &opts).unwrap().value;
        assert_relative_eq!(full, 2.0 * edge, max_relative = 1e-8);
        assert!((full - 12.667_305_054).abs() < 1e-4);
    }

    #[test]
    fn test_thin_strip_edge_tends_to_circle() {
        let opts = QuadratureOptions::default();
        for &r in &[0.5, 1.0, 3.0] {
            let m = edge_length(&StripParams::new(r, 1e-9), &opts).unwrap();
            assert_relative_eq!(m.value, 2.0 * PI * r, max_relative = 1e-7);
        }
    }

    #[test]
    fn test_thin_strip_area_tends_to_band() {
        // For w ≪ R the strip is nearly a flat band of length 2πR.
        let m = surface_area(&StripParams::new(2.0, 1e-3), &QuadratureOptions::default()).unwrap();
        assert_relative_eq!(m.value, 2.0 * PI * 2.0 * 1e-3, max_relative = 1e-5);
    }

    #[test]
    fn test_area_increases_with_width() {
        let opts = QuadratureOptions::default();
        let areas: Vec<f64> = [0.25, 0.5, 0.75, 1.0]
            .iter()
            .map(|&w| surface_area(&StripParams::new(1.0, w), &opts).unwrap().value)
            .collect();
        for pair in areas.windows(2) {
            assert!(pair[1] > pair[0], "{areas:?} is not increasing");
        }
    }

    #[test]
    fn test_parallel_area_matches_serial() {
        let p = StripParams::new(1.5, 0.8);
        let serial = surface_area(&p, &QuadratureOptions::default()).unwrap();
        let parallel = surface_area(&p, &QuadratureOptions::default().with_parallel(true)).unwrap();
        assert_relative_eq!(serial.value, parallel.value, max_relative = 1e-14);
    }

    #[test]
    fn test_rejects_invalid_params() {
        let opts = QuadratureOptions::default();
        for (r, w) in [
            (1.0, -0.5),
            (-1.0, 0.5),
            (0.0, 0.5),
            (1.0, 0.0),
            (f64::NAN, 0.5),
            (1.0, f64::INFINITY),
        ] {
            let p = StripParams::new(r, w);
            assert!(surface_area(&p, &opts).unwrap_err().is_invalid_parameter());
            assert!(edge_length(&p, &opts).unwrap_err().is_invalid_parameter());
            assert!(boundary_length(&p, &opts).unwrap_err().is_invalid_parameter());
        }
    }

    #[test]
    fn test_exhausted_budget_propagates() {
        let opts = QuadratureOptions::default()
            .with_abs_tol(1e-300)
            .with_rel_tol(1e-300)
            .with_max_subdivisions(1);
        let err = surface_area(&StripParams::new(1.0, 0.5), &opts).unwrap_err();
        assert!(err.is_integration_failure());
        let err = edge_length(&StripParams::new(1.0, 0.5), &opts).unwrap_err();
        assert!(err.is_integration_failure());
    }
}
