//! Closed-form parametrization of the strip and its partial derivatives.

use nalgebra::{Point3, Vector3};

use crate::error::{MobiusError, Result};

/// Geometric parameters of a Möbius strip.
///
/// `radius` is the distance from the central axis to the strip's midline and
/// `width` is the full width across the strip, so `v` ranges over
/// `[-width / 2, width / 2]`.
///
/// All methods are pure functions of `(u, v)` and the two parameters. They are
/// well defined for every finite input; there are no singular points on the
/// parameter domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripParams {
    /// Distance from the central axis to the midline.
    pub radius: f64,
    /// Full width of the strip.
    pub width: f64,
}

impl StripParams {
    /// Create parameters without validation.
    ///
    /// Use [`MobiusStrip::new`](super::MobiusStrip::new) for checked
    /// construction, or call [`Self::validate`] before measuring.
    #[inline]
    pub const fn new(radius: f64, width: f64) -> Self {
        Self { radius, width }
    }

    /// Check that `radius` and `width` are positive finite numbers.
    ///
    /// # Errors
    ///
    /// [`MobiusError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("radius", self.radius), ("width", self.width)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MobiusError::invalid_param(
                    name,
                    value,
                    "must be positive and finite",
                ));
            }
        }
        Ok(())
    }

    /// Half of the strip width; the `v` domain is `[-half_width, half_width]`.
    #[inline]
    pub fn half_width(&self) -> f64 {
        0.5 * self.width
    }

    /// Surface point `P(u, v)`.
    #[inline]
    pub fn point(&self, u: f64, v: f64) -> Point3<f64> {
        let (sin_h, cos_h) = (0.5 * u).sin_cos();
        let (sin_u, cos_u) = u.sin_cos();
        let r = self.radius + v * cos_h;
        Point3::new(r * cos_u, r * sin_u, v * sin_h)
    }

    /// Partial derivative `∂P/∂u`.
    #[inline]
    pub fn du(&self, u: f64, v: f64) -> Vector3<f64> {
        let (sin_h, cos_h) = (0.5 * u).sin_cos();
        let (sin_u, cos_u) = u.sin_cos();
        let r = self.radius + v * cos_h;
        let half_v = 0.5 * v;
        Vector3::new(
            -r * sin_u - half_v * sin_h * cos_u,
            r * cos_u - half_v * sin_h * sin_u,
            half_v * cos_h,
        )
    }

    /// Partial derivative `∂P/∂v`. Independent of `v` (rulings are straight).
    #[inline]
    pub fn dv(&self, u: f64) -> Vector3<f64> {
        let (sin_h, cos_h) = (0.5 * u).sin_cos();
        let (sin_u, cos_u) = u.sin_cos();
        Vector3::new(cos_h * cos_u, cos_h * sin_u, sin_h)
    }

    /// Differential area element `‖∂P/∂u × ∂P/∂v‖`.
    #[inline]
    pub fn area_element(&self, u: f64, v: f64) -> f64 {
        self.du(u, v).cross(&self.dv(u)).norm()
    }

    /// Unit surface normal at `(u, v)`.
    ///
    /// The strip is non-orientable, so the normal is only locally consistent:
    /// `normal(0, v)` and `normal(2π, -v)` point in opposite directions.
    ///
    /// With a positive radius the cross product never vanishes: its squared
    /// length is `(radius + v·cos(u/2))² + v²/4`.
    #[inline]
    pub fn normal(&self, u: f64, v: f64) -> Vector3<f64> {
        self.du(u, v).cross(&self.dv(u)).normalize()
    }

    /// Speed `‖∂P/∂u‖` of the curve traced at fixed `v`.
    #[inline]
    pub fn speed(&self, u: f64, v: f64) -> f64 {
        self.du(u, v).norm()
    }
}
