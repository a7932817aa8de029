//! Adaptive numerical integration.
//!
//! This module provides a globally adaptive Gauss–Kronrod integrator for
//! smooth one-dimensional integrands, and a nested rectangle integrator built
//! on top of it.
//!
//! # Algorithm
//!
//! Each interval is integrated with the 15-point Kronrod rule. The embedded
//! 7-point Gauss rule gives a second estimate, and the difference between the
//! two (scaled as in QUADPACK's `qk15`) is the interval's error estimate.
//! While the summed error exceeds `max(abs_tol, rel_tol * |I|)`, the interval
//! with the largest error is bisected. Running out of subdivisions is an
//! error, never a silently inaccurate result.
//!
//! # Example
//!
//! ```
//! use mobius::algo::quadrature::{integrate, QuadratureOptions};
//!
//! let result = integrate(|x| x.sin(), 0.0, std::f64::consts::PI, &QuadratureOptions::default()).unwrap();
//! assert!((result.value - 2.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Piessens, R., et al. (1983). "QUADPACK: A Subroutine Package for
//!   Automatic Integration." Springer.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{self, AtomicU64};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::{MobiusError, Result};

/// Kronrod abscissae on `[-1, 1]`, descending; odd indices are the Gauss nodes.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

/// Kronrod weights matching [`XGK`].
const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// 7-point Gauss weights for `XGK[1]`, `XGK[3]`, `XGK[5]` and the center.
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Options for adaptive quadrature.
///
/// The defaults match the tolerances commonly used by scientific integration
/// libraries (`1.49e-8` absolute and relative, 50 subdivisions).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureOptions {
    /// Absolute error tolerance (>= 0).
    pub abs_tol: f64,
    /// Relative error tolerance (>= 0).
    pub rel_tol: f64,
    /// Maximum number of intervals the integration domain may be split into.
    pub max_subdivisions: usize,
    /// Evaluate the nodes of each rule in parallel.
    pub parallel: bool,
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self {
            abs_tol: 1.49e-8,
            rel_tol: 1.49e-8,
            max_subdivisions: 50,
            parallel: false,
        }
    }
}

impl QuadratureOptions {
    /// Set the absolute tolerance.
    pub fn with_abs_tol(mut self, abs_tol: f64) -> Self {
        self.abs_tol = abs_tol;
        self
    }

    /// Set the relative tolerance.
    pub fn with_rel_tol(mut self, rel_tol: f64) -> Self {
        self.rel_tol = rel_tol;
        self
    }

    /// Set the maximum number of subdivisions.
    pub fn with_max_subdivisions(mut self, max_subdivisions: usize) -> Self {
        self.max_subdivisions = max_subdivisions;
        self
    }

    /// Enable or disable parallel node evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that the options describe a satisfiable request.
    pub fn validate(&self) -> Result<()> {
        if !(self.abs_tol >= 0.0) {
            return Err(MobiusError::invalid_param(
                "abs_tol",
                self.abs_tol,
                "must be non-negative",
            ));
        }
        if !(self.rel_tol >= 0.0) {
            return Err(MobiusError::invalid_param(
                "rel_tol",
                self.rel_tol,
                "must be non-negative",
            ));
        }
        if self.abs_tol == 0.0 && self.rel_tol == 0.0 {
            return Err(MobiusError::invalid_param(
                "abs_tol",
                self.abs_tol,
                "absolute and relative tolerance cannot both be zero",
            ));
        }
        if self.max_subdivisions == 0 {
            return Err(MobiusError::invalid_param(
                "max_subdivisions",
                self.max_subdivisions,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Outcome of a converged integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    /// Estimated value of the integral.
    pub value: f64,
    /// Estimated absolute error of `value`.
    pub error: f64,
    /// Number of intervals in the final partition.
    pub subdivisions: usize,
    /// Number of integrand evaluations at this level (inner integrals of a
    /// nested integration count as one evaluation each).
    pub evaluations: usize,
}

/// One interval of the adaptive partition, ordered by error estimate.
#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

/// Integrate `f` over `[a, b]`.
///
/// `a > b` is allowed and yields the negated integral; `a == b` yields zero.
///
/// # Errors
///
/// - [`MobiusError::InvalidParameter`] for invalid options or non-finite bounds.
/// - [`MobiusError::IntegrationFailed`] if the tolerance is not met within
///   `max_subdivisions` intervals, or the integrand produced a non-finite value.
pub fn integrate<F>(f: F, a: f64, b: f64, options: &QuadratureOptions) -> Result<QuadratureResult>
where
    F: Fn(f64) -> f64 + Sync,
{
    try_integrate(|x| Ok(f(x)), a, b, options)
}

/// Integrate a fallible integrand over `[a, b]`.
///
/// The first error returned by `f` aborts the integration and is propagated
/// unchanged. This is what lets nested integrals report inner failures.
pub fn try_integrate<F>(
    f: F,
    a: f64,
    b: f64,
    options: &QuadratureOptions,
) -> Result<QuadratureResult>
where
    F: Fn(f64) -> Result<f64> + Sync,
{
    options.validate()?;
    if !a.is_finite() {
        return Err(MobiusError::invalid_param("a", a, "bound must be finite"));
    }
    if !b.is_finite() {
        return Err(MobiusError::invalid_param("b", b, "bound must be finite"));
    }
    if a == b {
        return Ok(QuadratureResult {
            value: 0.0,
            error: 0.0,
            subdivisions: 1,
            evaluations: 0,
        });
    }

    let first = kronrod15(&f, a, b, options.parallel)?;
    let mut evaluations = 15;
    let mut total = first.value;
    let mut total_error = first.error;
    let mut heap = BinaryHeap::with_capacity(options.max_subdivisions);
    heap.push(first);

    while total_error > tolerance(options, total) {
        if heap.len() >= options.max_subdivisions {
            debug!(
                subdivisions = heap.len(),
                value = total,
                error = total_error,
                "quadrature budget exhausted"
            );
            return Err(MobiusError::IntegrationFailed {
                value: total,
                error: total_error,
                subdivisions: heap.len(),
            });
        }

        // The heap is never empty here: it starts with one segment and every
        // iteration replaces one segment by two.
        let Some(worst) = heap.pop() else { break };
        let mid = 0.5 * (worst.a + worst.b);
        let left = kronrod15(&f, worst.a, mid, options.parallel)?;
        let right = kronrod15(&f, mid, worst.b, options.parallel)?;
        evaluations += 30;

        total += left.value + right.value - worst.value;
        total_error += left.error + right.error - worst.error;
        trace!(a = worst.a, b = worst.b, total, total_error, "bisected interval");

        heap.push(left);
        heap.push(right);
    }

    // Re-sum to shed the drift of the incremental updates.
    let value = heap.iter().map(|s| s.value).sum();
    let error = heap.iter().map(|s| s.error).sum();

    Ok(QuadratureResult {
        value,
        error,
        subdivisions: heap.len(),
        evaluations,
    })
}

/// Integrate `f(x, y)` over the rectangle `[x0, x1] × [y0, y1]`.
///
/// The outer integral runs over `x`; for each outer node the inner integral
/// over `y` is computed adaptively with the same options. A failure of any
/// inner integral aborts the whole computation.
///
/// The reported `error` is the outer estimate plus `|x1 - x0|` times the
/// largest inner estimate, which bounds the inner errors carried through the
/// outer rule. `subdivisions` and `evaluations` count the outer integral only.
pub fn integrate_2d<F>(
    f: F,
    (x0, x1): (f64, f64),
    (y0, y1): (f64, f64),
    options: &QuadratureOptions,
) -> Result<QuadratureResult>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    // Parallelism at the outer level only; the inner integrals stay serial.
    let inner_options = options.with_parallel(false);
    // Bit patterns of non-negative floats order the same as the floats.
    let max_inner_error = AtomicU64::new(0.0_f64.to_bits());
    let mut outer = try_integrate(
        |x| {
            let inner = integrate(|y| f(x, y), y0, y1, &inner_options)?;
            max_inner_error.fetch_max(inner.error.max(0.0).to_bits(), atomic::Ordering::Relaxed);
            Ok(inner.value)
        },
        x0,
        x1,
        options,
    )?;

    let max_inner_error = f64::from_bits(max_inner_error.into_inner());
    outer.error += (x1 - x0).abs() * max_inner_error;
    trace!(max_inner_error, error = outer.error, "combined rectangle error");
    Ok(outer)
}

fn tolerance(options: &QuadratureOptions, value: f64) -> f64 {
    options.abs_tol.max(options.rel_tol * value.abs())
}

/// Apply the 15-point Gauss–Kronrod rule to `[a, b]`.
fn kronrod15<F>(f: &F, a: f64, b: f64, parallel: bool) -> Result<Segment>
where
    F: Fn(f64) -> Result<f64> + Sync,
{
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    // Node layout: [center, c - h*x0, c + h*x0, c - h*x1, c + h*x1, ...]
    let mut nodes = [center; 15];
    for (j, &x) in XGK[..7].iter().enumerate() {
        nodes[2 * j + 1] = center - half * x;
        nodes[2 * j + 2] = center + half * x;
    }

    let values: Vec<f64> = if parallel {
        nodes.par_iter().map(|&x| f(x)).collect::<Result<_>>()?
    } else {
        nodes.iter().map(|&x| f(x)).collect::<Result<_>>()?
    };

    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        debug!(x = nodes[pos], value = values[pos], "non-finite integrand value");
        return Err(MobiusError::IntegrationFailed {
            value: f64::NAN,
            error: f64::INFINITY,
            subdivisions: 0,
        });
    }

    let fc = values[0];
    let mut kronrod = WGK[7] * fc;
    let mut gauss = WG[3] * fc;
    let mut abs_sum = WGK[7] * fc.abs();
    for j in 0..7 {
        let pair = values[2 * j + 1] + values[2 * j + 2];
        kronrod += WGK[j] * pair;
        abs_sum += WGK[j] * (values[2 * j + 1].abs() + values[2 * j + 2].abs());
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    let mean = 0.5 * kronrod;
    let mut asc = WGK[7] * (fc - mean).abs();
    for j in 0..7 {
        asc += WGK[j] * ((values[2 * j + 1] - mean).abs() + (values[2 * j + 2] - mean).abs());
    }

    let scale = half.abs();
    let value = kronrod * half;
    let abs_sum = abs_sum * scale;
    let asc = asc * scale;

    let mut error = ((kronrod - gauss) * half).abs();
    if asc != 0.0 && error != 0.0 {
        error = asc * (200.0 * error / asc).powf(1.5).min(1.0);
    }
    if abs_sum > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * abs_sum);
    }

    Ok(Segment { a, b, value, error })
}
