//! Numerical algorithms.
//!
//! - **Quadrature**: adaptive Gauss–Kronrod integration in one and two dimensions
//! - **Measure**: surface area and edge/boundary length of a strip

pub mod measure;
pub mod quadrature;

pub use measure::Measurement;
pub use quadrature::{QuadratureOptions, QuadratureResult};
