//! Structured grid of surface samples.

use nalgebra::{DMatrix, DVector, Point3};
use rayon::prelude::*;

use crate::error::{MobiusError, Result};
use crate::strip::StripParams;

/// Smallest grid resolution that spans both parametric directions.
pub const MIN_RESOLUTION: usize = 2;

/// `n` evenly spaced samples from `start` to `end`, both ends included.
///
/// For `n == 1` the single sample is `start`; for `n == 0` the result is empty.
pub fn linspace(start: f64, end: f64, n: usize) -> DVector<f64> {
    match n {
        0 => DVector::zeros(0),
        1 => DVector::from_element(1, start),
        _ => {
            let step = (end - start) / (n - 1) as f64;
            DVector::from_fn(n, |i, _| {
                if i == n - 1 {
                    end
                } else {
                    start + step * i as f64
                }
            })
        }
    }
}

/// A surface sampled on a regular `(u, v)` grid.
///
/// Coordinates are stored as three matrices of identical shape. Row `i`
/// corresponds to the `i`-th `v` sample and column `j` to the `j`-th `u`
/// sample, so `x()[(i, j)]` is the x coordinate of `P(u[j], v[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    u: DVector<f64>,
    v: DVector<f64>,
    x: DMatrix<f64>,
    y: DMatrix<f64>,
    z: DMatrix<f64>,
}

impl GridMesh {
    /// Sample `params` on a `resolution × resolution` grid.
    ///
    /// `u` spans `[0, 2π]` and `v` spans `[-width/2, width/2]`, endpoints
    /// included. The last `u` column therefore repeats the first one with `v`
    /// mirrored; that is the seam of the strip.
    ///
    /// # Errors
    ///
    /// [`MobiusError::InvalidParameter`] if `params` fails
    /// [`StripParams::validate`] or `resolution < MIN_RESOLUTION`.
    pub fn sample(params: &StripParams, resolution: usize) -> Result<Self> {
        params.validate()?;
        if resolution < MIN_RESOLUTION {
            return Err(MobiusError::invalid_param(
                "resolution",
                resolution,
                "must be at least 2",
            ));
        }

        let h = params.half_width();
        let u = linspace(0.0, 2.0 * std::f64::consts::PI, resolution);
        let v = linspace(-h, h, resolution);

        // Column-major, matching nalgebra's storage: one u sample per column.
        let points: Vec<Point3<f64>> = (0..resolution * resolution)
            .into_par_iter()
            .map(|k| {
                let (i, j) = (k % resolution, k / resolution);
                params.point(u[j], v[i])
            })
            .collect();

        let x = DMatrix::from_iterator(resolution, resolution, points.iter().map(|p| p.x));
        let y = DMatrix::from_iterator(resolution, resolution, points.iter().map(|p| p.y));
        let z = DMatrix::from_iterator(resolution, resolution, points.iter().map(|p| p.z));

        Ok(Self { u, v, x, y, z })
    }

    /// Grid shape as `(rows, columns)` = `(v samples, u samples)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    /// The `u` samples (one per column).
    #[inline]
    pub fn u(&self) -> &DVector<f64> {
        &self.u
    }

    /// The `v` samples (one per row).
    #[inline]
    pub fn v(&self) -> &DVector<f64> {
        &self.v
    }

    /// X coordinates.
    #[inline]
    pub fn x(&self) -> &DMatrix<f64> {
        &self.x
    }

    /// Y coordinates.
    #[inline]
    pub fn y(&self) -> &DMatrix<f64> {
        &self.y
    }

    /// Z coordinates.
    #[inline]
    pub fn z(&self) -> &DMatrix<f64> {
        &self.z
    }

    /// The sampled point at row `i`, column `j`.
    #[inline]
    pub fn point(&self, i: usize, j: usize) -> Point3<f64> {
        Point3::new(self.x[(i, j)], self.y[(i, j)], self.z[(i, j)])
    }

    /// Number of sampled points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.x.len()
    }

    /// Whether every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        [&self.x, &self.y, &self.z]
            .iter()
            .all(|m| m.iter().all(|c| c.is_finite()))
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty grid.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.num_points() == 0 {
            return None;
        }
        let min = Point3::new(self.x.min(), self.y.min(), self.z.min());
        let max = Point3::new(self.x.max(), self.y.max(), self.z.max());
        Some((min, max))
    }

    /// Split the grid into triangles.
    ///
    /// Returns one vertex per sample (row-major: index `i * cols + j`) and two
    /// triangles per grid cell. The seam columns are not welded.
    pub fn triangulate(&self) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        let (rows, cols) = self.shape();
        let mut vertices = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                vertices.push(self.point(i, j));
            }
        }

        let mut faces = Vec::with_capacity(2 * rows.saturating_sub(1) * cols.saturating_sub(1));
        for i in 0..rows.saturating_sub(1) {
            for j in 0..cols.saturating_sub(1) {
                let v00 = i * cols + j;
                let v01 = v00 + 1;
                let v10 = v00 + cols;
                let v11 = v10 + 1;

                faces.push([v00, v01, v11]);
                faces.push([v00, v11, v10]);
            }
        }

        (vertices, faces)
    }
}
