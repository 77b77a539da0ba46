//! Gaussian kernel density estimation over a sighting scatter.
//!
//! Fits a continuous density surface to the (longitude, latitude) scatter of
//! a point set, usable to render heatmap intensity at arbitrary query
//! coordinates. The surface is a sum of axis-aligned Gaussian kernels and
//! integrates to 1 over the plane.
//!
//! Reference:
//! Scott, D.W. (1992). Multivariate Density Estimation: Theory, Practice,
//! and Visualization. Wiley.

use ndarray::Array2;
use serde::Serialize;
use wildtrack_core::{Error, Result};

use crate::maybe_rayon::*;

/// A fitted Gaussian product-kernel density surface.
///
/// Pure value type: fitting and evaluation have no side effects, and the
/// estimate is a function of the input points and bandwidth only.
#[derive(Debug, Clone, Serialize)]
pub struct KernelDensity {
    /// Support points as (x, y) = (longitude, latitude)
    points: Vec<(f64, f64)>,
    /// Kernel bandwidth per dimension (hx, hy), both > 0
    bandwidth: (f64, f64),
    /// Normalization constant 1 / (n · 2π · hx · hy)
    norm: f64,
}

impl KernelDensity {
    /// Fit a density surface with automatic bandwidth selection.
    ///
    /// Bandwidth follows Scott's rule per dimension: `σ_i · n^(-1/6)`
    /// (d = 2), with the sample standard deviation σ_i (ddof = 1).
    ///
    /// # Returns
    /// [`Error::InsufficientData`] for fewer than 2 points or when either
    /// coordinate has zero variance (all points coincide on an axis).
    pub fn fit(points: &[(f64, f64)]) -> Result<Self> {
        let (sx, sy) = sample_std(points)?;
        let factor = (points.len() as f64).powf(-1.0 / 6.0);
        Self::fit_with_bandwidth(points, (sx * factor, sy * factor))
    }

    /// Fit with an explicit per-dimension bandwidth, overriding Scott's rule.
    pub fn fit_with_bandwidth(points: &[(f64, f64)], bandwidth: (f64, f64)) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InsufficientData(format!(
                "density estimation needs at least 2 points, got {}",
                points.len()
            )));
        }
        let (hx, hy) = bandwidth;
        if !(hx > 0.0) || !(hy > 0.0) {
            return Err(Error::InsufficientData(
                "zero-variance coordinates give a singular kernel bandwidth".to_string(),
            ));
        }
        let n = points.len() as f64;
        Ok(Self {
            points: points.to_vec(),
            bandwidth,
            norm: 1.0 / (n * std::f64::consts::TAU * hx * hy),
        })
    }

    /// The (hx, hy) bandwidth in use.
    pub fn bandwidth(&self) -> (f64, f64) {
        self.bandwidth
    }

    /// Number of support points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Density at a query coordinate. Always non-negative.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let (hx, hy) = self.bandwidth;
        let sum: f64 = self
            .points
            .iter()
            .map(|&(px, py)| {
                let u = (x - px) / hx;
                let v = (y - py) / hy;
                (-0.5 * (u * u + v * v)).exp()
            })
            .sum();
        self.norm * sum
    }

    /// Bounding box of the support points expanded by `margin_bandwidths`
    /// kernel widths on each side. A margin of 5-8 covers the effective
    /// support of the Gaussian kernels for rendering or integration.
    ///
    /// Returns (min_x, min_y, max_x, max_y).
    pub fn support_bounds(&self, margin_bandwidths: f64) -> (f64, f64, f64, f64) {
        let (hx, hy) = self.bandwidth;
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for &(x, y) in &self.points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        (
            min_x - margin_bandwidths * hx,
            min_y - margin_bandwidths * hy,
            max_x + margin_bandwidths * hx,
            max_y + margin_bandwidths * hy,
        )
    }

    /// Rasterize the surface over a bounding box for heatmap rendering.
    ///
    /// Cell (row, col) holds the density at the cell center; row 0 is the
    /// `min_y` edge. Rows are evaluated in parallel when the `parallel`
    /// feature is on.
    ///
    /// # Arguments
    /// * `(min_x, min_y, max_x, max_y)` - Evaluation extent
    /// * `rows`, `cols` - Output grid dimensions
    pub fn evaluate_grid(
        &self,
        extent: (f64, f64, f64, f64),
        rows: usize,
        cols: usize,
    ) -> Result<Array2<f64>> {
        let (min_x, min_y, max_x, max_y) = extent;
        if rows == 0 || cols == 0 || !(max_x > min_x) || !(max_y > min_y) {
            return Err(Error::InvalidArgument {
                name: "grid",
                value: format!("{rows}x{cols} over ({min_x}, {min_y})..({max_x}, {max_y})"),
                expected: "positive dimensions and a non-empty extent",
            });
        }

        let dx = (max_x - min_x) / cols as f64;
        let dy = (max_y - min_y) / rows as f64;

        let data: Vec<f64> = (0..rows)
            .into_par_iter()
            .flat_map(|row| {
                let y = min_y + (row as f64 + 0.5) * dy;
                (0..cols)
                    .map(|col| {
                        let x = min_x + (col as f64 + 0.5) * dx;
                        self.evaluate(x, y)
                    })
                    .collect::<Vec<f64>>()
            })
            .collect();

        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::InvalidArgument {
            name: "grid",
            value: e.to_string(),
            expected: "rows * cols cells",
        })
    }
}

/// Sample standard deviation per dimension, ddof = 1.
fn sample_std(points: &[(f64, f64)]) -> Result<(f64, f64)> {
    let n = points.len();
    if n < 2 {
        return Err(Error::InsufficientData(format!(
            "density estimation needs at least 2 points, got {n}"
        )));
    }
    let nf = n as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(ax, ay), &(x, y)| (ax + x, ay + y));
    let (mx, my) = (sum_x / nf, sum_y / nf);
    let (ssx, ssy) = points.iter().fold((0.0, 0.0), |(ax, ay), &(x, y)| {
        (ax + (x - mx) * (x - mx), ay + (y - my) * (y - my))
    });
    Ok(((ssx / (nf - 1.0)).sqrt(), (ssy / (nf - 1.0)).sqrt()))
}
