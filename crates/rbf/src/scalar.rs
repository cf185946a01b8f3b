//! Scalar RBF interpolant: fit over scattered 3D points, evaluate anywhere.

use crate::error::InterpolationBuildError;
use crate::kernel::RbfKernel;
use glam::DVec3;
use nalgebra::{DMatrix, DVector};

/// Minimum sample count for a meaningful 3D fit.
const MIN_SAMPLES: usize = 4;

/// U-diagonal magnitude ratio above which the solve is reported as
/// ill-conditioned. Non-fatal: the fit still succeeds.
const CONDITION_WARN_RATIO: f64 = 1e12;

/// A scalar function `ℝ³ → ℝ` interpolating a set of sample values.
///
/// Construction solves the dense linear system `Φ w = f` with
/// `Φ[i][j] = φ(|pᵢ - pⱼ|)`, so [`evaluate`](Self::evaluate) reproduces the
/// sample values at the sample points exactly (up to solver round-off).
///
/// The solve is `O(n³)` in the sample count; callers wanting interactive
/// rebuild times should keep n at a few thousand samples.
#[derive(Debug, Clone)]
pub struct ScalarRbf {
    centers: Vec<DVec3>,
    weights: Vec<f64>,
    kernel: RbfKernel,
    epsilon: f64,
}

impl ScalarRbf {
    /// Fits an interpolant through `values[i]` at `points[i]`.
    ///
    /// When `shape` is `None` the shape parameter is the average
    /// nearest-neighbor spacing of `points` (the scipy-style heuristic).
    /// Kernels that ignore the shape parameter skip the `O(n²)` heuristic
    /// and record an epsilon of 0. A supplied `shape` must be finite and
    /// positive.
    ///
    /// # Errors
    ///
    /// - [`InterpolationBuildError::SampleCountMismatch`] if the slices differ
    ///   in length.
    /// - [`InterpolationBuildError::InsufficientSamples`] for fewer than 4
    ///   points.
    /// - [`InterpolationBuildError::DegenerateSamples`] if the points are all
    ///   coincident, collinear, or coplanar.
    /// - [`InterpolationBuildError::SingularSystem`] if the linear system has
    ///   no solution (duplicate coincident points).
    pub fn fit(
        points: &[DVec3],
        values: &[f64],
        kernel: RbfKernel,
        shape: Option<f64>,
    ) -> Result<Self, InterpolationBuildError> {
        let n = points.len();
        if n != values.len() {
            return Err(InterpolationBuildError::SampleCountMismatch {
                points: n,
                values: values.len(),
            });
        }
        if n < MIN_SAMPLES {
            return Err(InterpolationBuildError::InsufficientSamples(n));
        }
        if !spans_three_dimensions(points) {
            return Err(InterpolationBuildError::DegenerateSamples);
        }

        let epsilon = match shape {
            Some(s) => s,
            None if kernel.uses_shape() => average_nearest_neighbor_spacing(points),
            None => 0.0,
        };

        let phi = DMatrix::from_fn(n, n, |i, j| {
            kernel.evaluate(points[i].distance(points[j]), epsilon)
        });

        let lu = phi.lu();
        warn_if_ill_conditioned(lu.u().diagonal().as_slice());

        let rhs = DVector::from_column_slice(values);
        let solution = lu
            .solve(&rhs)
            .ok_or(InterpolationBuildError::SingularSystem)?;
        let weights: Vec<f64> = solution.iter().copied().collect();
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(InterpolationBuildError::SingularSystem);
        }

        Ok(Self {
            centers: points.to_vec(),
            weights,
            kernel,
            epsilon,
        })
    }

    /// Evaluates the interpolant at `p`.
    pub fn evaluate(&self, p: DVec3) -> f64 {
        self.centers
            .iter()
            .zip(self.weights.iter())
            .map(|(c, w)| w * self.kernel.evaluate(p.distance(*c), self.epsilon))
            .sum()
    }

    /// Number of sample centers.
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Always false: a fitted interpolant holds at least [`MIN_SAMPLES`] centers.
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// The kernel this interpolant was fitted with.
    pub fn kernel(&self) -> RbfKernel {
        self.kernel
    }

    /// The shape parameter used for the fit: supplied, derived, or 0 for
    /// kernels without one.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

/// Average distance from each point to its nearest neighbor.
///
/// `O(n²)`, which the `O(n³)` fit dominates anyway. On a regular lattice this
/// equals the lattice spacing.
fn average_nearest_neighbor_spacing(points: &[DVec3]) -> f64 {
    let n = points.len();
    let total: f64 = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            points
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, q)| p.distance(*q))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();
    total / n as f64
}

/// Whether the point cloud spans all three dimensions.
///
/// Searches for an edge, then a point off that line, then a point off the
/// resulting plane, with tolerances relative to the bounding-box diagonal.
fn spans_three_dimensions(points: &[DVec3]) -> bool {
    let origin = points[0];
    let diagonal = bounding_diagonal(points);
    let tol = (diagonal * 1e-9).max(1e-12);

    let Some(a) = points.iter().find(|p| p.distance(origin) > tol) else {
        return false; // all coincident
    };
    let edge = (*a - origin).normalize();

    let Some(b) = points
        .iter()
        .find(|p| edge.cross(**p - origin).length() > tol)
    else {
        return false; // all collinear
    };
    let normal = edge.cross(*b - origin).normalize();

    points.iter().any(|p| (*p - origin).dot(normal).abs() > tol)
}

/// Length of the axis-aligned bounding-box diagonal.
fn bounding_diagonal(points: &[DVec3]) -> f64 {
    let mut min = points[0];
    let mut max = points[0];
    for p in points {
        min = min.min(*p);
        max = max.max(*p);
    }
    (max - min).length()
}

/// Logs a warning when the LU factor's diagonal spread indicates an
/// ill-conditioned system. The fit proceeds regardless.
fn warn_if_ill_conditioned(u_diagonal: &[f64]) {
    let mut lo = f64::INFINITY;
    let mut hi = 0.0_f64;
    for d in u_diagonal {
        let m = d.abs();
        lo = lo.min(m);
        hi = hi.max(m);
    }
    if lo > 0.0 && hi / lo > CONDITION_WARN_RATIO {
        log::warn!(
            "ill-conditioned RBF system (pivot ratio {:.2e}); interpolation may lose accuracy",
            hi / lo
        );
    }
}
