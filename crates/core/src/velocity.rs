//! The continuous velocity interpolant built from a [`GridField`].
//!
//! Three independent scalar RBF models, one per velocity axis, fitted over
//! the same lattice positions. Evaluation stacks the three scalar results
//! into a velocity vector.

use crate::grid::GridField;
use flowfield_rbf::{InterpolationBuildError, RbfKernel, ScalarRbf};
use glam::DVec3;

/// A continuous function `ℝ³ → ℝ³` interpolating a grid's velocity samples.
///
/// Reflects exactly the `GridField` it was built from; any grid mutation
/// leaves an existing `VelocityField` stale until a rebuild replaces it.
/// Queries outside the lattice extrapolate smoothly with no error, but
/// accuracy there is not guaranteed.
#[derive(Debug, Clone)]
pub struct VelocityField {
    u: ScalarRbf,
    v: ScalarRbf,
    w: ScalarRbf,
}

impl VelocityField {
    /// Fits the three per-axis interpolants over `grid`.
    ///
    /// `shape` is the optional RBF shape parameter; `None` derives it from
    /// the lattice spacing. The fit is a dense `O(n³)` solve in the sample
    /// count, so rebuilds dominate the cost of every controller operation.
    ///
    /// # Errors
    ///
    /// Propagates [`InterpolationBuildError`] from the scalar fits. On error
    /// no partially-built field escapes: the caller keeps its previous field.
    pub fn build(
        grid: &GridField,
        kernel: RbfKernel,
        shape: Option<f64>,
    ) -> Result<Self, InterpolationBuildError> {
        let positions = grid.positions();
        let u = ScalarRbf::fit(positions, &grid.component_values(0), kernel, shape)?;
        let v = ScalarRbf::fit(positions, &grid.component_values(1), kernel, shape)?;
        let w = ScalarRbf::fit(positions, &grid.component_values(2), kernel, shape)?;
        Ok(Self { u, v, w })
    }

    /// Interpolated velocity at `p`.
    pub fn evaluate(&self, p: DVec3) -> DVec3 {
        DVec3::new(self.u.evaluate(p), self.v.evaluate(p), self.w.evaluate(p))
    }

    /// Interpolated velocities for a batch of query positions, one output
    /// vector per input position in order.
    pub fn evaluate_batch(&self, positions: &[DVec3]) -> Vec<DVec3> {
        positions.iter().map(|p| self.evaluate(*p)).collect()
    }

    /// The kernel the component models were fitted with.
    pub fn kernel(&self) -> RbfKernel {
        self.u.kernel()
    }

    /// The shape parameter used for the fit (supplied or derived).
    pub fn epsilon(&self) -> f64 {
        self.u.epsilon()
    }
}
