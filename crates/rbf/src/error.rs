//! Error type for RBF fitting.

use thiserror::Error;

/// Errors produced while fitting an RBF interpolant.
///
/// A failed fit leaves no partially-built interpolant behind; callers keep
/// whatever interpolant they had before the attempt.
#[derive(Debug, Error)]
pub enum InterpolationBuildError {
    /// Fewer sample points than the minimum needed for a 3D fit.
    #[error("need at least 4 sample points for a 3D fit, got {0}")]
    InsufficientSamples(usize),

    /// The number of sample points and target values differ.
    #[error("sample count mismatch: {points} points vs {values} values")]
    SampleCountMismatch { points: usize, values: usize },

    /// The sample points do not span three dimensions (all coincident,
    /// collinear, or coplanar).
    #[error("degenerate sample geometry: points do not span three dimensions")]
    DegenerateSamples,

    /// The interpolation matrix could not be solved, typically because two
    /// sample points coincide exactly.
    #[error("singular interpolation system (coincident sample points?)")]
    SingularSystem,
}
