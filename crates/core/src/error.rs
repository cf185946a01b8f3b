//! Error types for the flowfield core.
//!
//! Two failure families exist: malformed caller input ([`ParameterError`])
//! and degenerate RBF fits ([`InterpolationBuildError`], re-exported from
//! `flowfield-rbf`). [`SimError`] is the sum the session surface returns.

use thiserror::Error;

pub use flowfield_rbf::InterpolationBuildError;

/// Malformed or out-of-domain user input.
///
/// The core performs no silent coercion beyond the clamping documented on
/// the session operations; everything else is rejected here.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// A particle reset asked for zero particles.
    #[error("particle count must be positive")]
    ZeroParticleCount,

    /// The lattice needs at least two samples per axis to span the domain.
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),

    /// A scalar control was NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// A scalar control was finite but outside its permitted range.
    #[error("{name} must be in [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Top-level error for session operations.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid caller input.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The RBF rebuild failed; session state was left untouched.
    #[error(transparent)]
    Interpolation(#[from] InterpolationBuildError),
}
