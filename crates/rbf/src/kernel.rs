//! Radial basis kernels.

/// The radial basis function applied to inter-point distances.
///
/// The shape parameter `ε` controls how flat each basis bump is; when the
/// caller does not supply one, [`ScalarRbf::fit`](crate::ScalarRbf::fit)
/// derives it from the average nearest-neighbor spacing of the samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RbfKernel {
    /// `φ(r) = √(r² + ε²)` — the default; grows with distance, good for
    /// smooth global interpolation.
    Multiquadric,
    /// `φ(r) = exp(-(r/ε)²)` — localized bumps, decays with distance.
    Gaussian,
    /// `φ(r) = r` — no shape parameter; piecewise-conic interpolant.
    Linear,
}

/// All recognized kernel names, in display order.
const KERNEL_NAMES: &[&str] = &["multiquadric", "gaussian", "linear"];

impl RbfKernel {
    /// Evaluates the basis function at distance `r` with shape parameter
    /// `epsilon`. The linear kernel ignores `epsilon`.
    pub fn evaluate(&self, r: f64, epsilon: f64) -> f64 {
        match self {
            RbfKernel::Multiquadric => (r * r + epsilon * epsilon).sqrt(),
            RbfKernel::Gaussian => {
                let s = r / epsilon;
                (-s * s).exp()
            }
            RbfKernel::Linear => r,
        }
    }

    /// Whether this kernel uses a shape parameter.
    pub fn uses_shape(&self) -> bool {
        !matches!(self, RbfKernel::Linear)
    }

    /// Canonical lowercase name for CLI/JSON selection.
    pub fn name(&self) -> &'static str {
        match self {
            RbfKernel::Multiquadric => "multiquadric",
            RbfKernel::Gaussian => "gaussian",
            RbfKernel::Linear => "linear",
        }
    }

    /// Looks up a kernel by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "multiquadric" => Some(RbfKernel::Multiquadric),
            "gaussian" => Some(RbfKernel::Gaussian),
            "linear" => Some(RbfKernel::Linear),
            _ => None,
        }
    }

    /// Returns a slice of all recognized kernel names.
    pub fn list_names() -> &'static [&'static str] {
        KERNEL_NAMES
    }
}

impl Default for RbfKernel {
    fn default() -> Self {
        RbfKernel::Multiquadric
    }
}
