#![deny(unsafe_code)]
//! Radial-basis-function interpolation over scattered 3D sample points.
//!
//! A [`ScalarRbf`] expresses an unknown scalar function as a weighted sum of
//! basis functions of distance to each sample point. Fitting solves the dense
//! symmetric system `Φ w = f` where `Φ[i][j] = φ(|pᵢ - pⱼ|)`, so the result
//! interpolates the samples exactly. Evaluation anywhere else (including
//! outside the convex hull of the samples) is smooth; extrapolation accuracy
//! is not guaranteed.
//!
//! Fitting cost is `O(n³)` in the sample count due to the dense LU solve,
//! which bounds interactive use to roughly n ≤ 8000 samples.

pub mod error;
pub mod kernel;
pub mod scalar;

pub use error::InterpolationBuildError;
pub use kernel::RbfKernel;
pub use scalar::ScalarRbf;
