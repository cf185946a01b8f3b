//! Simulation parameters and JSON extraction helpers.
//!
//! The helpers never fail: a missing key or wrong JSON type falls back to the
//! supplied default. Validation of the assembled [`SimulationParameters`] is a
//! separate, explicit step.

use crate::error::ParameterError;
use crate::grid::FieldVariant;
use flowfield_rbf::RbfKernel;
use serde_json::{json, Value};

/// Default samples per lattice axis.
pub const DEFAULT_GRID_SIZE: usize = 20;
/// Default particle count at session start and reset.
pub const DEFAULT_PARTICLE_COUNT: usize = 100;
/// Default advection time step.
pub const DEFAULT_DT: f64 = 0.1;
/// Default velocity intensity multiplier.
pub const DEFAULT_INTENSITY: f64 = 1.0;
/// Smallest accepted intensity multiplier; lower requests clamp here.
pub const INTENSITY_MIN: f64 = 0.1;
/// Largest accepted intensity multiplier; higher requests clamp here.
pub const INTENSITY_MAX: f64 = 5.0;
/// Smallest flow-direction factor (maps to `-π` radians).
pub const DIRECTION_MIN: f64 = -1.0;
/// Largest flow-direction factor (maps to `π` radians).
pub const DIRECTION_MAX: f64 = 1.0;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// The scalar controls of a simulation session.
///
/// `intensity` and `flow_direction` record the last applied control values;
/// the session applies them to the grid (see the controller operations) and
/// rebuilds the interpolant. `flow_direction` is `None` while the spatial
/// field pattern is active and `Some(factor)` once a uniform override has
/// replaced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParameters {
    /// Samples per lattice axis (lattice has `grid_size³` points).
    pub grid_size: usize,
    /// Number of particles seeded at start and on reset.
    pub particle_count: usize,
    /// Fixed Euler time step per advection step.
    pub dt: f64,
    /// Velocity intensity multiplier, nominal range [0.1, 5.0].
    pub intensity: f64,
    /// Flow-direction factor in [-1, 1] (angle = factor·π), if overridden.
    pub flow_direction: Option<f64>,
    /// Analytic formula for field generation.
    pub variant: FieldVariant,
    /// Radial basis kernel for interpolant fits.
    pub kernel: RbfKernel,
    /// Explicit RBF shape parameter; `None` uses the spacing heuristic.
    pub shape: Option<f64>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            particle_count: DEFAULT_PARTICLE_COUNT,
            dt: DEFAULT_DT,
            intensity: DEFAULT_INTENSITY,
            flow_direction: None,
            variant: FieldVariant::default(),
            kernel: RbfKernel::default(),
            shape: None,
        }
    }
}

impl SimulationParameters {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing keys and unrecognized variant/kernel names.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            grid_size: param_usize(params, "grid_size", defaults.grid_size),
            particle_count: param_usize(params, "particle_count", defaults.particle_count),
            dt: param_f64(params, "dt", defaults.dt),
            intensity: param_f64(params, "intensity", defaults.intensity),
            flow_direction: params.get("flow_direction").and_then(Value::as_f64),
            variant: FieldVariant::from_name(&param_string(
                params,
                "variant",
                defaults.variant.name(),
            ))
            .unwrap_or(defaults.variant),
            kernel: RbfKernel::from_name(&param_string(
                params,
                "kernel",
                defaults.kernel.name(),
            ))
            .unwrap_or(defaults.kernel),
            shape: params.get("shape").and_then(Value::as_f64),
        }
    }

    /// Current parameter values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "grid_size": self.grid_size,
            "particle_count": self.particle_count,
            "dt": self.dt,
            "intensity": self.intensity,
            "flow_direction": self.flow_direction,
            "variant": self.variant.name(),
            "kernel": self.kernel.name(),
            "shape": self.shape,
        })
    }

    /// Checks every control for validity.
    ///
    /// Clamping of `intensity` and `flow_direction` into their nominal ranges
    /// happens when a controller operation applies them; here only structural
    /// problems (non-finite values, empty counts, degenerate grids) fail.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.grid_size < 2 {
            return Err(ParameterError::GridTooSmall(self.grid_size));
        }
        if self.particle_count == 0 {
            return Err(ParameterError::ZeroParticleCount);
        }
        if !self.dt.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "dt",
                value: self.dt,
            });
        }
        if !self.intensity.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "intensity",
                value: self.intensity,
            });
        }
        if let Some(f) = self.flow_direction {
            if !f.is_finite() {
                return Err(ParameterError::NonFinite {
                    name: "flow_direction",
                    value: f,
                });
            }
        }
        if let Some(s) = self.shape {
            if !s.is_finite() || s <= 0.0 {
                return Err(ParameterError::OutOfRange {
                    name: "shape",
                    value: s,
                    min: f64::MIN_POSITIVE,
                    max: f64::INFINITY,
                });
            }
        }
        Ok(())
    }
}
