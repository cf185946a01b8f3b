//! The simulation session: explicit owner of all mutable simulation state.
//!
//! A [`SimulationSession`] owns the grid, the interpolant, the particle set,
//! and the parameters, and exposes the controller operations that UI drivers
//! forward user input to. There is no module-level state: drivers hold the
//! session by value or reference and call operations synchronously between
//! frames.
//!
//! Every mutation that invalidates the interpolant is all-or-nothing: the
//! replacement grid and field are built first and committed together, so a
//! failed rebuild leaves the session exactly as it was.

use crate::error::{ParameterError, SimError};
use crate::grid::GridField;
use crate::params::{
    SimulationParameters, DEFAULT_INTENSITY, DIRECTION_MAX, DIRECTION_MIN, INTENSITY_MAX,
    INTENSITY_MIN,
};
use crate::particles::ParticleSet;
use crate::prng::Xorshift64;
use crate::velocity::VelocityField;

/// Owns GridField, VelocityField, ParticleSet, and SimulationParameters for
/// one simulation run.
///
/// The render loop contract is: call [`step`](Self::step) once per displayed
/// frame, read [`particles`](Self::particles) (and optionally
/// [`grid`](Self::grid) for quiver display), and route control events to the
/// setter operations. Single-threaded; rebuilds run to completion on the
/// calling thread.
#[derive(Debug)]
pub struct SimulationSession {
    params: SimulationParameters,
    grid: GridField,
    field: VelocityField,
    particles: ParticleSet,
    rng: Xorshift64,
}

impl SimulationSession {
    /// Builds a session: generates the grid, applies any non-default
    /// intensity/direction controls from `params`, fits the interpolant, and
    /// seeds `params.particle_count` particles from `seed`.
    pub fn new(params: SimulationParameters, seed: u64) -> Result<Self, SimError> {
        params.validate()?;
        let mut params = params;
        let mut grid = GridField::generate(params.grid_size, params.variant)?;

        params.intensity = params.intensity.clamp(INTENSITY_MIN, INTENSITY_MAX);
        if params.intensity != DEFAULT_INTENSITY {
            grid.scale_velocities(params.intensity);
        }
        if let Some(factor) = params.flow_direction {
            let factor = factor.clamp(DIRECTION_MIN, DIRECTION_MAX);
            params.flow_direction = Some(factor);
            grid.override_direction(factor * std::f64::consts::PI);
        }

        let field = VelocityField::build(&grid, params.kernel, params.shape)?;
        let mut rng = Xorshift64::new(seed);
        let particles = ParticleSet::seed(params.particle_count, &mut rng)?;
        Ok(Self {
            params,
            grid,
            field,
            particles,
            rng,
        })
    }

    /// Advances every particle by one Euler step at the configured `dt`.
    pub fn step(&mut self) {
        self.particles.step(&self.field, self.params.dt);
    }

    /// Replaces the particle set with `count` freshly seeded positions.
    ///
    /// Returns `ParameterError::ZeroParticleCount` for `count == 0`, leaving
    /// the existing particles in place.
    pub fn reset_particles(&mut self, count: usize) -> Result<(), SimError> {
        self.particles = ParticleSet::seed(count, &mut self.rng)?;
        self.params.particle_count = count;
        Ok(())
    }

    /// Scales the grid velocities by `scale` and rebuilds the interpolant.
    ///
    /// `scale` is clamped into `[0.1, 5.0]` (the nominal slider range).
    /// Scaling is cumulative across calls, matching slider semantics where
    /// each event multiplies the current field. Non-finite input is rejected
    /// before any state changes.
    pub fn set_intensity(&mut self, scale: f64) -> Result<(), SimError> {
        if !scale.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "intensity",
                value: scale,
            }
            .into());
        }
        let scale = scale.clamp(INTENSITY_MIN, INTENSITY_MAX);
        let mut grid = self.grid.clone();
        grid.scale_velocities(scale);
        let field = VelocityField::build(&grid, self.params.kernel, self.params.shape)?;
        log::debug!("rebuilt interpolant after intensity change (scale {scale})");
        self.grid = grid;
        self.field = field;
        self.params.intensity = scale;
        Ok(())
    }

    /// Replaces every grid velocity with the uniform direction vector for
    /// `angle = factor·π` and rebuilds the interpolant.
    ///
    /// This discards the spatial flow pattern (it does not modulate it);
    /// [`regenerate_field`](Self::regenerate_field) restores the pattern.
    /// `factor` is clamped into `[-1, 1]`. Non-finite input is rejected
    /// before any state changes.
    pub fn set_flow_direction(&mut self, factor: f64) -> Result<(), SimError> {
        if !factor.is_finite() {
            return Err(ParameterError::NonFinite {
                name: "flow_direction",
                value: factor,
            }
            .into());
        }
        let factor = factor.clamp(DIRECTION_MIN, DIRECTION_MAX);
        let mut grid = self.grid.clone();
        grid.override_direction(factor * std::f64::consts::PI);
        let field = VelocityField::build(&grid, self.params.kernel, self.params.shape)?;
        log::debug!("rebuilt interpolant after direction override (factor {factor})");
        self.grid = grid;
        self.field = field;
        self.params.flow_direction = Some(factor);
        Ok(())
    }

    /// Regenerates the base grid from the variant formula and rebuilds the
    /// interpolant, discarding accumulated intensity scaling and any
    /// direction override (intensity returns to 1.0, direction to none).
    pub fn regenerate_field(&mut self) -> Result<(), SimError> {
        let grid = GridField::generate(self.params.grid_size, self.params.variant)?;
        let field = VelocityField::build(&grid, self.params.kernel, self.params.shape)?;
        log::debug!(
            "regenerated {} field ({} samples)",
            self.params.variant.name(),
            grid.len()
        );
        self.grid = grid;
        self.field = field;
        self.params.intensity = DEFAULT_INTENSITY;
        self.params.flow_direction = None;
        Ok(())
    }

    /// Replaces the particle set with explicitly placed positions. Driver
    /// hook for deliberate placement (demos, tests); the particle count
    /// parameter follows the new set.
    pub fn set_particles(&mut self, particles: ParticleSet) {
        self.params.particle_count = particles.len();
        self.particles = particles;
    }

    /// Current parameter values.
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// The current grid (read-only; renderers sample this for quiver display).
    pub fn grid(&self) -> &GridField {
        &self.grid
    }

    /// The current interpolant.
    pub fn velocity_field(&self) -> &VelocityField {
        &self.field
    }

    /// The current particle positions (read-only for renderers).
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }
}
