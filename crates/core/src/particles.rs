//! The particle cloud and its advection step.

use crate::error::ParameterError;
use crate::grid::{DOMAIN_MAX, DOMAIN_MIN};
use crate::prng::Xorshift64;
use crate::velocity::VelocityField;
use glam::DVec3;

/// An ordered set of independent particle positions.
///
/// Positions are unconstrained: advection never clamps, reflects, or removes
/// particles, so they may drift arbitrarily far outside the visualized cube.
/// The count changes only through an explicit reseed.
#[derive(Debug, Clone)]
pub struct ParticleSet {
    positions: Vec<DVec3>,
}

impl ParticleSet {
    /// Seeds `count` uniform-random positions inside the cube domain.
    ///
    /// Returns `ParameterError::ZeroParticleCount` for `count == 0`.
    pub fn seed(count: usize, rng: &mut Xorshift64) -> Result<Self, ParameterError> {
        if count == 0 {
            return Err(ParameterError::ZeroParticleCount);
        }
        let positions = (0..count)
            .map(|_| rng.next_point_in_cube(DOMAIN_MIN, DOMAIN_MAX))
            .collect();
        Ok(Self { positions })
    }

    /// Wraps explicit positions, bypassing random seeding. Used by drivers
    /// that place particles deliberately.
    pub fn from_positions(positions: Vec<DVec3>) -> Self {
        Self { positions }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the set holds no particles (only possible via
    /// [`from_positions`](Self::from_positions)).
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Read-only particle positions, in seeding order.
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Advances every particle by one explicit Euler step: `p += v(p)·dt`.
    ///
    /// All velocities are sampled in one batch before any position moves, so
    /// the update is simultaneous; ordering within the batch cannot influence
    /// the result. Deterministic given `field` and `dt`.
    pub fn step(&mut self, field: &VelocityField, dt: f64) {
        let velocities = field.evaluate_batch(&self.positions);
        for (p, v) in self.positions.iter_mut().zip(velocities) {
            *p += v * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{FieldVariant, GridField};
    use flowfield_rbf::RbfKernel;

    fn swirl_field(grid_size: usize) -> VelocityField {
        let grid = GridField::generate(grid_size, FieldVariant::Swirl).unwrap();
        VelocityField::build(&grid, RbfKernel::Multiquadric, None).unwrap()
    }

    // ---- Seeding ----

    #[test]
    fn seed_yields_exactly_count_particles_in_domain() {
        let mut rng = Xorshift64::new(42);
        for count in [1, 7, 100] {
            let set = ParticleSet::seed(count, &mut rng).unwrap();
            assert_eq!(set.len(), count);
            for p in set.positions() {
                for axis in 0..3 {
                    assert!(
                        (DOMAIN_MIN..DOMAIN_MAX).contains(&p[axis]),
                        "particle outside domain: {p:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn seed_zero_count_is_rejected() {
        let mut rng = Xorshift64::new(42);
        assert!(matches!(
            ParticleSet::seed(0, &mut rng),
            Err(ParameterError::ZeroParticleCount)
        ));
    }

    #[test]
    fn seed_is_deterministic_per_seed() {
        let mut a = Xorshift64::new(9);
        let mut b = Xorshift64::new(9);
        let pa = ParticleSet::seed(20, &mut a).unwrap();
        let pb = ParticleSet::seed(20, &mut b).unwrap();
        assert_eq!(pa.positions(), pb.positions());
    }

    // ---- Stepping ----

    #[test]
    fn step_moves_particles_along_sampled_velocity() {
        let field = swirl_field(4);
        let start = DVec3::new(2.0, 1.0, -1.0);
        let mut set = ParticleSet::from_positions(vec![start]);
        let expected = start + field.evaluate(start) * 0.1;
        set.step(&field, 0.1);
        assert!((set.positions()[0] - expected).length() < 1e-12);
    }

    #[test]
    fn step_with_zero_dt_is_identity() {
        let field = swirl_field(3);
        let mut set = ParticleSet::from_positions(vec![
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(-4.0, 0.0, 4.0),
        ]);
        let before = set.positions().to_vec();
        set.step(&field, 0.0);
        assert_eq!(set.positions(), &before[..]);
    }

    #[test]
    fn one_full_step_approximates_two_half_steps() {
        // Euler consistency: dt and 2×(dt/2) agree to first order; the gap
        // is bounded by the O(dt²) local truncation error.
        let field = swirl_field(4);
        let start = DVec3::new(1.0, -2.0, 0.5);
        let dt = 0.1;

        let mut full = ParticleSet::from_positions(vec![start]);
        full.step(&field, dt);

        let mut halved = ParticleSet::from_positions(vec![start]);
        halved.step(&field, dt / 2.0);
        halved.step(&field, dt / 2.0);

        let gap = (full.positions()[0] - halved.positions()[0]).length();
        assert!(gap < 0.05, "Euler halving gap too large: {gap}");
        assert!(gap > 0.0, "half-stepping should differ slightly from one step");
    }

    #[test]
    fn step_count_is_preserved() {
        let field = swirl_field(3);
        let mut rng = Xorshift64::new(5);
        let mut set = ParticleSet::seed(25, &mut rng).unwrap();
        for _ in 0..10 {
            set.step(&field, 0.1);
        }
        assert_eq!(set.len(), 25);
    }

    #[test]
    fn particles_may_leave_the_domain() {
        // A uniform field pushes everything one way; no clamping may occur.
        let mut grid = GridField::generate(3, FieldVariant::Swirl).unwrap();
        grid.override_direction(0.0); // constant (0, 1, 0)
        let field = VelocityField::build(&grid, RbfKernel::Multiquadric, None).unwrap();
        let mut set = ParticleSet::from_positions(vec![DVec3::new(0.0, 4.9, 0.0)]);
        for _ in 0..5 {
            set.step(&field, 0.5);
        }
        assert!(
            set.positions()[0].y > DOMAIN_MAX,
            "particle should drift past the domain face"
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn seeded_particles_always_inside_cube(seed: u64, count in 1_usize..200) {
                let mut rng = Xorshift64::new(seed);
                let set = ParticleSet::seed(count, &mut rng).unwrap();
                prop_assert_eq!(set.len(), count);
                for p in set.positions() {
                    for axis in 0..3 {
                        prop_assert!((DOMAIN_MIN..DOMAIN_MAX).contains(&p[axis]));
                    }
                }
            }
        }
    }
}
