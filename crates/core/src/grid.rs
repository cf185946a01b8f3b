//! Regular 3D lattice of velocity samples and the analytic field formulas.
//!
//! A `GridField` is the RBF training data: `grid_size³` positions inside the
//! fixed cube domain, one velocity vector per position. It is always replaced
//! wholesale (regeneration) or mutated uniformly (intensity scaling, direction
//! override); there are no incremental per-cell updates.

use crate::error::ParameterError;
use glam::DVec3;

/// Lower corner of the cubic simulation domain on every axis.
pub const DOMAIN_MIN: f64 = -5.0;
/// Upper corner of the cubic simulation domain on every axis.
pub const DOMAIN_MAX: f64 = 5.0;

/// All recognized field variant names, in display order.
const VARIANT_NAMES: &[&str] = &["swirl", "unsteady"];

/// The analytic formula used to synthesize grid velocities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldVariant {
    /// Pure rotation around the z-axis with a standing wave in x:
    /// `u = -y`, `v = x`, `w = sin(x)`.
    Swirl,
    /// The swirl plus trigonometric unsteadiness:
    /// `u = -y + sin(x)`, `v = x + cos(y)`, `w = sin(z)`.
    Unsteady,
}

impl FieldVariant {
    /// Analytic velocity at position `p`.
    pub fn velocity_at(&self, p: DVec3) -> DVec3 {
        match self {
            FieldVariant::Swirl => DVec3::new(-p.y, p.x, p.x.sin()),
            FieldVariant::Unsteady => {
                DVec3::new(-p.y + p.x.sin(), p.x + p.y.cos(), p.z.sin())
            }
        }
    }

    /// Canonical lowercase name for CLI/JSON selection.
    pub fn name(&self) -> &'static str {
        match self {
            FieldVariant::Swirl => "swirl",
            FieldVariant::Unsteady => "unsteady",
        }
    }

    /// Looks up a variant by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "swirl" => Some(FieldVariant::Swirl),
            "unsteady" => Some(FieldVariant::Unsteady),
            _ => None,
        }
    }

    /// Returns a slice of all recognized variant names.
    pub fn list_names() -> &'static [&'static str] {
        VARIANT_NAMES
    }
}

impl Default for FieldVariant {
    fn default() -> Self {
        FieldVariant::Swirl
    }
}

/// The uniform direction vector for a flow-direction override at `angle`
/// radians: `u = -sin(angle)`, `v = cos(angle)`, `w = sin(angle)`.
pub fn direction_vector(angle: f64) -> DVec3 {
    DVec3::new(-angle.sin(), angle.cos(), angle.sin())
}

/// A `grid_size³` lattice of velocity samples spanning the cube domain.
#[derive(Debug, Clone)]
pub struct GridField {
    variant: FieldVariant,
    grid_size: usize,
    positions: Vec<DVec3>,
    velocities: Vec<DVec3>,
}

impl GridField {
    /// Generates the lattice for `variant`, with positions spanning
    /// `linspace(DOMAIN_MIN, DOMAIN_MAX, grid_size)` on each axis (endpoints
    /// inclusive) and one analytic velocity per position.
    ///
    /// Deterministic: no randomness is involved.
    ///
    /// Returns `ParameterError::GridTooSmall` if `grid_size < 2` — a single
    /// sample per axis cannot span the domain.
    pub fn generate(grid_size: usize, variant: FieldVariant) -> Result<Self, ParameterError> {
        if grid_size < 2 {
            return Err(ParameterError::GridTooSmall(grid_size));
        }
        let axis = linspace(DOMAIN_MIN, DOMAIN_MAX, grid_size);
        let mut positions = Vec::with_capacity(grid_size * grid_size * grid_size);
        for &x in &axis {
            for &y in &axis {
                for &z in &axis {
                    positions.push(DVec3::new(x, y, z));
                }
            }
        }
        let velocities = positions.iter().map(|p| variant.velocity_at(*p)).collect();
        Ok(Self {
            variant,
            grid_size,
            positions,
            velocities,
        })
    }

    /// Samples per axis.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// The formula this grid was generated from.
    pub fn variant(&self) -> FieldVariant {
        self.variant
    }

    /// Total sample count (`grid_size³`).
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false: generation refuses grids below 2³ samples.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Lattice positions, x-major then y then z.
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Velocity samples, index-aligned with [`positions`](Self::positions).
    pub fn velocities(&self) -> &[DVec3] {
        &self.velocities
    }

    /// One velocity component across all samples, as the scalar targets for a
    /// per-axis RBF fit. `axis` is 0 for u, 1 for v, 2 for w.
    pub fn component_values(&self, axis: usize) -> Vec<f64> {
        self.velocities.iter().map(|v| v[axis]).collect()
    }

    /// Multiplies every velocity sample by `scale` in place.
    pub fn scale_velocities(&mut self, scale: f64) {
        for v in &mut self.velocities {
            *v *= scale;
        }
    }

    /// Replaces every velocity sample with the uniform direction vector for
    /// `angle` radians. This discards the spatial pattern entirely.
    pub fn override_direction(&mut self, angle: f64) {
        let d = direction_vector(angle);
        for v in &mut self.velocities {
            *v = d;
        }
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
///
/// The last value is pinned to `end` exactly rather than accumulated, so the
/// lattice always touches both domain faces.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    debug_assert!(count >= 2);
    let step = (end - start) / (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                end
            } else {
                start + i as f64 * step
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Grid coverage ----

    #[test]
    fn generate_produces_cubed_sample_count() {
        let grid = GridField::generate(4, FieldVariant::Swirl).unwrap();
        assert_eq!(grid.len(), 64);
        assert_eq!(grid.positions().len(), 64);
        assert_eq!(grid.velocities().len(), 64);
    }

    #[test]
    fn positions_span_linspace_on_each_axis() {
        let n = 5;
        let grid = GridField::generate(n, FieldVariant::Swirl).unwrap();
        let expected = linspace(DOMAIN_MIN, DOMAIN_MAX, n);
        for axis in 0..3 {
            let mut seen: Vec<f64> = grid.positions().iter().map(|p| p[axis]).collect();
            seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
            seen.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
            assert_eq!(seen.len(), n, "axis {axis} has wrong distinct coordinates");
            for (s, e) in seen.iter().zip(expected.iter()) {
                assert!((s - e).abs() < 1e-12, "axis {axis}: {s} != {e}");
            }
        }
    }

    #[test]
    fn endpoints_touch_both_domain_faces() {
        let grid = GridField::generate(20, FieldVariant::Swirl).unwrap();
        let xs: Vec<f64> = grid.positions().iter().map(|p| p.x).collect();
        let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min, DOMAIN_MIN);
        assert_eq!(max, DOMAIN_MAX);
    }

    #[test]
    fn generate_rejects_degenerate_grid_size() {
        assert!(matches!(
            GridField::generate(0, FieldVariant::Swirl),
            Err(ParameterError::GridTooSmall(0))
        ));
        assert!(matches!(
            GridField::generate(1, FieldVariant::Swirl),
            Err(ParameterError::GridTooSmall(1))
        ));
    }

    #[test]
    fn generate_is_deterministic() {
        let a = GridField::generate(6, FieldVariant::Unsteady).unwrap();
        let b = GridField::generate(6, FieldVariant::Unsteady).unwrap();
        assert!(a
            .velocities()
            .iter()
            .zip(b.velocities())
            .all(|(x, y)| x == y));
    }

    // ---- Variant formulas ----

    #[test]
    fn swirl_velocity_matches_formula() {
        let p = DVec3::new(1.5, -2.0, 3.0);
        let v = FieldVariant::Swirl.velocity_at(p);
        assert!((v.x - 2.0).abs() < 1e-12);
        assert!((v.y - 1.5).abs() < 1e-12);
        assert!((v.z - 1.5_f64.sin()).abs() < 1e-12);
    }

    #[test]
    fn unsteady_velocity_matches_formula() {
        let p = DVec3::new(1.5, -2.0, 3.0);
        let v = FieldVariant::Unsteady.velocity_at(p);
        assert!((v.x - (2.0 + 1.5_f64.sin())).abs() < 1e-12);
        assert!((v.y - (1.5 + (-2.0_f64).cos())).abs() < 1e-12);
        assert!((v.z - 3.0_f64.sin()).abs() < 1e-12);
    }

    #[test]
    fn swirl_vanishes_at_origin() {
        let v = FieldVariant::Swirl.velocity_at(DVec3::ZERO);
        assert_eq!(v, DVec3::ZERO);
    }

    #[test]
    fn grid_velocities_agree_with_variant_formula() {
        let grid = GridField::generate(3, FieldVariant::Unsteady).unwrap();
        for (p, v) in grid.positions().iter().zip(grid.velocities()) {
            assert_eq!(*v, FieldVariant::Unsteady.velocity_at(*p));
        }
    }

    #[test]
    fn variant_names_round_trip() {
        for name in FieldVariant::list_names() {
            let variant = FieldVariant::from_name(name).expect("listed name must parse");
            assert_eq!(variant.name(), *name);
        }
        assert!(FieldVariant::from_name("vortex").is_none());
    }

    // ---- Mutators ----

    #[test]
    fn scale_velocities_is_uniform() {
        let mut grid = GridField::generate(3, FieldVariant::Swirl).unwrap();
        let before: Vec<DVec3> = grid.velocities().to_vec();
        grid.scale_velocities(2.5);
        for (b, a) in before.iter().zip(grid.velocities()) {
            assert!((*b * 2.5 - *a).length() < 1e-12);
        }
    }

    #[test]
    fn override_direction_makes_all_samples_identical() {
        let mut grid = GridField::generate(4, FieldVariant::Unsteady).unwrap();
        grid.override_direction(0.3 * std::f64::consts::PI);
        let first = grid.velocities()[0];
        assert!(grid.velocities().iter().all(|v| *v == first));
    }

    #[test]
    fn direction_vector_matches_formula() {
        let angle = 0.25 * std::f64::consts::PI;
        let d = direction_vector(angle);
        assert!((d.x + angle.sin()).abs() < 1e-12);
        assert!((d.y - angle.cos()).abs() < 1e-12);
        assert!((d.z - angle.sin()).abs() < 1e-12);
    }

    #[test]
    fn direction_vector_at_zero_angle_points_along_y() {
        let d = direction_vector(0.0);
        assert_eq!(d, DVec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn component_values_extract_each_axis() {
        let grid = GridField::generate(2, FieldVariant::Swirl).unwrap();
        for axis in 0..3 {
            let values = grid.component_values(axis);
            assert_eq!(values.len(), grid.len());
            for (v, sample) in values.iter().zip(grid.velocities()) {
                assert_eq!(*v, sample[axis]);
            }
        }
    }

    // ---- linspace ----

    #[test]
    fn linspace_endpoints_are_exact() {
        let axis = linspace(-5.0, 5.0, 7);
        assert_eq!(axis[0], -5.0);
        assert_eq!(axis[6], 5.0);
    }

    #[test]
    fn linspace_is_evenly_spaced() {
        let axis = linspace(-5.0, 5.0, 11);
        for pair in axis.windows(2) {
            assert!((pair[1] - pair[0] - 1.0).abs() < 1e-12);
        }
    }
}
