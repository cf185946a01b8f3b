//! Deterministic PRNG for particle seeding, based on Xorshift64.
//!
//! Particle resets reseed positions uniformly inside the cube domain; using
//! a small seedable generator keeps runs reproducible across platforms (the
//! core algorithm is pure integer arithmetic).

use glam::DVec3;

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed 0 is replaced with a
/// non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback seed used when the caller provides 0, which is a fixed point
    /// of the xorshift algorithm.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed (0 is replaced by a fallback).
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` for full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniform random point in the axis-aligned cube
    /// `[min, max)³`, drawing the three coordinates in x, y, z order.
    pub fn next_point_in_cube(&mut self, min: f64, max: f64) -> DVec3 {
        DVec3::new(
            self.next_range(min, max),
            self.next_range(min, max),
            self.next_range(min, max),
        )
    }
}
