//! Sources of per-tick randomness.
//!
//! Collisions scale the reflected velocity by a random factor and the
//! gravity pseudo-particle wobbles sideways, which keeps the picture lively
//! but makes ticks irreproducible. Both draws go through [`Jitter`] so a
//! run can be seeded ([`RandomJitter::seeded`]) or made fully deterministic
//! ([`NoJitter`]).

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Range of the per-axis collision multiplier.
pub const COLLISION_JITTER: Range<f32> = 0.2..1.1;

/// Half-width of the gravity pseudo-particle's horizontal wobble.
pub const GRAVITY_WOBBLE: f32 = 0.25;

/// Randomness injected into a tick.
pub trait Jitter {
    /// Per-axis multiplier for a collided target's reflected velocity.
    fn collision(&mut self) -> Vec2;

    /// Horizontal offset of the gravity pseudo-particle from its source.
    fn gravity_offset(&mut self) -> f32;
}

/// Jitter drawn from a random number generator.
#[derive(Debug, Clone)]
pub struct RandomJitter<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomJitter<StdRng> {
    /// Reproducible jitter.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Jitter seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Jitter for RandomJitter<R> {
    fn collision(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(COLLISION_JITTER),
            self.rng.gen_range(COLLISION_JITTER),
        )
    }

    fn gravity_offset(&mut self) -> f32 {
        self.rng.gen_range(-GRAVITY_WOBBLE..GRAVITY_WOBBLE)
    }
}

/// No randomness: unit collision multiplier, no wobble.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn collision(&mut self) -> Vec2 {
        Vec2::ONE
    }

    fn gravity_offset(&mut self) -> f32 {
        0.0
    }
}
