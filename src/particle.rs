//! Particle storage and spawning.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::group::{Group, Groups};

/// A point particle.
///
/// Real particles are created once by [`spawn`] and mutated every tick.
/// Pseudo-particles (pointer, gravity) are built on the fly with
/// [`Particle::pseudo`] and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub group: Group,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, group: Group) -> Self {
        Self {
            position,
            velocity,
            group,
        }
    }

    /// A transient interaction target.
    pub(crate) fn pseudo(position: Vec2, velocity: Vec2, group: Group) -> Self {
        debug_assert!(group.is_pseudo());
        Self::new(position, velocity, group)
    }
}

/// Spawn every group's population inside a `width` x `height` canvas.
///
/// Positions are uniform over the canvas. Initial velocities are tiny and
/// biased negative: each component is drawn from `[-1/1000, 0)`.
pub fn spawn<R: Rng + ?Sized>(groups: &Groups, width: f32, height: f32, rng: &mut R) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(groups.total_particles());
    for (group, info) in groups.iter() {
        for _ in 0..info.count {
            let position = Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height);
            let velocity = Vec2::new(
                (rng.gen::<f32>() - 1.0) / 1000.0,
                (rng.gen::<f32>() - 1.0) / 1000.0,
            );
            particles.push(Particle::new(position, velocity, group));
        }
    }
    particles
}
