//! Container boundary handling.
//!
//! The container is the canvas inset by a margin on every side. The margin
//! is a percentage of the canvas half-size, so `0` uses the whole canvas
//! and `100` collapses the container to its center point.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;
use crate::params::GlobalParams;

/// What happens to a particle that leaves the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Snap onto the edge and reflect the perpendicular velocity,
    /// scaled by `1 - edge_damping`.
    #[default]
    Bounce,
    /// Reappear at the opposite edge with velocity preserved.
    Wrap,
}

/// The active container rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Container for a canvas of `width` x `height` with the given margin.
    pub fn new(width: f32, height: f32, margin_percent: f32) -> Self {
        let margin = Vec2::new(width / 2.0, height / 2.0) * (margin_percent / 100.0);
        Self {
            min: margin,
            max: Vec2::new(width, height) - margin,
        }
    }

    /// Container for the current parameters.
    pub fn from_params(width: f32, height: f32, params: &GlobalParams) -> Self {
        Self::new(width, height, params.margin_percent)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Whether `point` lies inside the container, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Bring a particle back inside, per `mode`.
    pub fn apply(&self, particle: &mut Particle, mode: BoundaryMode, edge_damping: f32) {
        match mode {
            BoundaryMode::Bounce => self.bounce(particle, edge_damping),
            BoundaryMode::Wrap => self.wrap(particle),
        }
    }

    /// Reflect off each crossed edge. Axes are handled independently, so a
    /// particle past a corner reflects on both.
    pub fn bounce(&self, particle: &mut Particle, edge_damping: f32) {
        let reflect = -1.0 + edge_damping;

        if particle.position.y > self.max.y {
            particle.velocity.y *= reflect;
            particle.position.y = self.max.y;
        }
        if particle.position.y < self.min.y {
            particle.velocity.y *= reflect;
            particle.position.y = self.min.y;
        }
        if particle.position.x > self.max.x {
            particle.velocity.x *= reflect;
            particle.position.x = self.max.x;
        }
        if particle.position.x < self.min.x {
            particle.velocity.x *= reflect;
            particle.position.x = self.min.x;
        }
    }

    /// Move a particle that crossed an edge onto the opposite edge.
    pub fn wrap(&self, particle: &mut Particle) {
        if particle.position.y > self.max.y {
            particle.position.y = self.min.y;
        } else if particle.position.y < self.min.y {
            particle.position.y = self.max.y;
        }
        if particle.position.x > self.max.x {
            particle.position.x = self.min.x;
        } else if particle.position.x < self.min.x {
            particle.position.x = self.max.x;
        }
    }
}

/// Keep a particle inside the container of a `width` x `height` canvas.
pub fn clamp(particle: &mut Particle, width: f32, height: f32, params: &GlobalParams) {
    Bounds::from_params(width, height, params).apply(particle, params.boundary, params.edge_damping);
}
