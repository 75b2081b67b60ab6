//! Pairwise force evaluation.
//!
//! Two regimes, chosen by the separation `d` between source and target:
//!
//! | Condition | Regime | Force on source |
//! |-----------|--------|-----------------|
//! | `2r < d < rule.distance` | far field | `attraction / d * delta` |
//! | `d < 2r` | near field | `-0.01 * nucleus * (2r / d) * delta` |
//! | otherwise | none | zero |
//!
//! where `delta = target.position - source.position` and `r` is the
//! particle radius. The far field is an inverse-distance law, not
//! inverse-square. In the near field the target's velocity is also
//! replaced by a damped, jittered reflection.

use glam::Vec2;

use crate::jitter::Jitter;
use crate::particle::Particle;
use crate::params::GlobalParams;
use crate::rules::Rule;

/// Separations below this are treated as this value in the near field.
pub const MIN_SEPARATION: f32 = 1e-6;

/// Scale of the near-field repulsion.
const NUCLEUS_FORCE_SCALE: f32 = 0.01;

/// Outcome of evaluating one (source, target) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interaction {
    /// Velocity change for the source, before damping.
    pub force: Vec2,
    /// Replacement velocity for the target, set only by a collision.
    pub target_velocity: Option<Vec2>,
}

impl Interaction {
    pub const NONE: Interaction = Interaction {
        force: Vec2::ZERO,
        target_velocity: None,
    };
}

/// Compute the force `rule` exerts on `source` from `target`.
///
/// `jitter` is only drawn from when the pair collides; it scales the
/// target's reflected velocity per axis.
pub fn evaluate<J: Jitter + ?Sized>(
    source: &Particle,
    target: &Particle,
    rule: &Rule,
    params: &GlobalParams,
    jitter: &mut J,
) -> Interaction {
    let delta = target.position - source.position;
    let distance = delta.length();
    let contact = params.contact_distance();

    if distance > contact && distance < rule.distance {
        let magnitude = rule.attraction.resolve(params) / distance;
        Interaction {
            force: delta * magnitude,
            target_velocity: None,
        }
    } else if distance < contact {
        let separation = distance.max(MIN_SEPARATION);
        let magnitude = NUCLEUS_FORCE_SCALE * params.nucleus_repulsion * (contact / separation);
        let force = -delta * magnitude;
        let reflected = -(target.velocity + force) * params.damping() * jitter.collision();
        Interaction {
            force,
            target_velocity: Some(reflected),
        }
    } else {
        Interaction::NONE
    }
}

/// Apply a force to the source: damp, then move.
///
/// Runs once per pairwise interaction, so damping compounds with the
/// number of partners a particle has in a tick.
#[inline]
pub fn integrate(source: &mut Particle, force: Vec2, params: &GlobalParams) {
    source.velocity = (source.velocity + force) * params.damping();
    source.position += source.velocity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Group;
    use crate::jitter::NoJitter;
    use crate::rules::{Attraction, LiveParam};

    struct Fixed(Vec2);

    impl Jitter for Fixed {
        fn collision(&mut self) -> Vec2 {
            self.0
        }

        fn gravity_offset(&mut self) -> f32 {
            0.0
        }
    }

    const A: Group = Group::Species(0);
    const B: Group = Group::Species(1);

    fn at(x: f32, y: f32, group: Group) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, group)
    }

    fn frictionless() -> GlobalParams {
        GlobalParams {
            friction: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_far_field_inverse_distance() {
        let params = frictionless();
        let rule = Rule::new(A, B, 1000.0, 0.5);
        let source = at(0.0, 0.0, A);
        let target = at(30.0, 40.0, B);

        let result = evaluate(&source, &target, &rule, &params, &mut NoJitter);

        // |F| = a / d * |delta| = a
        assert!((result.force.length() - 0.5).abs() < 1e-6);
        assert!((result.force - Vec2::new(0.3, 0.4)).length() < 1e-6);
        assert_eq!(result.target_velocity, None);
    }

    #[test]
    fn test_negative_attraction_pushes_away() {
        let params = frictionless();
        let rule = Rule::new(A, B, 1000.0, -1.0);
        let result = evaluate(&at(0.0, 0.0, A), &at(10.0, 0.0, B), &rule, &params, &mut NoJitter);
        assert!(result.force.x < 0.0);
        assert_eq!(result.force.y, 0.0);
    }

    #[test]
    fn test_zero_attraction_is_zero_force() {
        let params = frictionless();
        let rule = Rule::new(A, B, 1000.0, 0.0);
        for x in [5.0, 50.0, 500.0, 999.0] {
            let result = evaluate(&at(0.0, 0.0, A), &at(x, 0.0, B), &rule, &params, &mut NoJitter);
            assert_eq!(result.force, Vec2::ZERO);
        }
    }

    #[test]
    fn test_beyond_cutoff_is_zero() {
        let params = frictionless();
        let rule = Rule::new(A, B, 100.0, 1.0);
        let result = evaluate(&at(0.0, 0.0, A), &at(100.0, 0.0, B), &rule, &params, &mut NoJitter);
        assert_eq!(result, Interaction::NONE);
    }

    #[test]
    fn test_exactly_at_contact_is_zero() {
        let params = frictionless();
        let rule = Rule::new(A, B, 100.0, 1.0);
        let result = evaluate(&at(0.0, 0.0, A), &at(4.0, 0.0, B), &rule, &params, &mut NoJitter);
        assert_eq!(result, Interaction::NONE);
    }

    #[test]
    fn test_near_field_repels_and_reflects_target() {
        let params = GlobalParams {
            friction: 0.0,
            nucleus_repulsion: 1.0,
            ..Default::default()
        };
        // Attraction and cutoff are ignored in the near field.
        let rule = Rule::new(A, B, 0.0, 1.0);
        let source = at(0.0, 0.0, A);
        let mut target = at(2.0, 0.0, B);
        target.velocity = Vec2::new(1.0, 0.5);

        let result = evaluate(&source, &target, &rule, &params, &mut NoJitter);

        // F = 0.01 * 1 * (4 / 2) = 0.02, force = -0.02 * (2, 0)
        assert!((result.force - Vec2::new(-0.04, 0.0)).length() < 1e-6);
        let reflected = result.target_velocity.unwrap();
        assert!((reflected - Vec2::new(-0.96, -0.5)).length() < 1e-6);
    }

    #[test]
    fn test_near_field_jitter_scales_reflection() {
        let params = frictionless();
        let rule = Rule::new(A, B, 100.0, 0.0);
        let mut target = at(1.0, 0.0, B);
        target.velocity = Vec2::new(0.0, 2.0);

        let result = evaluate(&at(0.0, 0.0, A), &target, &rule, &params, &mut Fixed(Vec2::new(1.0, 0.5)));
        let reflected = result.target_velocity.unwrap();
        assert!((reflected.y - -1.0).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_particles_stay_finite() {
        let params = GlobalParams::default();
        let rule = Rule::new(A, B, 100.0, 1.0);
        let mut target = at(10.0, 10.0, B);
        target.velocity = Vec2::new(0.5, 0.0);

        let result = evaluate(&at(10.0, 10.0, A), &target, &rule, &params, &mut NoJitter);

        assert_eq!(result.force, Vec2::ZERO);
        let reflected = result.target_velocity.unwrap();
        assert!(reflected.is_finite());
        assert!(reflected.x < 0.0);
    }

    #[test]
    fn test_live_gravity_attraction() {
        let params = GlobalParams {
            friction: 0.0,
            gravity_force: 0.2,
            ..Default::default()
        };
        let rule = Rule::new(A, Group::Gravity, f32::MAX, Attraction::Live(LiveParam::GravityForce));
        let gravity = at(0.0, 500.0, Group::Gravity);

        let result = evaluate(&at(0.0, 0.0, A), &gravity, &rule, &params, &mut NoJitter);
        assert!((result.force - Vec2::new(0.0, 0.2)).length() < 1e-6);
    }

    #[test]
    fn test_integrate_damps_then_moves() {
        let params = GlobalParams {
            friction: 1000.0,
            ..Default::default()
        };
        let mut p = at(10.0, 10.0, A);
        p.velocity = Vec2::new(1.0, 0.0);

        integrate(&mut p, Vec2::new(1.0, 2.0), &params);

        assert_eq!(p.velocity, Vec2::new(1.0, 1.0));
        assert_eq!(p.position, Vec2::new(11.0, 11.0));
    }
}
