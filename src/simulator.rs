//! The simulation engine.
//!
//! [`Simulator`] owns the particles, the global parameters, the rule table
//! and the pointer state, and advances everything by one [`tick`] per
//! frame. It is idle while [`GlobalParams::running`] is false.
//!
//! One tick, for every particle `p1` in order:
//!
//! 1. interact with every other particle `p2` (skipping itself)
//! 2. interact with a gravity pseudo-particle at the bottom of the canvas,
//!    directly below `p1`, if gravity is enabled
//! 3. interact with a pointer pseudo-particle, if pointer interaction is enabled
//! 4. keep `p1` inside the container
//!
//! Each interaction looks up the `(p1, p2)` rule, evaluates the force and
//! integrates `p1` immediately; pairs without a rule are skipped.
//!
//! [`tick`]: Simulator::tick

use glam::Vec2;
use rand::Rng;

use crate::bounds::Bounds;
use crate::force;
use crate::group::{Group, Groups};
use crate::input::{PointerEvent, PointerState};
use crate::jitter::{Jitter, RandomJitter};
use crate::params::GlobalParams;
use crate::particle::{self, Particle};
use crate::rules::RuleTable;

/// Particle state plus everything a tick reads.
pub struct Simulator {
    particles: Vec<Particle>,
    params: GlobalParams,
    rules: RuleTable,
    groups: Groups,
    pointer: PointerState,
    width: f32,
    height: f32,
    jitter: Box<dyn Jitter>,
    frame: u64,
}

impl Simulator {
    /// Spawn every group into a `width` x `height` canvas with the stock
    /// rule set and default parameters.
    pub fn spawn<R: Rng + ?Sized>(groups: Groups, width: f32, height: f32, rng: &mut R) -> Self {
        let particles = particle::spawn(&groups, width, height, rng);
        let rules = RuleTable::with_defaults(groups.len() as u32);
        log::info!(
            "Spawned {} particles in {} groups on a {}x{} canvas",
            particles.len(),
            groups.len(),
            width,
            height
        );
        Self::from_parts(groups, particles, rules, GlobalParams::default(), width, height)
    }

    /// Assemble a simulator from existing state.
    pub fn from_parts(
        groups: Groups,
        particles: Vec<Particle>,
        rules: RuleTable,
        params: GlobalParams,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            particles,
            params,
            rules,
            groups,
            pointer: PointerState::default(),
            width,
            height,
            jitter: Box::new(RandomJitter::from_entropy()),
            frame: 0,
        }
    }

    /// Replace the source of collision and gravity jitter.
    pub fn with_jitter(mut self, jitter: impl Jitter + 'static) -> Self {
        self.jitter = Box::new(jitter);
        self
    }

    pub fn with_params(mut self, params: GlobalParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn set_jitter(&mut self, jitter: impl Jitter + 'static) {
        self.jitter = Box::new(jitter);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn params(&self) -> &GlobalParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut GlobalParams {
        &mut self.params
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleTable {
        &mut self.rules
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// The container for the current canvas size and margin.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_params(self.width, self.height, &self.params)
    }

    /// Number of ticks that did work.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_running(&self) -> bool {
        self.params.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.params.running = running;
    }

    /// Change the canvas size. Particles outside the new container are
    /// brought back in by the next tick.
    pub fn resize(&mut self, width: f32, height: f32) {
        log::debug!("Canvas resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    /// Move the pointer pseudo-particle.
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer.position = position;
    }

    /// Apply pointer input: moves update the position, press and release
    /// switch pointer interaction on and off.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved(position) => self.set_pointer(position),
            PointerEvent::Pressed => self.params.pointer_interaction = true,
            PointerEvent::Released => self.params.pointer_interaction = false,
        }
    }

    /// Advance one frame if running. Returns whether any work was done.
    pub fn tick(&mut self) -> bool {
        if !self.params.running {
            return false;
        }
        self.step();
        true
    }

    /// Advance one frame regardless of the running flag.
    pub fn step(&mut self) {
        let Self {
            particles,
            params,
            rules,
            pointer,
            width,
            height,
            jitter,
            frame,
            ..
        } = self;
        let jitter = &mut **jitter;
        let bounds = Bounds::from_params(*width, *height, params);
        let count = particles.len();

        for i in 0..count {
            let mut source = particles[i];

            for (j, target) in particles.iter_mut().enumerate() {
                if i == j {
                    continue;
                }
                interact(&mut source, target, rules, params, jitter);
            }

            if params.gravity_enabled {
                let mut well = Particle::pseudo(
                    Vec2::new(source.position.x + jitter.gravity_offset(), *height),
                    Vec2::new(0.0, params.gravity_force),
                    Group::Gravity,
                );
                interact(&mut source, &mut well, rules, params, jitter);
            }

            if params.pointer_interaction {
                let mut cursor = Particle::pseudo(pointer.position, Vec2::ZERO, Group::Pointer);
                interact(&mut source, &mut cursor, rules, params, jitter);
            }

            bounds.apply(&mut source, params.boundary, params.edge_damping);
            particles[i] = source;
        }

        *frame += 1;
    }
}

/// One pairwise interaction: look up the rule, evaluate, integrate.
fn interact(
    source: &mut Particle,
    target: &mut Particle,
    rules: &RuleTable,
    params: &GlobalParams,
    jitter: &mut dyn Jitter,
) {
    let Some(rule) = rules.lookup(source.group, target.group) else {
        return;
    };
    let result = force::evaluate(source, target, rule, params, jitter);
    if let Some(velocity) = result.target_velocity {
        target.velocity = velocity;
    }
    force::integrate(source, result.force, params);
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("particles", &self.particles.len())
            .field("groups", &self.groups.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frame", &self.frame)
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::NoJitter;
    use crate::rules::{Attraction, Rule};

    const A: Group = Group::Species(0);
    const B: Group = Group::Species(1);

    fn two_groups() -> Groups {
        let mut groups = Groups::new();
        groups.add("a", 0);
        groups.add("b", 0);
        groups
    }

    fn sim_with(particles: Vec<Particle>, rules: RuleTable, params: GlobalParams) -> Simulator {
        Simulator::from_parts(two_groups(), particles, rules, params, 1000.0, 1000.0).with_jitter(NoJitter)
    }

    fn running_frictionless() -> GlobalParams {
        GlobalParams {
            running: true,
            friction: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut rng = rand::thread_rng();
        let mut sim = Simulator::spawn(Groups::numbered(2, 20), 300.0, 200.0, &mut rng);
        sim.rules_mut().set_all(500.0, 1.0);
        let before = sim.particles().to_vec();

        for _ in 0..10 {
            assert!(!sim.tick());
        }

        assert_eq!(sim.particles(), &before[..]);
        assert_eq!(sim.frame(), 0);
    }

    #[test]
    fn test_missing_rule_skips_pair() {
        let particles = vec![
            Particle::new(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), A),
            Particle::new(Vec2::new(150.0, 100.0), Vec2::ZERO, B),
        ];
        let mut sim = sim_with(particles, RuleTable::new(2), running_frictionless());

        sim.tick();

        // No rules at all: nothing integrates, not even the existing velocity.
        assert_eq!(sim.particles()[0].position, Vec2::new(100.0, 100.0));
        assert_eq!(sim.particles()[1].position, Vec2::new(150.0, 100.0));
    }

    #[test]
    fn test_zero_force_pair_still_damps_and_moves() {
        let particles = vec![
            Particle::new(Vec2::new(100.0, 100.0), Vec2::new(2.0, 0.0), A),
            Particle::new(Vec2::new(600.0, 100.0), Vec2::ZERO, B),
        ];
        let mut rules = RuleTable::new(2);
        rules.set(Rule::new(A, B, 10.0, 1.0));
        let params = GlobalParams {
            running: true,
            friction: 1000.0,
            ..Default::default()
        };
        let mut sim = sim_with(particles, rules, params);

        sim.tick();

        let p = sim.particles()[0];
        assert_eq!(p.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(p.position, Vec2::new(101.0, 100.0));
    }

    #[test]
    fn test_friction_compounds_per_partner() {
        let particles = vec![
            Particle::new(Vec2::new(100.0, 100.0), Vec2::new(4.0, 0.0), A),
            Particle::new(Vec2::new(900.0, 900.0), Vec2::ZERO, B),
            Particle::new(Vec2::new(900.0, 100.0), Vec2::ZERO, B),
        ];
        let mut rules = RuleTable::new(2);
        rules.set(Rule::new(A, B, 1.0, 0.0));
        let params = GlobalParams {
            running: true,
            friction: 1000.0,
            ..Default::default()
        };
        let mut sim = sim_with(particles, rules, params);

        sim.tick();

        // Two partners, each halves the velocity.
        assert_eq!(sim.particles()[0].velocity, Vec2::new(1.0, 0.0));
        assert_eq!(sim.particles()[0].position, Vec2::new(103.0, 100.0));
    }

    #[test]
    fn test_pointer_pseudo_particle() {
        let particles = vec![Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, A)];
        let mut rules = RuleTable::new(2);
        rules.set(Rule::new(A, Group::Pointer, 500.0, 1.0));
        let mut sim = sim_with(particles, rules, running_frictionless());

        sim.handle_pointer(PointerEvent::Moved(Vec2::new(100.0, 300.0)));
        sim.tick();
        assert_eq!(sim.particles()[0].velocity, Vec2::ZERO);

        sim.handle_pointer(PointerEvent::Pressed);
        assert!(sim.params().pointer_interaction);
        sim.tick();
        assert!((sim.particles()[0].velocity - Vec2::new(0.0, 1.0)).length() < 1e-6);

        sim.handle_pointer(PointerEvent::Released);
        assert!(!sim.params().pointer_interaction);
    }

    #[test]
    fn test_gravity_pulls_down_and_tracks_force() {
        let particles = vec![Particle::new(Vec2::new(500.0, 200.0), Vec2::ZERO, A)];
        let rules = RuleTable::with_defaults(2);
        let params = GlobalParams {
            gravity_enabled: true,
            gravity_force: 0.5,
            ..running_frictionless()
        };
        let mut sim = sim_with(particles, rules, params);

        sim.tick();
        assert!((sim.particles()[0].velocity - Vec2::new(0.0, 0.5)).length() < 1e-5);

        sim.params_mut().gravity_force = 0.25;
        sim.tick();
        assert!((sim.particles()[0].velocity - Vec2::new(0.0, 0.75)).length() < 1e-5);
    }

    #[test]
    fn test_collision_reflects_target() {
        let particles = vec![
            Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, A),
            Particle::new(Vec2::new(102.0, 100.0), Vec2::new(0.0, 1.0), B),
        ];
        let mut rules = RuleTable::new(2);
        rules.set(Rule::new(A, B, 100.0, Attraction::Constant(0.0)));
        let mut sim = sim_with(particles, rules, running_frictionless());

        sim.tick();

        // The target's upward velocity was inverted by the collision.
        assert!(sim.particles()[1].velocity.y < 0.0);
        // The source was pushed away from the target.
        assert!(sim.particles()[0].velocity.x < 0.0);
    }

    #[test]
    fn test_resize_and_bounds() {
        let particles = vec![Particle::new(Vec2::new(900.0, 900.0), Vec2::ZERO, A)];
        let mut sim = sim_with(particles, RuleTable::new(2), running_frictionless());

        sim.resize(400.0, 300.0);
        sim.tick();

        assert_eq!(sim.canvas_size(), Vec2::new(400.0, 300.0));
        assert_eq!(sim.particles()[0].position, Vec2::new(400.0, 300.0));
        assert!(sim.bounds().contains(sim.particles()[0].position));
    }
}
