//! # plife - Particle Life
//!
//! Interactive 2D particle life: groups of point particles pull and push on
//! each other according to a table of per-pair rules, inside a bouncing (or
//! wrapping) container, with an optional pointer-controlled attractor and
//! an optional gravity well along the bottom edge.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plife::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new()
//!         .with_group("Red", 400, "#FF3030")
//!         .with_group("Green", 400, "#30FF30")
//!         .with_rule(Rule::new(Group::Species(0), Group::Species(1), 200.0, 0.3))
//!         .with_rule(Rule::new(Group::Species(1), Group::Species(0), 120.0, -0.5))
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Groups
//!
//! Every particle belongs to a [`Group`]. Real groups are particle
//! populations; [`Group::Pointer`] and [`Group::Gravity`] are targets that
//! exist only while a tick evaluates them. Use [`Species`] derive to name a
//! set of groups with an enum:
//!
//! ```ignore
//! #[derive(Species, Clone, Copy, PartialEq, Debug)]
//! enum Swarm {
//!     #[species(color = "#FF18C8")]
//!     Hunter,
//!     Prey,
//! }
//!
//! Simulation::new().with_species::<Swarm>(500);
//! ```
//!
//! ### Rules
//!
//! A [`Rule`] holds a cutoff distance and a signed attraction for one
//! ordered `(source, target)` pair. Between twice the particle radius and
//! the cutoff the source accelerates toward the target by
//! `attraction / d` per unit of separation. Closer than twice the radius,
//! a repulsive collision regime takes over. Pairs without a rule do not
//! interact.
//!
//! ### Ticks
//!
//! [`Simulator::tick`] advances one frame when [`GlobalParams::running`] is
//! set. It is exact O(n²): every particle against every other, then the
//! gravity well, then the pointer, then the container walls.
//!
//! ## Headless Use
//!
//! ```ignore
//! let mut sim = Simulation::new().with_seed(42).build();
//! sim.set_running(true);
//! for _ in 0..100 {
//!     sim.tick();
//! }
//! ```

// Lets `#[derive(Species)]` refer to `plife::...` from inside this crate.
extern crate self as plife;

pub mod bounds;
pub mod config;
pub mod error;
pub mod force;
mod gpu;
pub mod group;
pub mod input;
pub mod jitter;
#[cfg(feature = "egui")]
pub mod panel;
pub mod params;
pub mod particle;
pub mod randomizer;
pub mod render;
pub mod rules;
mod simulation;
pub mod simulator;

pub use bounds::{BoundaryMode, Bounds};
pub use config::{GroupConfig, SimConfig};
pub use error::{ConfigError, GpuError, SimulationError};
pub use glam::{Vec2, Vec3};
pub use group::{Group, GroupInfo, Groups, Species};
pub use jitter::{Jitter, NoJitter, RandomJitter};
pub use params::GlobalParams;
pub use particle::Particle;
pub use plife_derive::Species;
pub use randomizer::RuleRandomizer;
pub use render::{draw_frame, ColorTheme, RenderTarget, ShapeBatch};
pub use rules::{Attraction, LiveParam, Rule, RuleTable};
pub use simulation::Simulation;
pub use simulator::Simulator;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use plife::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bounds::BoundaryMode;
    pub use crate::config::SimConfig;
    pub use crate::error::SimulationError;
    pub use crate::group::{Group, Groups, Species};
    pub use crate::params::GlobalParams;
    pub use crate::render::ColorTheme;
    pub use crate::rules::{Attraction, Rule, RuleTable};
    pub use crate::simulation::Simulation;
    pub use crate::simulator::Simulator;
    pub use crate::{Vec2, Vec3};
    pub use plife_derive::Species;
    #[cfg(feature = "egui")]
    pub use egui;
}
