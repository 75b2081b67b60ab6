//! Particle groups.
//!
//! Every particle belongs to a [`Group`]. Real groups ("species") are
//! populations of stored particles; the two pseudo groups, [`Group::Pointer`]
//! and [`Group::Gravity`], only ever appear as interaction targets for
//! transient particles built during a tick.
//!
//! # Example
//!
//! ```ignore
//! let mut groups = Groups::new();
//! let red = groups.add("Red", 500);
//! let blue = groups.add("Blue", 200);
//!
//! assert_eq!(groups.name(red), "Red");
//! assert_eq!(groups.total_particles(), 700);
//! ```

use serde::{Deserialize, Serialize};

/// Number of particles spawned per group unless configured otherwise.
pub const DEFAULT_PARTICLES_PER_GROUP: u32 = 300;

/// Identifier of a particle population or a synthetic interaction target.
///
/// Groups are compared by equality only; they have no ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// A real particle population, indexed from 0.
    Species(u32),
    /// The pointer-controlled pseudo-particle.
    Pointer,
    /// The uniform gravity pseudo-particle.
    Gravity,
}

impl Group {
    /// Species index, or `None` for the pseudo groups.
    pub fn species(self) -> Option<u32> {
        match self {
            Group::Species(index) => Some(index),
            Group::Pointer | Group::Gravity => None,
        }
    }

    /// Whether this group is one of the synthetic targets.
    pub fn is_pseudo(self) -> bool {
        self.species().is_none()
    }
}

/// Trait automatically implemented by `#[derive(Species)]`.
///
/// Lets a unit enum stand in for a set of particle groups.
///
/// ```ignore
/// #[derive(Species, Clone, Copy, PartialEq, Debug)]
/// enum Swarm { Red, Green, Blue }
///
/// let groups = Groups::from_species::<Swarm>(300);
/// let rule = table.lookup(Swarm::Red.into(), Swarm::Blue.into());
/// ```
pub trait Species: Copy + 'static {
    /// Display name of every variant, in index order.
    const NAMES: &'static [&'static str];

    /// Optional `#RRGGBB` color of every variant, in index order.
    const COLORS: &'static [Option<&'static str>];

    /// Species index of this variant.
    fn index(self) -> u32;

    /// Variant for a species index.
    fn from_index(index: u32) -> Option<Self>;

    /// Number of variants.
    fn count() -> u32 {
        Self::NAMES.len() as u32
    }
}

/// Name and population size of one real group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub name: String,
    pub count: u32,
}

/// Ordered registry of the real groups in a simulation.
///
/// The position of a group in the registry is its species index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Groups {
    groups: Vec<GroupInfo>,
}

impl Groups {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// `"Group 1"`, `"Group 2"`, ... each with `count` particles.
    pub fn numbered(len: u32, count: u32) -> Self {
        let mut groups = Self::new();
        for i in 0..len {
            groups.add(format!("Group {}", i + 1), count);
        }
        groups
    }

    /// One group per variant of a `#[derive(Species)]` enum.
    pub fn from_species<S: Species>(count: u32) -> Self {
        let mut groups = Self::new();
        for name in S::NAMES {
            groups.add(*name, count);
        }
        groups
    }

    /// Register a new group and return its identifier.
    pub fn add(&mut self, name: impl Into<String>, count: u32) -> Group {
        let index = self.groups.len() as u32;
        self.groups.push(GroupInfo {
            name: name.into(),
            count,
        });
        Group::Species(index)
    }

    /// Number of real groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up a real group's info. Pseudo groups return `None`.
    pub fn get(&self, group: Group) -> Option<&GroupInfo> {
        group
            .species()
            .and_then(|index| self.groups.get(index as usize))
    }

    /// Change how many particles a group spawns with.
    pub fn set_count(&mut self, group: Group, count: u32) {
        if let Some(index) = group.species() {
            if let Some(info) = self.groups.get_mut(index as usize) {
                info.count = count;
            }
        }
    }

    /// Display name for any group, including the pseudo groups.
    pub fn name(&self, group: Group) -> &str {
        match group {
            Group::Pointer => "pointer",
            Group::Gravity => "gravity",
            Group::Species(_) => self.get(group).map_or("unknown", |info| info.name.as_str()),
        }
    }

    /// Real groups paired with their info, in species order.
    pub fn iter(&self) -> impl Iterator<Item = (Group, &GroupInfo)> {
        self.groups
            .iter()
            .enumerate()
            .map(|(i, info)| (Group::Species(i as u32), info))
    }

    /// Sum of all group populations.
    pub fn total_particles(&self) -> usize {
        self.groups.iter().map(|g| g.count as usize).sum()
    }
}

impl Default for Groups {
    fn default() -> Self {
        Self::numbered(3, DEFAULT_PARTICLES_PER_GROUP)
    }
}
