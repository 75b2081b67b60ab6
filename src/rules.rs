//! Interaction rules.
//!
//! A [`Rule`] says how strongly particles of a source group are pulled
//! toward (or pushed away from) particles of a target group, and up to what
//! distance. The [`RuleTable`] holds one rule per ordered
//! `(species, target)` pair, where the target is any species or one of the
//! pseudo groups.
//!
//! # Example
//!
//! ```ignore
//! let mut table = RuleTable::with_defaults(3);
//!
//! // Group 1 chases Group 2 within 250 px, Group 2 flees.
//! table.set(Rule::new(Group::Species(0), Group::Species(1), 250.0, 0.4));
//! table.set(Rule::new(Group::Species(1), Group::Species(0), 180.0, -0.6));
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::group::Group;
use crate::params::GlobalParams;

/// Upper bound of randomized rule distances.
pub const MAX_RULE_DISTANCE: f32 = 1000.0;

/// Default cutoff distance of species and pointer rules.
pub const DEFAULT_RULE_DISTANCE: f32 = 100.0;

/// A parameter an [`Attraction`] can track instead of holding a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveParam {
    /// [`GlobalParams::gravity_force`].
    GravityForce,
}

impl LiveParam {
    fn read(self, params: &GlobalParams) -> f32 {
        match self {
            LiveParam::GravityForce => params.gravity_force,
        }
    }
}

/// Signed attraction strength of a rule.
///
/// Positive pulls the source toward the target, negative pushes it away.
/// Nominally in `[-1, 1]` but never clamped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attraction {
    Constant(f32),
    /// Re-read from the global parameters every time the rule is evaluated.
    Live(LiveParam),
}

impl Attraction {
    /// The strength in effect for the current parameters.
    #[inline]
    pub fn resolve(&self, params: &GlobalParams) -> f32 {
        match *self {
            Attraction::Constant(value) => value,
            Attraction::Live(param) => param.read(params),
        }
    }
}

impl From<f32> for Attraction {
    fn from(value: f32) -> Self {
        Attraction::Constant(value)
    }
}

/// Interaction between an ordered pair of groups.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub source: Group,
    pub target: Group,
    /// Cutoff radius of the far-field force. Never negative.
    pub distance: f32,
    pub attraction: Attraction,
}

impl Rule {
    pub fn new(source: Group, target: Group, distance: f32, attraction: impl Into<Attraction>) -> Self {
        Self {
            source,
            target,
            distance: distance.max(0.0),
            attraction: attraction.into(),
        }
    }
}

/// One rule slot per ordered `(species, target)` pair.
///
/// Slots are laid out as a flattened matrix with `species + 2` columns: one
/// per species, then pointer, then gravity. A slot may be empty, in which
/// case the pair does not interact.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleTable {
    /// Flattened matrix: `[source * columns + target]`.
    slots: Vec<Option<Rule>>,
    species: u32,
}

impl RuleTable {
    /// Create a table for `species` groups with every slot empty.
    pub fn new(species: u32) -> Self {
        let columns = species as usize + 2;
        Self {
            slots: vec![None; species as usize * columns],
            species,
        }
    }

    /// Create a table with the stock rule set.
    ///
    /// - species → species: distance 100, attraction 0
    /// - species → pointer: distance 100, attraction 0
    /// - species → gravity: unlimited distance, attraction tracks the gravity force
    pub fn with_defaults(species: u32) -> Self {
        let mut table = Self::new(species);
        for s in 0..species {
            let source = Group::Species(s);
            for t in 0..species {
                table.set(Rule::new(source, Group::Species(t), DEFAULT_RULE_DISTANCE, 0.0));
            }
            table.set(Rule::new(source, Group::Pointer, DEFAULT_RULE_DISTANCE, 0.0));
            table.set(Rule::new(
                source,
                Group::Gravity,
                f32::MAX,
                Attraction::Live(LiveParam::GravityForce),
            ));
        }
        table
    }

    /// Number of species this table covers.
    pub fn species_count(&self) -> u32 {
        self.species
    }

    fn columns(&self) -> usize {
        self.species as usize + 2
    }

    fn slot_index(&self, source: Group, target: Group) -> Option<usize> {
        let s = source.species().filter(|&s| s < self.species)? as usize;
        let t = match target {
            Group::Species(t) if t < self.species => t as usize,
            Group::Species(_) => return None,
            Group::Pointer => self.species as usize,
            Group::Gravity => self.species as usize + 1,
        };
        Some(s * self.columns() + t)
    }

    /// Exact match on the ordered pair. `None` means no interaction.
    #[inline]
    pub fn lookup(&self, source: Group, target: Group) -> Option<&Rule> {
        self.slot_index(source, target)
            .and_then(|i| self.slots[i].as_ref())
    }

    pub fn get_mut(&mut self, source: Group, target: Group) -> Option<&mut Rule> {
        self.slot_index(source, target)
            .and_then(move |i| self.slots[i].as_mut())
    }

    /// Store a rule in its pair's slot, replacing any previous one.
    ///
    /// Rules whose source is not a species of this table are ignored.
    pub fn set(&mut self, rule: Rule) {
        if let Some(i) = self.slot_index(rule.source, rule.target) {
            self.slots[i] = Some(rule);
        }
    }

    /// Clear a pair's slot so the pair stops interacting.
    pub fn remove(&mut self, source: Group, target: Group) -> Option<Rule> {
        self.slot_index(source, target)
            .and_then(|i| self.slots[i].take())
    }

    /// Overwrite distance and attraction of every stored rule.
    pub fn set_all(&mut self, distance: f32, attraction: impl Into<Attraction>) {
        let attraction = attraction.into();
        for rule in self.iter_mut() {
            rule.distance = distance.max(0.0);
            rule.attraction = attraction;
        }
    }

    /// Give every stored rule a random distance and attraction.
    ///
    /// Distances are whole numbers uniform in `[0, 1000]`, attractions are
    /// uniform in `[-1, 1)`. Live attractions become constants.
    pub fn randomize_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for rule in self.iter_mut() {
            rule.distance = (rng.gen::<f32>() * MAX_RULE_DISTANCE).round();
            rule.attraction = Attraction::Constant(rng.gen::<f32>() * 2.0 - 1.0);
        }
    }

    /// Stored rules in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Rule> {
        self.slots.iter_mut().flatten()
    }

    /// Stored rules whose source is `source`, in target order.
    pub fn rules_for(&self, source: Group) -> impl Iterator<Item = &Rule> {
        self.iter().filter(move |r| r.source == source)
    }

    /// Number of stored rules.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
