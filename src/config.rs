//! Simulation config files.
//!
//! A [`SimConfig`] is a complete, serializable description of a run:
//! canvas size, groups with their colors, global parameters and,
//! optionally, an explicit rule list. Configs are stored as pretty-printed
//! JSON.
//!
//! ```ignore
//! let config = SimConfig::load("swarm.json")?;
//! let (sim, theme) = config.into_simulator()?;
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::group::{Group, Groups, DEFAULT_PARTICLES_PER_GROUP};
use crate::params::GlobalParams;
use crate::render::{parse_hex, to_hex, ColorTheme};
use crate::rules::{Rule, RuleTable};
use crate::simulation::Simulation;
use crate::simulator::Simulator;

fn default_count() -> u32 {
    DEFAULT_PARTICLES_PER_GROUP
}

/// One real group in a config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    #[serde(default = "default_count")]
    pub count: u32,
    /// `#RRGGBB`. Falls back to the default palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl GroupConfig {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Serializable description of a simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub name: String,
    pub width: f32,
    pub height: f32,
    /// Seeds spawning and jitter. `None` draws from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub groups: Vec<GroupConfig>,
    pub params: GlobalParams,
    /// Explicit rules. `None` uses the stock rule set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
}

impl Default for SimConfig {
    fn default() -> Self {
        let theme = ColorTheme::default();
        Self {
            name: "Particle Life".into(),
            width: 1280.0,
            height: 720.0,
            seed: None,
            groups: (0..3)
                .map(|i| {
                    GroupConfig::new(format!("Group {}", i + 1), DEFAULT_PARTICLES_PER_GROUP)
                        .with_color(to_hex(theme.groups[i]))
                })
                .collect(),
            params: GlobalParams::default(),
            rules: None,
        }
    }
}

impl SimConfig {
    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Saved config '{}' to {}", self.name, path.display());
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configs the engine could run but the viewer could not show.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas size {}x{} must be positive",
                self.width, self.height
            )));
        }
        for group in &self.groups {
            if let Some(color) = &group.color {
                if parse_hex(color).is_none() {
                    return Err(ConfigError::Invalid(format!(
                        "group '{}' has malformed color '{}'",
                        group.name, color
                    )));
                }
            }
        }
        self.params.validate()
    }

    /// Group registry in config order.
    pub fn groups(&self) -> Groups {
        let mut groups = Groups::new();
        for group in &self.groups {
            groups.add(group.name.clone(), group.count);
        }
        groups
    }

    /// Colors of the configured groups.
    pub fn theme(&self) -> ColorTheme {
        let mut theme = ColorTheme::with_palette(self.groups.len());
        for (i, group) in self.groups.iter().enumerate() {
            if let Some(color) = group.color.as_deref().and_then(parse_hex) {
                theme.set_color(Group::Species(i as u32), color);
            }
        }
        theme
    }

    /// The rule table this config describes.
    ///
    /// With an explicit rule list only the listed pairs interact.
    pub fn rule_table(&self) -> Result<RuleTable, ConfigError> {
        let species = self.groups.len() as u32;
        let Some(rules) = &self.rules else {
            return Ok(RuleTable::with_defaults(species));
        };
        let mut table = RuleTable::new(species);
        for rule in rules {
            for group in [rule.source, rule.target] {
                if let Group::Species(index) = group {
                    if index >= species {
                        return Err(ConfigError::Invalid(format!(
                            "rule refers to species {} but only {} groups are configured",
                            index, species
                        )));
                    }
                }
            }
            if rule.distance.is_nan() || rule.distance < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "rule {:?} -> {:?} has distance {}, expected a non-negative number",
                    rule.source, rule.target, rule.distance
                )));
            }
            if rule.source.is_pseudo() {
                return Err(ConfigError::Invalid(format!(
                    "rule source must be a species, got {:?}",
                    rule.source
                )));
            }
            table.set(*rule);
        }
        Ok(table)
    }

    /// Snapshot a running simulation. Particle state is not saved.
    pub fn capture(sim: &Simulator, theme: &ColorTheme) -> Self {
        let size = sim.canvas_size();
        Self {
            name: "Particle Life".into(),
            width: size.x,
            height: size.y,
            seed: None,
            groups: sim
                .groups()
                .iter()
                .map(|(group, info)| GroupConfig {
                    name: info.name.clone(),
                    count: info.count,
                    color: theme.color(group).map(to_hex),
                })
                .collect(),
            params: sim.params().clone(),
            rules: Some(sim.rules().iter().copied().collect()),
        }
    }

    /// Spawn a simulator and its color theme.
    pub fn into_simulator(self) -> Result<(Simulator, ColorTheme), ConfigError> {
        Ok(Simulation::from_config(self)?.build_with_theme())
    }
}
