//! Global tuning parameters.
//!
//! [`GlobalParams`] is read by every tick and may be edited between ticks
//! (control panel, pointer input). The engine never clamps these values;
//! [`GlobalParams::validate`] checks them against the control ranges when
//! they come from a config file.

use serde::{Deserialize, Serialize};

use crate::bounds::BoundaryMode;
use crate::error::ConfigError;

/// Live-mutable simulation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalParams {
    /// Whether ticks do any work.
    pub running: bool,
    /// Particle radius (1..5). Twice this is the collision distance.
    pub particle_radius: f32,
    /// Fraction of perpendicular velocity lost on a wall bounce (0..1).
    pub edge_damping: f32,
    /// Velocity damping per pairwise interaction, as `1 - friction / 2000` (0..1000).
    pub friction: f32,
    /// Strength of the near-field collision push (0..1).
    pub nucleus_repulsion: f32,
    /// Inset of the container from each canvas edge, percent of the half size (0..100).
    pub margin_percent: f32,
    /// Interact with the pointer pseudo-particle.
    pub pointer_interaction: bool,
    /// Interact with the gravity pseudo-particle.
    pub gravity_enabled: bool,
    /// Attraction of every species toward the gravity pseudo-particle (0..1).
    pub gravity_force: f32,
    /// Opacity of the black fill drawn at the start of each frame (0..1).
    pub background_opacity: f32,
    /// What happens at the container edges.
    pub boundary: BoundaryMode,
}

impl GlobalParams {
    /// Velocity multiplier applied after each pairwise interaction.
    #[inline]
    pub fn damping(&self) -> f32 {
        1.0 - self.friction / 2000.0
    }

    /// Separation below which two particles collide.
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        self.particle_radius * 2.0
    }

    /// Check every field against its control range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("particle_radius", self.particle_radius, 1.0, 5.0)?;
        check_range("edge_damping", self.edge_damping, 0.0, 1.0)?;
        check_range("friction", self.friction, 0.0, 1000.0)?;
        check_range("nucleus_repulsion", self.nucleus_repulsion, 0.0, 1.0)?;
        check_range("margin_percent", self.margin_percent, 0.0, 100.0)?;
        check_range("gravity_force", self.gravity_force, 0.0, 1.0)?;
        check_range("background_opacity", self.background_opacity, 0.0, 1.0)?;
        Ok(())
    }
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            running: false,
            particle_radius: 2.0,
            edge_damping: 0.0,
            friction: 50.0,
            nucleus_repulsion: 0.5,
            margin_percent: 0.0,
            pointer_interaction: false,
            gravity_enabled: false,
            gravity_force: 0.1,
            background_opacity: 1.0,
            boundary: BoundaryMode::Bounce,
        }
    }
}

fn check_range(field: &str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} = {} is outside {}..={}",
            field, value, min, max
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = GlobalParams::default();
        assert!(params.validate().is_ok());
        assert!(!params.running);
        assert_eq!(params.contact_distance(), 4.0);
        assert_eq!(params.damping(), 0.975);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let params = GlobalParams {
            friction: 1500.0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("friction"));

        let params = GlobalParams {
            particle_radius: f32::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let params: GlobalParams = serde_json::from_str(r#"{ "running": true, "friction": 0.0 }"#).unwrap();
        assert!(params.running);
        assert_eq!(params.friction, 0.0);
        assert_eq!(params.particle_radius, 2.0);
        assert_eq!(params.boundary, BoundaryMode::Bounce);
    }
}
