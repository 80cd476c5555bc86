//! Simulation settings
//!
//! Loaded from JSON. Every field has a default, so a settings file only needs
//! the values it wants to override.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::DEFAULT_PLACEMENT_ATTEMPTS;
use crate::error::{SimError, SimResult};
use crate::sim::{FlockingSettings, SeparationPolicy, WallReflection};

/// Runtime settings for a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// How overlapping bodies are pushed apart
    pub separation: SeparationPolicy,
    /// How wall contacts change velocity
    pub wall_reflection: WallReflection,
    /// Clamp bodies back inside the boundary after integrating
    pub contain_after_integration: bool,
    /// Placement attempts per body before construction fails
    pub max_placement_attempts: u32,
    /// Tuning for boid/predator bodies
    pub flocking: FlockingSettings,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            separation: SeparationPolicy::AlongVelocity,
            wall_reflection: WallReflection::Negate,
            contain_after_integration: true,
            max_placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            flocking: FlockingSettings::default(),
        }
    }
}

impl WorldSettings {
    /// Parse and validate settings from a JSON string
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is in range
    pub fn validate(&self) -> SimResult<()> {
        if self.max_placement_attempts == 0 {
            return Err(SimError::Settings(
                "max_placement_attempts must be at least 1".into(),
            ));
        }

        let f = &self.flocking;
        let positive = [
            ("flocking.max_speed", f.max_speed),
            ("flocking.max_force", f.max_force),
            ("flocking.flee_force", f.flee_force),
            ("flocking.cohesion_radius", f.cohesion_radius),
            ("flocking.separation_radius", f.separation_radius),
            ("flocking.alignment_radius", f.alignment_radius),
            ("flocking.flee_radius", f.flee_radius),
            ("flocking.view_half_angle", f.view_half_angle),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::Settings(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        let weights = [
            ("flocking.cohesion_weight", f.cohesion_weight),
            ("flocking.separation_weight", f.separation_weight),
            ("flocking.alignment_weight", f.alignment_weight),
            ("flocking.flee_weight", f.flee_weight),
            ("flocking.predator_chase_weight", f.predator_chase_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() {
                return Err(SimError::Settings(format!("{name} must be finite")));
            }
        }

        Ok(())
    }
}
