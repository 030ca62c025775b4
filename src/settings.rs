//! Table settings
//!
//! The host UI adjusts a single tunable, the shot power ceiling. Everything is
//! validated here so that out-of-range values never reach the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CUE_POWER, MAX_CUE_POWER};
use crate::error::ConfigError;

/// Which way a released shot travels relative to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShotDirection {
    /// Cue ball travels toward the pointer
    #[default]
    TowardPointer,
    /// Cue ball travels away from the pointer (pull-back style)
    AwayFromPointer,
}

impl ShotDirection {
    /// Multiplier applied to the aim direction
    pub fn sign(&self) -> f32 {
        match self {
            ShotDirection::TowardPointer => 1.0,
            ShotDirection::AwayFromPointer => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotDirection::TowardPointer => "toward",
            ShotDirection::AwayFromPointer => "away",
        }
    }
}

/// Table settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shot power ceiling
    pub cue_power: f32,
    /// Power the cue resets to after each shot (defaults to the ceiling)
    pub baseline_power: Option<f32>,
    /// Shot direction convention
    pub shot_direction: ShotDirection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cue_power: DEFAULT_CUE_POWER,
            baseline_power: None,
            shot_direction: ShotDirection::TowardPointer,
        }
    }
}

impl Settings {
    /// Settings with the given ceiling, validated
    pub fn with_cue_power(cue_power: f32) -> Result<Self, ConfigError> {
        let settings = Self {
            cue_power,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Copy with a new ceiling. A configured baseline above it is pulled down to it.
    pub fn with_ceiling(&self, cue_power: f32) -> Result<Self, ConfigError> {
        let settings = Self {
            cue_power,
            baseline_power: self.baseline_power.map(|b| b.min(cue_power)),
            ..self.clone()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cue_power.is_finite() || self.cue_power <= 0.0 {
            return Err(ConfigError::NonPositivePower(self.cue_power));
        }
        if self.cue_power > MAX_CUE_POWER {
            return Err(ConfigError::PowerAboveMax {
                power: self.cue_power,
                max: MAX_CUE_POWER,
            });
        }
        if let Some(baseline) = self.baseline_power {
            if !baseline.is_finite() || baseline <= 0.0 || baseline > self.cue_power {
                return Err(ConfigError::BaselineOutOfRange {
                    baseline,
                    ceiling: self.cue_power,
                });
            }
        }
        Ok(())
    }

    /// Power the cue holds between shots
    pub fn baseline(&self) -> f32 {
        self.baseline_power.unwrap_or(self.cue_power)
    }
}
