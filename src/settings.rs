//! Simulation settings
//!
//! Loaded from a JSON file by the headless runner; every field has a default
//! so partial files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, MAX_LAG_FACTOR};
use crate::error::SettingsError;

/// Tuning for the frame stepper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Upper bound on the lag factor passed to a single tick
    pub max_lag_factor: f32,
    /// Emit a trace line for every contact dispatched
    pub log_contacts: bool,
    /// Radial pull handed to walkers spawned by the scenario builder
    pub gravity: f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            max_lag_factor: MAX_LAG_FACTOR,
            log_contacts: false,
            gravity: GRAVITY,
        }
    }
}

impl SimSettings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.max_lag_factor.is_finite() || self.max_lag_factor <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "max_lag_factor",
                reason: format!("must be finite and positive, got {}", self.max_lag_factor),
            });
        }
        if !self.gravity.is_finite() {
            return Err(SettingsError::Invalid {
                field: "gravity",
                reason: format!("must be finite, got {}", self.gravity),
            });
        }
        Ok(())
    }

    /// Clamp a raw lag factor into the range a tick accepts
    ///
    /// NaN becomes 0. Unlike `f32::clamp` this never panics on a bad cap.
    pub fn clamp_lag(&self, lag: f32) -> f32 {
        lag.max(0.0).min(self.max_lag_factor)
    }
}
