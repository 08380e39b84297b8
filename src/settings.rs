//! Gameplay settings
//!
//! Tunables a host may override from a JSON file. Missing fields fall back
//! to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Walking ===
    /// Walking speed (units per second)
    pub player_speed: f32,
    /// Max triangle steps per tick
    pub walk_iteration_budget: u32,

    // === Round ===
    /// Round length (seconds)
    pub round_duration: f64,
    /// Per-axis catch distance
    pub target_tolerance: f32,
    /// Half-extent of the square targets are drawn from
    pub target_range: f32,
    /// RNG seed; `None` draws one from OS entropy
    pub seed: Option<u64>,

    // === Camera ===
    /// Vertical field of view (radians); also scales mouse look
    pub camera_fovy: f32,
    /// Extra multiplier on mouse motion
    pub mouse_sensitivity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            walk_iteration_budget: WALK_ITERATION_BUDGET,

            round_duration: ROUND_DURATION,
            target_tolerance: TARGET_TOLERANCE,
            target_range: TARGET_RANGE,
            seed: None,

            camera_fovy: CAMERA_FOVY,
            mouse_sensitivity: 1.0,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });

        if !positive(self.player_speed) {
            return invalid("player_speed", "must be positive");
        }
        if self.walk_iteration_budget == 0 {
            return invalid("walk_iteration_budget", "must be at least 1");
        }
        if !(self.round_duration.is_finite() && self.round_duration > 0.0) {
            return invalid("round_duration", "must be positive");
        }
        if !self.target_tolerance.is_finite() || self.target_tolerance < 0.0 {
            return invalid("target_tolerance", "must not be negative");
        }
        if !positive(self.target_range) || self.target_range > 1.0 {
            return invalid("target_range", "must be in (0, 1]");
        }
        if !positive(self.camera_fovy) || self.camera_fovy >= std::f32::consts::PI {
            return invalid("camera_fovy", "must be in (0, pi)");
        }
        if !positive(self.mouse_sensitivity) {
            return invalid("mouse_sensitivity", "must be positive");
        }
        Ok(())
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}
