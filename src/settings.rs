//! Arena configuration
//!
//! Loaded from JSON by the runner; every field has a default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult, require_finite};
use crate::sim::body::validate_restitution;

/// How bodies see each other while a tick is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionOrdering {
    /// Every body checks against positions captured before the tick began.
    /// Results do not depend on registry order.
    #[default]
    Snapshot,
    /// Every body checks against live positions, so bodies later in the
    /// registry see neighbors that already moved this tick
    Sequential,
}

impl CollisionOrdering {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionOrdering::Snapshot => "snapshot",
            CollisionOrdering::Sequential => "sequential",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub width: f64,
    pub height: f64,
    /// Ticks per second; interval is max(1, round(1000 / fps)) ms
    pub fps: u32,

    // === Physics ===
    pub gravity_enabled: bool,
    /// Added to vertical velocity each tick while gravity is on
    pub gravity_magnitude: f64,
    /// Default restitution for new bodies
    pub restitution: f64,
    /// When off, overlaps are reported but velocities untouched
    pub bounce_on_collision: bool,
    pub collision_ordering: CollisionOrdering,

    /// Seed for spawn positions and colors
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            fps: DEFAULT_FPS,

            gravity_enabled: true,
            gravity_magnitude: DEFAULT_GRAVITY,
            restitution: DEFAULT_RESTITUTION,
            bounce_on_collision: true,
            collision_ordering: CollisionOrdering::Snapshot,

            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Parse and validate
    pub fn from_json(json: &str) -> SimResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> SimResult<()> {
        validate_dimension("width", self.width)?;
        validate_dimension("height", self.height)?;
        validate_fps(self.fps)?;
        validate_gravity(self.gravity_magnitude)?;
        validate_restitution(self.restitution)?;
        Ok(())
    }
}

pub(crate) fn validate_dimension(what: &'static str, value: f64) -> SimResult<f64> {
    let value = require_finite(what, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(what, format!("{value} must be positive")))
    }
}

pub(crate) fn validate_fps(fps: u32) -> SimResult<u32> {
    if fps >= MIN_FPS {
        Ok(fps)
    } else {
        Err(SimError::invalid("frame rate", format!("must be at least {MIN_FPS}")))
    }
}

pub(crate) fn validate_gravity(magnitude: f64) -> SimResult<f64> {
    let magnitude = require_finite("gravity magnitude", magnitude)?;
    if magnitude.abs() <= GRAVITY_LIMIT {
        Ok(magnitude)
    } else {
        Err(SimError::invalid(
            "gravity magnitude",
            format!("{magnitude} is outside [-{GRAVITY_LIMIT}, {GRAVITY_LIMIT}]"),
        ))
    }
}
