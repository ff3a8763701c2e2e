//! A single simulated ball and its per-tick advancement

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Wall, circles_overlap, wall_contacts};
use super::vector::Vector2D;
use crate::color::Color;
use crate::consts::*;
use crate::error::{SimError, SimResult, require_finite};

/// Stable registry key, allocated in increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Accept any radius in [MIN_RADIUS, MAX_RADIUS]; other finite values fall
/// back to DEFAULT_RADIUS
pub fn clamp_radius(radius: f64) -> SimResult<f64> {
    let radius = require_finite("radius", radius)?;
    if (MIN_RADIUS..=MAX_RADIUS).contains(&radius) {
        Ok(radius)
    } else {
        Ok(DEFAULT_RADIUS)
    }
}

/// Restitution must lie in (0, 1]; larger values would add energy on every bounce
pub fn validate_restitution(restitution: f64) -> SimResult<f64> {
    let restitution = require_finite("restitution", restitution)?;
    if restitution > 0.0 && restitution <= 1.0 {
        Ok(restitution)
    } else {
        Err(SimError::invalid(
            "restitution",
            format!("{restitution} is outside (0, 1]"),
        ))
    }
}

/// Caller-side description of a body to create
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub radius: f64,
    pub velocity: Vector2D,
    /// Center; `None` picks a random point with the circle fully inside the arena
    pub position: Option<Vector2D>,
    /// `None` asks the arena's color allocator
    pub color: Option<Color>,
    /// `None` uses the arena default
    pub restitution: Option<f64>,
    pub trace: bool,
}

impl SpawnRequest {
    pub fn new(radius: f64, velocity: Vector2D) -> Self {
        Self {
            radius,
            velocity,
            position: None,
            color: None,
            restitution: None,
            trace: false,
        }
    }

    /// The stock ball: radius 20, velocity (-10, 12), arena center
    pub fn default_ball(bounds: &Bounds) -> Self {
        Self::new(SPAWN_RADIUS, SPAWN_VELOCITY.into()).at(bounds.center())
    }

    pub fn at(mut self, position: Vector2D) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = Some(restitution);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// What a body sees of another body during collision checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: BodyId,
    pub position: Vector2D,
    pub radius: f64,
}

/// Arena-wide inputs to a single body step
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    pub gravity_enabled: bool,
    pub gravity: f64,
    pub bounce_on_collision: bool,
    pub bounds: Bounds,
}

/// Everything that happened to one body during one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    pub walls: Vec<Wall>,
    pub overlaps: Vec<BodyId>,
    /// Pre-move center, present when tracing is on
    pub trace: Option<Vector2D>,
    /// Velocity went non-finite and was reset
    pub clamped: bool,
}

/// A simulated ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub position: Vector2D,
    /// Distance per tick
    pub velocity: Vector2D,
    pub radius: f64,
    pub restitution: f64,
    /// Frozen bodies are skipped entirely
    pub movable: bool,
    pub trace: bool,
    pub color: Color,
}

impl Body {
    pub fn neighbor(&self) -> Neighbor {
        Neighbor {
            id: self.id,
            position: self.position,
            radius: self.radius,
        }
    }

    /// Advance one tick
    ///
    /// Order: gravity, wall reflection, pairwise overlap response, translate,
    /// trace. Wall and overlap tests both use the center as it was at the
    /// start of the step.
    pub fn advance(&mut self, params: &StepParams, neighbors: &[Neighbor]) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if !self.movable {
            return outcome;
        }

        let start = self.position;

        // Bounces lose energy only while gravity is on
        let restitution = if params.gravity_enabled {
            self.velocity = self.velocity + Vector2D::new(0.0, params.gravity);
            self.restitution
        } else {
            1.0
        };

        for contact in wall_contacts(start, self.radius, &params.bounds) {
            match contact.wall {
                Wall::Bottom | Wall::Top => {
                    self.position = self.position + Vector2D::new(0.0, contact.correction);
                    self.velocity = Vector2D::new(self.velocity.x, -restitution * self.velocity.y);
                }
                Wall::Right | Wall::Left => {
                    self.position = self.position + Vector2D::new(contact.correction, 0.0);
                    self.velocity = Vector2D::new(-restitution * self.velocity.x, self.velocity.y);
                }
            }
            outcome.walls.push(contact.wall);
        }

        for other in neighbors.iter().filter(|n| n.id != self.id) {
            if circles_overlap(start, self.radius, other.position, other.radius) {
                if params.bounce_on_collision {
                    self.velocity = -self.velocity;
                }
                outcome.overlaps.push(other.id);
            }
        }

        if !self.velocity.is_finite() {
            outcome.clamped = true;
            self.velocity = Vector2D::new(
                finite_or_zero(self.velocity.x),
                finite_or_zero(self.velocity.y),
            );
        }

        self.position = self.position + self.velocity;

        if self.trace {
            outcome.trace = Some(start);
        }

        outcome
    }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
