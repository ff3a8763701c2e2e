//! Arena state: the body registry and everything configurable about it
//!
//! The arena is the only owner of bodies, trace marks and the color pool.
//! Nothing here is global; collaborators get a reference.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, SpawnRequest, StepParams, clamp_radius, validate_restitution};
use super::collision::{Bounds, Wall};
use super::vector::Vector2D;
use crate::color::{Color, ColorAllocator, RandomColorAllocator};
use crate::error::{SimError, SimResult};
use crate::settings::{
    CollisionOrdering, Settings, validate_dimension, validate_fps, validate_gravity,
};
use crate::tick_interval_for_fps;

/// Arena run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPhase {
    /// Ticks fire but nothing moves
    Idle,
    /// Every tick advances every body
    Running,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickEvent {
    WallBounce { body: BodyId, wall: Wall },
    Overlap { body: BodyId, other: BodyId },
    /// A velocity component went non-finite and was zeroed
    VelocityClamped { body: BodyId },
}

/// Permanent trajectory dot left by a tracing body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceMark {
    pub body: BodyId,
    pub position: Vector2D,
    pub color: Color,
}

/// Serializable view of the arena at a tick boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub phase: ArenaPhase,
    pub bounds: Bounds,
    pub bodies: Vec<Body>,
}

/// The bounded box, its bodies and the physics switches
#[derive(Debug, Clone)]
pub struct Arena<C = RandomColorAllocator> {
    pub(crate) bounds: Bounds,
    pub(crate) phase: ArenaPhase,
    fps: u32,
    tick_interval_ms: u64,
    pub(crate) gravity_enabled: bool,
    pub(crate) gravity_magnitude: f64,
    default_restitution: f64,
    pub(crate) bounce_on_collision: bool,
    pub(crate) ordering: CollisionOrdering,
    /// Kept sorted by id (ids only grow, so push order is id order)
    pub(crate) bodies: Vec<Body>,
    pub(crate) traces: Vec<TraceMark>,
    /// Events of the most recent tick that advanced bodies
    pub(crate) events: Vec<TickEvent>,
    /// Ticks that advanced at least one body
    pub(crate) ticks: u64,
    next_id: u32,
    rng: Pcg32,
    colors: C,
}

impl Arena {
    /// Arena of the given size with default physics
    pub fn new(width: f64, height: f64) -> SimResult<Self> {
        Self::from_settings(&Settings {
            width,
            height,
            ..Settings::default()
        })
    }

    pub fn from_settings(settings: &Settings) -> SimResult<Self> {
        Self::with_color_allocator(settings, RandomColorAllocator::new(settings.seed))
    }
}

impl<C: ColorAllocator> Arena<C> {
    pub fn with_color_allocator(settings: &Settings, colors: C) -> SimResult<Self> {
        settings.validate()?;
        Ok(Self {
            bounds: Bounds::new(settings.width, settings.height),
            phase: ArenaPhase::Idle,
            fps: settings.fps,
            tick_interval_ms: tick_interval_for_fps(settings.fps),
            gravity_enabled: settings.gravity_enabled,
            gravity_magnitude: settings.gravity_magnitude,
            default_restitution: settings.restitution,
            bounce_on_collision: settings.bounce_on_collision,
            ordering: settings.collision_ordering,
            bodies: Vec::new(),
            traces: Vec::new(),
            events: Vec::new(),
            ticks: 0,
            next_id: 1,
            // Separate stream from the color allocator
            rng: Pcg32::new(settings.seed, 0xB0D1E5),
            colors,
        })
    }

    // === Lifecycle ===

    /// Create a body and register it
    ///
    /// Out-of-range radii fall back to the default; non-finite numbers and bad
    /// restitution are rejected.
    pub fn spawn(&mut self, request: SpawnRequest) -> SimResult<BodyId> {
        let radius = clamp_radius(request.radius)?;
        let velocity = Vector2D::try_new("velocity", request.velocity.x, request.velocity.y)?;
        let restitution =
            validate_restitution(request.restitution.unwrap_or(self.default_restitution))?;
        let position = match request.position {
            Some(p) => Vector2D::try_new("position", p.x, p.y)?,
            None => self.random_position(radius)?,
        };
        let color = match request.color {
            Some(c) => {
                self.colors.claim(c);
                c
            }
            None => self.colors.next_color(),
        };

        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            position,
            velocity,
            radius,
            restitution,
            movable: true,
            trace: request.trace,
            color,
        });
        log::info!("Spawned body {} at {} (r={}, v={}, {})", id, position, radius, velocity, color);
        Ok(id)
    }

    /// Uniform point with the whole circle inside the arena
    fn random_position(&mut self, radius: f64) -> SimResult<Vector2D> {
        let Bounds { width, height } = self.bounds;
        if width < 2.0 * radius || height < 2.0 * radius {
            return Err(SimError::invalid(
                "radius",
                format!("a circle of radius {radius} does not fit in {width}x{height}"),
            ));
        }
        Ok(Vector2D::new(
            self.rng.random_range(radius..=width - radius),
            self.rng.random_range(radius..=height - radius),
        ))
    }

    pub fn start(&mut self) {
        if self.phase != ArenaPhase::Running {
            log::info!("Start ({} bodies)", self.bodies.len());
        }
        self.phase = ArenaPhase::Running;
    }

    pub fn stop(&mut self) {
        if self.phase != ArenaPhase::Idle {
            log::info!("Stop");
        }
        self.phase = ArenaPhase::Idle;
    }

    /// Stop and drop every body, trace mark and pending event
    pub fn reset(&mut self) {
        log::info!("Reset ({} bodies removed)", self.bodies.len());
        self.phase = ArenaPhase::Idle;
        self.bodies.clear();
        self.traces.clear();
        self.events.clear();
        self.colors.release_all();
    }

    /// Takes effect from the next scheduled tick
    pub fn set_frame_rate(&mut self, fps: u32) -> SimResult<()> {
        self.fps = validate_fps(fps)?;
        self.tick_interval_ms = tick_interval_for_fps(fps);
        log::info!("Frame rate {} fps ({} ms/tick)", fps, self.tick_interval_ms);
        Ok(())
    }

    // === Physics switches ===

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    pub fn set_gravity_magnitude(&mut self, magnitude: f64) -> SimResult<()> {
        self.gravity_magnitude = validate_gravity(magnitude)?;
        Ok(())
    }

    pub fn set_bounce_on_collision(&mut self, bounce: bool) {
        self.bounce_on_collision = bounce;
    }

    pub fn set_collision_ordering(&mut self, ordering: CollisionOrdering) {
        log::info!("Collision ordering: {}", ordering.as_str());
        self.ordering = ordering;
    }

    /// Resize the box; bodies left outside are pushed back by their next wall check
    pub fn set_bounds(&mut self, width: f64, height: f64) -> SimResult<()> {
        self.bounds = Bounds::new(
            validate_dimension("width", width)?,
            validate_dimension("height", height)?,
        );
        Ok(())
    }

    // === Per-body switches ===

    fn body_mut(&mut self, id: BodyId) -> SimResult<&mut Body> {
        self.bodies
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(SimError::UnknownBody(id))
    }

    pub fn set_movable(&mut self, id: BodyId, movable: bool) -> SimResult<()> {
        self.body_mut(id)?.movable = movable;
        Ok(())
    }

    pub fn set_trace(&mut self, id: BodyId, trace: bool) -> SimResult<()> {
        self.body_mut(id)?.trace = trace;
        Ok(())
    }

    pub fn set_restitution(&mut self, id: BodyId, restitution: f64) -> SimResult<()> {
        let restitution = validate_restitution(restitution)?;
        self.body_mut(id)?.restitution = restitution;
        Ok(())
    }

    // === Queries ===

    pub fn phase(&self) -> ArenaPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == ArenaPhase::Running
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    pub fn gravity_magnitude(&self) -> f64 {
        self.gravity_magnitude
    }

    pub fn collision_ordering(&self) -> CollisionOrdering {
        self.ordering
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Center of a body
    pub fn position(&self, id: BodyId) -> SimResult<Vector2D> {
        self.body(id).map(|b| b.position).ok_or(SimError::UnknownBody(id))
    }

    /// Ids in registry (tick) order
    pub fn list_bodies(&self) -> Vec<BodyId> {
        self.bodies.iter().map(|b| b.id).collect()
    }

    pub fn trace_marks(&self) -> &[TraceMark] {
        &self.traces
    }

    /// Take the events of the latest advancing tick
    ///
    /// Each such tick clears the buffer first, so events not drained before
    /// the next tick are dropped.
    pub fn drain_events(&mut self) -> Vec<TickEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn colors(&self) -> &C {
        &self.colors
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.ticks,
            phase: self.phase,
            bounds: self.bounds,
            bodies: self.bodies.clone(),
        }
    }

    pub(crate) fn step_params(&self) -> StepParams {
        StepParams {
            gravity_enabled: self.gravity_enabled,
            gravity: self.gravity_magnitude,
            bounce_on_collision: self.bounce_on_collision,
            bounds: self.bounds,
        }
    }
}
