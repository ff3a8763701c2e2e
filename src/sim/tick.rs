//! Fixed-interval simulation tick
//!
//! Advances every body once, in registry order.

use super::body::Neighbor;
use super::state::{Arena, TickEvent, TraceMark};
use crate::color::ColorAllocator;
use crate::consts::SHADE_FACTOR;
use crate::settings::CollisionOrdering;

impl<C: ColorAllocator> Arena<C> {
    /// Timer callback; see [`tick`]
    pub fn on_tick(&mut self) {
        tick(self);
    }
}

/// Advance the arena by one tick
///
/// Does nothing while idle. A running arena with no bodies resets itself,
/// which drops it back to idle.
pub fn tick<C: ColorAllocator>(arena: &mut Arena<C>) {
    if !arena.is_running() {
        return;
    }
    if arena.bodies.is_empty() {
        arena.reset();
        return;
    }

    arena.ticks += 1;
    // Only the latest tick's events are kept
    arena.events.clear();
    let params = arena.step_params();

    // Snapshot: never updated during the tick.
    // Sequential: entry i is refreshed as soon as body i moves.
    let mut neighbors: Vec<Neighbor> = arena.bodies.iter().map(|b| b.neighbor()).collect();

    for i in 0..arena.bodies.len() {
        let outcome = arena.bodies[i].advance(&params, &neighbors);
        if arena.ordering == CollisionOrdering::Sequential {
            neighbors[i] = arena.bodies[i].neighbor();
        }

        let body = &arena.bodies[i];
        for wall in outcome.walls {
            log::debug!("Body {} bounced off {:?} wall", body.id, wall);
            arena.events.push(TickEvent::WallBounce { body: body.id, wall });
        }
        for other in outcome.overlaps {
            log::debug!("Collision: {} with {}", body.id, other);
            arena.events.push(TickEvent::Overlap { body: body.id, other });
        }
        if outcome.clamped {
            log::warn!("Body {} velocity went non-finite, clamped to {}", body.id, body.velocity);
            arena.events.push(TickEvent::VelocityClamped { body: body.id });
        }
        if let Some(position) = outcome.trace {
            arena.traces.push(TraceMark {
                body: body.id,
                position,
                color: body.color.shade(SHADE_FACTOR),
            });
        }
    }
}
