//! Simulation kernel
//!
//! Everything that moves lives here. No rendering or windowing:
//! - Integer tick counter, one tick per timer fire
//! - Stable iteration order (by body ID)
//! - All randomness from seeded RNGs owned by the arena

pub mod body;
pub mod collision;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod vector;

pub use body::{Body, BodyId, Neighbor, SpawnRequest, StepOutcome, StepParams};
pub use collision::{Bounds, Wall, WallContact, circles_overlap, wall_contacts};
pub use scheduler::{Command, PumpReport, Scheduler};
pub use state::{Arena, ArenaPhase, TickEvent, TraceMark, WorldSnapshot};
pub use tick::tick;
pub use vector::Vector2D;
