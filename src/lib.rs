//! Ball Arena - circular bodies bouncing inside a rectangular box
//!
//! Core modules:
//! - `sim`: Simulation kernel (vectors, bodies, arena registry, tick, scheduler)
//! - `color`: Distinct body colors and trace shading
//! - `settings`: Serializable arena configuration
//! - `error`: Error taxonomy shared by every fallible operation

pub mod color;
pub mod error;
pub mod settings;
pub mod sim;

pub use color::{Color, ColorAllocator, RandomColorAllocator};
pub use error::{SimError, SimResult};
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const ARENA_WIDTH: f64 = 700.0;
    pub const ARENA_HEIGHT: f64 = 400.0;

    /// Default frame rate; the control slider spans [MIN_FPS, MAX_UI_FPS]
    pub const DEFAULT_FPS: u32 = 30;
    pub const MIN_FPS: u32 = 1;
    pub const MAX_UI_FPS: u32 = 60;
    /// Maximum ticks fired by a single scheduler pump before it resyncs
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Body radius bounds; anything outside falls back to DEFAULT_RADIUS
    pub const MIN_RADIUS: f64 = 1.0;
    pub const MAX_RADIUS: f64 = 100.0;
    pub const DEFAULT_RADIUS: f64 = 10.0;

    /// Velocity retained on a wall bounce while gravity is on
    pub const DEFAULT_RESTITUTION: f64 = 0.7;

    /// Downward velocity added every tick while gravity is on (distance/tick²)
    pub const DEFAULT_GRAVITY: f64 = 0.5;
    /// Accepted gravity magnitude range (matches the magnitude control)
    pub const GRAVITY_LIMIT: f64 = 100.0;

    /// "Spawn Ball" defaults
    pub const SPAWN_RADIUS: f64 = 20.0;
    pub const SPAWN_VELOCITY: (f64, f64) = (-10.0, 12.0);

    /// Shade factor for trajectory marks and hover color
    pub const SHADE_FACTOR: f64 = 0.6;

    /// Default RNG seed for spawn positions and colors
    pub const DEFAULT_SEED: u64 = 0x5EED_BA11;
}

/// Tick interval in milliseconds for a frame rate: `max(1, round(1000 / fps))`
///
/// Callers must reject `fps == 0` first.
#[inline]
pub fn tick_interval_for_fps(fps: u32) -> u64 {
    debug_assert!(fps > 0);
    ((1000.0 / fps as f64).round() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval_rounds() {
        assert_eq!(tick_interval_for_fps(30), 33);
        assert_eq!(tick_interval_for_fps(60), 17);
        assert_eq!(tick_interval_for_fps(1), 1000);
    }

    #[test]
    fn test_tick_interval_floor_at_one() {
        assert_eq!(tick_interval_for_fps(1000), 1);
        assert_eq!(tick_interval_for_fps(5000), 1);
    }
}
