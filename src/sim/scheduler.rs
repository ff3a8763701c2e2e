//! Single-threaded event loop driving the arena
//!
//! External commands and timer ticks are serialized through one queue:
//! commands queued between pumps are applied before any tick of that pump,
//! so a tick never observes a half-applied command.

use std::collections::VecDeque;

use super::body::{BodyId, SpawnRequest};
use super::state::Arena;
use crate::color::ColorAllocator;
use crate::consts::MAX_CATCHUP_TICKS;
use crate::error::SimError;

/// Control-panel style request
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Stop,
    Reset,
    SetFrameRate(u32),
    SetGravity(bool),
    Spawn(SpawnRequest),
}

/// What one pump did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PumpReport {
    pub ticks_fired: u32,
    pub spawned: Vec<BodyId>,
    /// Commands that failed validation, in queue order
    pub rejected: Vec<SimError>,
}

/// Fixed-interval tick timer plus command queue
#[derive(Debug, Clone)]
pub struct Scheduler {
    queue: VecDeque<Command>,
    /// Absolute time (ms) the next tick is due
    next_tick_ms: u64,
}

impl Scheduler {
    /// First tick fires one interval after `now_ms`
    pub fn new<C: ColorAllocator>(arena: &Arena<C>, now_ms: u64) -> Self {
        Self {
            queue: VecDeque::new(),
            next_tick_ms: now_ms + arena.tick_interval_ms(),
        }
    }

    pub fn submit(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_tick_ms(&self) -> u64 {
        self.next_tick_ms
    }

    /// Apply queued commands, then fire every tick due at `now_ms`
    ///
    /// Ticks are rescheduled whether or not the arena is running, using the
    /// interval current at the moment each tick fires. At most
    /// MAX_CATCHUP_TICKS fire per pump; beyond that the timer resyncs to now.
    pub fn pump<C: ColorAllocator>(&mut self, arena: &mut Arena<C>, now_ms: u64) -> PumpReport {
        let mut report = PumpReport::default();

        while let Some(command) = self.queue.pop_front() {
            match apply(arena, command) {
                Ok(Some(id)) => report.spawned.push(id),
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Rejected command: {}", e);
                    report.rejected.push(e);
                }
            }
        }

        while self.next_tick_ms <= now_ms {
            if report.ticks_fired == MAX_CATCHUP_TICKS {
                let behind = now_ms - self.next_tick_ms;
                log::warn!("Tick loop {} ms behind, skipping ahead", behind);
                self.next_tick_ms = now_ms + arena.tick_interval_ms();
                break;
            }
            arena.on_tick();
            report.ticks_fired += 1;
            self.next_tick_ms += arena.tick_interval_ms();
        }

        report
    }
}

fn apply<C: ColorAllocator>(
    arena: &mut Arena<C>,
    command: Command,
) -> Result<Option<BodyId>, SimError> {
    match command {
        Command::Start => arena.start(),
        Command::Stop => arena.stop(),
        Command::Reset => arena.reset(),
        Command::SetFrameRate(fps) => arena.set_frame_rate(fps)?,
        Command::SetGravity(enabled) => arena.set_gravity_enabled(enabled),
        Command::Spawn(request) => return arena.spawn(request).map(Some),
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ArenaPhase;
    use crate::sim::vector::Vector2D;

    fn setup() -> (Arena, Scheduler) {
        let arena = Arena::new(700.0, 400.0).unwrap();
        let scheduler = Scheduler::new(&arena, 0);
        (arena, scheduler)
    }

    #[test]
    fn test_ticks_fire_on_interval() {
        let (mut arena, mut sched) = setup();
        assert_eq!(sched.next_tick_ms(), 33);
        assert_eq!(sched.pump(&mut arena, 32).ticks_fired, 0);
        assert_eq!(sched.pump(&mut arena, 33).ticks_fired, 1);
        assert_eq!(sched.pump(&mut arena, 99).ticks_fired, 2);
        assert_eq!(sched.next_tick_ms(), 132);
    }

    #[test]
    fn test_commands_apply_before_ticks() {
        let (mut arena, mut sched) = setup();
        sched.submit(Command::SetGravity(false));
        sched.submit(Command::Spawn(
            SpawnRequest::new(10.0, Vector2D::new(1.0, 0.0)).at(Vector2D::new(100.0, 100.0)),
        ));
        sched.submit(Command::Start);
        let report = sched.pump(&mut arena, 33);
        assert_eq!(report.ticks_fired, 1);
        assert_eq!(report.spawned.len(), 1);
        assert_eq!(sched.pending(), 0);
        assert_eq!(arena.position(report.spawned[0]).unwrap(), Vector2D::new(101.0, 100.0));
    }

    #[test]
    fn test_rejected_commands_are_reported() {
        let (mut arena, mut sched) = setup();
        sched.submit(Command::SetFrameRate(0));
        sched.submit(Command::Spawn(SpawnRequest::new(f64::NAN, Vector2D::ZERO)));
        let report = sched.pump(&mut arena, 0);
        assert_eq!(report.rejected.len(), 2);
        assert!(report.spawned.is_empty());
        assert_eq!(arena.tick_interval_ms(), 33);
    }

    #[test]
    fn test_frame_rate_change_applies_to_next_schedule() {
        let (mut arena, mut sched) = setup();
        sched.submit(Command::SetFrameRate(10));
        // Already-scheduled tick keeps its due time
        assert_eq!(sched.pump(&mut arena, 33).ticks_fired, 1);
        assert_eq!(sched.next_tick_ms(), 133);
    }

    #[test]
    fn test_idle_arena_keeps_ticking() {
        let (mut arena, mut sched) = setup();
        sched.pump(&mut arena, 100);
        assert_eq!(arena.phase(), ArenaPhase::Idle);
        sched.submit(Command::Spawn(SpawnRequest::default_ball(&arena.bounds())));
        sched.submit(Command::Start);
        let report = sched.pump(&mut arena, 132);
        assert_eq!(report.ticks_fired, 1);
        assert_eq!(arena.ticks(), 1);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let (mut arena, mut sched) = setup();
        let report = sched.pump(&mut arena, 10_000);
        assert_eq!(report.ticks_fired, MAX_CATCHUP_TICKS);
        assert_eq!(sched.next_tick_ms(), 10_033);
    }

    #[test]
    fn test_auto_reset_through_scheduler() {
        let (mut arena, mut sched) = setup();
        sched.submit(Command::Start);
        sched.pump(&mut arena, 33);
        assert!(!arena.is_running());
        assert!(arena.is_empty());
    }
}
