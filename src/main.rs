//! Ball Arena headless runner
//!
//! Usage: `ball-arena [settings.json] [seconds]`
//!
//! Spawns the stock ball plus a few random ones, runs the scheduler on a
//! simulated clock and prints the final world snapshot as JSON.

use std::error::Error;

use ball_arena::Settings;
use ball_arena::sim::{Arena, Command, Scheduler, SpawnRequest, Vector2D};

const RANDOM_BALLS: usize = 4;
const DEFAULT_SECONDS: u64 = 5;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Ball Arena (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Loaded settings from {}", path);
            Settings::from_json(&json)?
        }
        None => Settings::default(),
    };
    let seconds = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => DEFAULT_SECONDS,
    };

    let mut arena = Arena::from_settings(&settings)?;
    let mut scheduler = Scheduler::new(&arena, 0);

    scheduler.submit(Command::Spawn(SpawnRequest::default_ball(&arena.bounds())));
    for i in 0..RANDOM_BALLS {
        let v = Vector2D::new(3.0 + i as f64, -2.0 * i as f64);
        scheduler.submit(Command::Spawn(SpawnRequest::new(10.0 + 5.0 * i as f64, v)));
    }
    scheduler.submit(Command::Start);

    let end_ms = seconds * 1000;
    let mut now_ms = 0;
    let mut total_ticks = 0u64;
    while now_ms < end_ms {
        now_ms = scheduler.next_tick_ms().min(end_ms);
        let report = scheduler.pump(&mut arena, now_ms);
        total_ticks += report.ticks_fired as u64;
        for e in report.rejected {
            log::error!("{}", e);
        }
        let events = arena.drain_events();
        if !events.is_empty() {
            log::debug!("t={}ms: {} events", now_ms, events.len());
        }
    }

    log::info!(
        "Ran {} ticks in {} simulated seconds ({} bodies, {} trace marks)",
        total_ticks,
        seconds,
        arena.len(),
        arena.trace_marks().len()
    );
    println!("{}", serde_json::to_string_pretty(&arena.snapshot())?);
    Ok(())
}
