//! Headless race command

use super::build_track;
use anyhow::{Context, Result};
use looprace_runtime::{FrameInput, GameClock, Hud, RaceEvent, RaceSession, SessionConfig};
use looprace_track::Lane;
use std::path::Path;

pub struct SimulateArgs {
    pub track: Option<String>,
    pub frames: u32,
    pub dt: f64,
    pub steer: Lane,
    pub seed: Option<u64>,
    pub session: Option<String>,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.dt.is_nan() || args.dt <= 0.0 {
        anyhow::bail!("Frame time must be positive, got {}", args.dt);
    }

    let track = build_track(args.track.as_deref())?;
    let mut config = match &args.session {
        Some(path) => SessionConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load session config '{}'", path))?,
        None => SessionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut session = RaceSession::new(track, config).context("Failed to start race")?;
    let mut clock = GameClock::new();
    let step_ms = clock.fixed_timestep_ms();
    let input = FrameInput::steering(args.steer);

    let mut steps = 0u32;
    for _ in 0..args.frames {
        clock.advance(args.dt / 1000.0);
        while clock.should_fixed_update() {
            session.update(step_ms, &input);
            clock.consume_fixed_step();
            steps += 1;
        }

        session.record_frame(args.dt);

        for event in session.drain_events() {
            report(&event);
        }
        if session.is_game_over() {
            break;
        }
    }

    log::info!(
        "Simulated {:.1}s in {} steps, distance {:.1}",
        clock.total_time,
        steps,
        session.distance()
    );
    print!("{}", Hud::from_session(&session));

    Ok(())
}

fn report(event: &RaceEvent) {
    match event {
        RaceEvent::PickupCollected { kind, next } => {
            println!("Collected {}; next target {}", kind, next)
        }
        RaceEvent::WrongPickup { .. } => {}
        RaceEvent::HealthRestored { health } => println!("Health restored to {}", health),
        RaceEvent::LapStarted { lap } => println!("Lap {}", lap),
        RaceEvent::PickupsRespawned => println!("Pickups respawned"),
        RaceEvent::GameOver { .. } => println!("Race over"),
    }
}
