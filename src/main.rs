//! Rabbit Run headless driver
//!
//! Runs the simulation core without a renderer: an autopilot taps whenever the
//! protagonist sinks below the next gap, contacts come from the built-in
//! overlap test, and every notification is logged.
//!
//! Usage: `rabbit-run [settings.json] [--seed N] [--runs N]`

use std::path::PathBuf;

use clap::Parser;
use rabbit_run::Settings;
use rabbit_run::sim::{FixedTimestep, GameEvent, GamePhase, GameState};

/// Simulated display refresh; deliberately not the sim rate so substepping shows up
const DISPLAY_DT: f32 = 1.0 / 75.0;
/// Give up on a run after this many seconds of display time
const MAX_RUN_SECS: f32 = 120.0;

/// Headless Rabbit Run driver
#[derive(Debug, Parser)]
#[command(name = "rabbit-run", version, about)]
struct Args {
    /// Settings JSON; defaults are used when omitted
    settings: Option<PathBuf>,

    /// Seed for obstacle placement
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Number of runs to play back to back
    #[arg(long, default_value_t = 3)]
    runs: u32,
}

/// Tap when falling below the gap of the nearest obstacle ahead
fn autopilot_wants_flap(game: &GameState) -> bool {
    let protagonist = game.protagonist();
    let x = protagonist.pos().x;
    let target = game
        .obstacles()
        .iter()
        .find(|o| o.pos.x + o.width / 2.0 >= x - protagonist.radius)
        .map(|o| o.pos.y - o.gap / 4.0)
        .unwrap_or(0.0);
    protagonist.pos().y < target && protagonist.body.vel.y < 0.0
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Flap => log::trace!("flap"),
        GameEvent::Scored { score } => log::info!("Score: {}", score),
        GameEvent::GameOver { score } => log::info!("Game over with {} points", score),
        GameEvent::ShowRestart => log::debug!("Restart control shown"),
        GameEvent::Shake => log::debug!("Shake"),
        GameEvent::Restarted => log::info!("New run"),
        GameEvent::ObstacleSpawned { id } => log::debug!("Obstacle {} in", id),
        GameEvent::ObstacleDespawned { id } => log::debug!("Obstacle {} out", id),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rabbit Run (headless) starting...");

    let args = Args::parse();
    let settings = Settings::load_or_default(args.settings.as_deref());
    let sim_dt = settings.fixed_delta;
    let mut game = GameState::with_settings(settings, args.seed);
    let mut clock = FixedTimestep::new(sim_dt);

    let mut scores = Vec::with_capacity(args.runs as usize);
    for run in 1..=args.runs {
        if run > 1 {
            game.on_restart_requested();
            clock.reset();
        }

        let mut elapsed = 0.0;
        while game.phase() == GamePhase::Active && elapsed < MAX_RUN_SECS {
            if autopilot_wants_flap(&game) {
                game.on_input_down();
            }
            for _ in 0..clock.advance(DISPLAY_DT) {
                game.update(sim_dt);
                game.resolve_contacts();
            }
            for event in game.drain_events() {
                log_event(&event);
            }
            elapsed += DISPLAY_DT;
        }

        log::info!(
            "Run {} finished after {} frames with score {}",
            run,
            game.frame(),
            game.score()
        );
        scores.push(game.score());
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final snapshot: {}", e),
    }
    println!("Scores: {:?}", scores);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is embedded by a host on the web; nothing to run here
}
