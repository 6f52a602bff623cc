//! Tilt Shooter entry point
//!
//! The web build starts from `wasm_main`. The native build has no window or
//! sensor; it plays a headless demo game with a scripted tilt sweep and
//! automatic fire, logging what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    tilt_shooter::platform::web::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use tilt_shooter::hud::HudModel;
    use tilt_shooter::input::ScriptedTilt;
    use tilt_shooter::sim::{GameEvent, GameState};
    use tilt_shooter::{Scheduler, Settings};

    /// Simulated display refresh
    const FRAME: Duration = Duration::from_millis(16);
    /// Demo trigger finger
    const FIRE_EVERY: Duration = Duration::from_millis(300);

    env_logger::init();
    log::info!("Tilt Shooter (native demo) starting...");

    let max_seconds: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(120);

    let settings = Settings::load();
    if let Ok(json) = settings.to_json() {
        log::debug!("Effective settings: {}", json);
    }
    let clock_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let seed = settings.seed_or(clock_seed);
    log::info!("Game initialized with seed: {}", seed);

    let tuning = settings.tuning.clone();
    let mut state = GameState::new(seed, tuning.clone());
    let mut scheduler = Scheduler::new(&tuning);
    let mut tilt = ScriptedTilt::new(0.3, 0.15);

    let limit = Duration::from_secs(max_seconds);
    let mut since_fire = Duration::ZERO;

    while scheduler.now() < limit && !state.is_game_over() {
        since_fire += FRAME;
        if since_fire >= FIRE_EVERY {
            since_fire = Duration::ZERO;
            state.fire();
        }

        scheduler.advance(&mut state, FRAME, &mut tilt);

        for event in state.drain_events() {
            match event {
                GameEvent::BlockDestroyed { score, .. } => {
                    log::info!("Hit! score {} at {:?}", score, scheduler.now())
                }
                GameEvent::GameOver { score } => {
                    log::info!("Block reached the player at {:?}, score {}", scheduler.now(), score)
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    let snapshot = state.snapshot();
    if let Ok(json) = serde_json::to_string(&snapshot) {
        log::debug!("Final snapshot: {}", json);
    }

    let hud = HudModel::from_snapshot(&snapshot);
    println!();
    match hud.game_over {
        Some(overlay) => {
            println!("{}", overlay.title);
            println!("{}", overlay.final_score);
        }
        None => println!("Time limit reached. {}", hud.score),
    }
    println!(
        "Simulated {:.1}s in {} ticks (seed {})",
        scheduler.now().as_secs_f32(),
        snapshot.tick,
        snapshot.seed
    );

    scheduler.teardown();
}
