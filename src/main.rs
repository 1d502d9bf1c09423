//! Nova Strike headless runner
//!
//! Plays a scripted session against the simulation and prints the final HUD
//! as JSON. Usage: `nova-strike [tuning.json] [seed]`

use std::path::Path;

use nova_strike::consts::{DEFAULT_SEED, SIM_DT, TICKS_PER_SECOND};
use nova_strike::sim::GamePhase;
use nova_strike::{Game, Tuning};

/// Give up after five minutes of simulated play
const MAX_FRAMES: u32 = 5 * 60 * TICKS_PER_SECOND;
/// Frames between strafing direction changes
const STRAFE_PERIOD: u32 = 90;
/// Frames between torpedo presses
const TORPEDO_PERIOD: u32 = 70;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tuning = args
        .next()
        .map(|path| Tuning::load(Path::new(&path)))
        .unwrap_or_default();
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    log::info!("Nova Strike (headless) starting, seed {seed}");

    let mut game = Game::with_tuning(seed, tuning);
    game.start();

    let mut frames = 0;
    while frames < MAX_FRAMES {
        drive_autopilot(&mut game, frames);
        game.advance(SIM_DT);
        frames += 1;

        if game.state().phase != GamePhase::Playing {
            break;
        }
        if frames % (10 * TICKS_PER_SECOND) == 0 {
            let state = game.state();
            log::info!(
                "t={}s score={} lives={} enemies={} particles={}",
                frames / TICKS_PER_SECOND,
                state.score,
                state.lives,
                state.enemies.len(),
                state.particles.len()
            );
        }
    }

    match serde_json::to_string_pretty(&game.hud()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode HUD: {e}"),
    }
}

/// Strafe left and right and tap the torpedo key on a fixed rhythm
fn drive_autopilot(game: &mut Game, frame: u32) {
    if frame % STRAFE_PERIOD == 0 {
        let (press, release) = if (frame / STRAFE_PERIOD) % 2 == 0 {
            ("ArrowLeft", "d")
        } else {
            ("d", "ArrowLeft")
        };
        game.key_up(release);
        game.key_down(press);
    }

    match frame % TORPEDO_PERIOD {
        0 => {
            game.key_down(" ");
        }
        1 => {
            game.key_up(" ");
        }
        _ => {}
    }
}
