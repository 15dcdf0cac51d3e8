//! Neon Breaker headless demo
//!
//! Plays the campaign on autopilot at a simulated 60 fps and logs the run.
//!
//! ```text
//! neon-breaker [tuning.json] [levels.json]
//! ```
//! `NEON_BREAKER_SEED` fixes the seed, `NEON_BREAKER_SCORES` sets the
//! high-score file.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_breaker::highscores::FileStore;
    use neon_breaker::sim::{GameEvent, GamePhase, TickInput};
    use neon_breaker::{Game, Tuning, builtin_levels, levels, platform};

    /// Give up after an hour of simulated play
    const MAX_FRAMES: u64 = 60 * 60 * 60;

    platform::init_logging();
    log::info!("Neon Breaker (native demo) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };
    let campaign = match args.next() {
        Some(path) => levels::load_levels(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring level pack {}: {}", path, e);
            builtin_levels()
        }),
        None => builtin_levels(),
    };

    let seed = std::env::var("NEON_BREAKER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| platform::now_ms() as u64);
    let scores_path = std::env::var("NEON_BREAKER_SCORES")
        .unwrap_or_else(|_| "neon-breaker-scores.json".to_string());

    let frame_ms = tuning.frame_ms;
    let mut game = Game::with_levels(seed, tuning, campaign, Box::new(FileStore::new(scores_path)));

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut now = 0.0;
    let mut bricks_broken = 0u64;
    let mut power_ups = 0u64;
    game.start(now);

    for _ in 0..MAX_FRAMES {
        now += frame_ms;
        for event in game.frame(now, &input) {
            match event {
                GameEvent::BrickBreak { .. } => bricks_broken += 1,
                GameEvent::PowerUpCollected { kind } => {
                    power_ups += 1;
                    log::debug!("Collected {}", kind.spec().name);
                }
                GameEvent::Combo { count, .. } if count >= 5 => {
                    log::debug!("{}x combo", count);
                }
                _ => {}
            }
        }

        match game.state().phase {
            GamePhase::LevelComplete => {
                game.next_level(now);
            }
            GamePhase::GameOver => break,
            _ => {}
        }
    }

    let state = game.state();
    log::info!(
        "Run over: score {}, level {}, {} bricks, {} power-ups, {:.0}s simulated (best {})",
        state.score,
        state.level_index + 1,
        bricks_broken,
        power_ups,
        now / 1000.0,
        state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `neon_breaker::Game` from its own frame loop
}
