//! Session phase machine
//!
//! ```text
//! Start -> Playing <-> Paused
//! Playing -> LevelComplete -> Playing (next level)
//! Playing -> GameOver (out of lives)
//! LevelComplete -> Win -> GameOver (no levels left)
//! ```

use glam::Vec2;

use super::powerups;
use super::state::{Brick, GameEvent, GamePhase, GameState, Paddle};
use crate::consts::*;

/// Reported on every level-complete screen
const LEVEL_ACCURACY: u8 = 100;

impl GameState {
    /// Fresh run from level 0
    pub fn start_game(&mut self) {
        self.level_index = 0;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.combo = 0;
        self.last_brick_ms = None;
        self.phase = GamePhase::Playing;
        log::info!("Game started ({} levels)", self.levels.len());
        self.load_level(0);
    }

    /// Build the paddle, ball and brick grid for `index`. Past the last level
    /// the campaign is won.
    pub fn load_level(&mut self, index: usize) {
        let Some(level) = self.levels.get(index).cloned() else {
            self.win();
            return;
        };
        self.level_index = index;

        self.balls.clear();
        self.bricks.clear();
        self.power_ups.clear();
        powerups::clear_all(self);
        self.particles.clear();

        self.paddle = Paddle::for_field(&self.tuning, level.paddle_speed);
        self.spawn_ball_attached();

        let cols = level.columns();
        if cols > 0 {
            let brick_width = (self.tuning.field_width - 2.0 * BRICK_SIDE_MARGIN) / cols as f32;
            let size = Vec2::new(
                brick_width - BRICK_PADDING * 2.0,
                BRICK_ROW_HEIGHT - BRICK_PADDING * 2.0,
            );
            for cell in level.cells() {
                let pos = Vec2::new(
                    BRICK_SIDE_MARGIN + cell.col as f32 * brick_width + BRICK_PADDING,
                    BRICK_TOP_OFFSET + cell.row as f32 * BRICK_ROW_HEIGHT + BRICK_PADDING,
                );
                self.bricks.push(Brick::new(pos, size, cell.kind));
            }
        }

        log::info!(
            "Level {} \"{}\": {} bricks, ball speed {}",
            index + 1,
            level.name,
            self.bricks.len(),
            level.ball_speed
        );
    }

    /// Release every attached ball
    pub fn launch_ball(&mut self) {
        if self.phase != GamePhase::Playing || !self.ball_attached() {
            return;
        }
        for ball in &mut self.balls {
            ball.launch(&mut self.rng);
        }
        self.events.push(GameEvent::Hit);
    }

    /// Last ball fell out of the field
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LoseLife { lives: self.lives });
        log::info!("Life lost, {} left", self.lives);

        if self.lives == 0 {
            self.game_over();
        } else {
            self.respawn_on_paddle();
        }
    }

    fn respawn_on_paddle(&mut self) {
        let center = self.tuning.field_width / 2.0;
        self.paddle.pos.x = center;
        self.paddle.target_x = center;
        self.spawn_ball_attached();
    }

    /// Every brick is gone: bank the bonus and wait for the host
    pub fn level_complete(&mut self) {
        let bonus = self.tuning.level_complete_bonus;
        self.score += bonus;
        self.phase = GamePhase::LevelComplete;
        self.events.push(GameEvent::LevelComplete {
            level: self.level_index,
            bonus,
            accuracy: LEVEL_ACCURACY,
        });
        log::info!("Level {} complete, score {}", self.level_index + 1, self.score);
    }

    /// Advance from LevelComplete to the next level (or to the win screen)
    pub fn next_level(&mut self) {
        if self.phase != GamePhase::LevelComplete {
            return;
        }
        let next = self.level_index + 1;
        // Win path leaves the phase at GameOver
        self.phase = GamePhase::Playing;
        self.load_level(next);
    }

    /// Campaign finished; reported, then the run ends
    pub fn win(&mut self) {
        self.phase = GamePhase::Win;
        self.events.push(GameEvent::Win);
        log::info!("All levels cleared");
        self.game_over();
    }

    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
            log::info!("New high score: {}", self.score);
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            log::debug!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::debug!("Resumed");
        }
    }

    /// Back to the title screen
    pub fn restart(&mut self) {
        self.phase = GamePhase::Start;
    }

    /// External bonus-lives purchase succeeded: refill and keep playing
    pub fn grant_bonus_lives(&mut self) {
        self.lives = self.tuning.starting_lives;
        self.phase = GamePhase::Playing;
        self.respawn_on_paddle();
        log::info!("Bonus lives granted");
    }
}
