//! Neon Breaker - a neon brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (kinematics, collisions, scoring, power-ups, phases)
//! - `levels`: Built-in level descriptors and brick-grid parsing
//! - `tuning`: Data-driven game balance
//! - `game`: Host-facing driver that owns the clock and collaborators
//! - `platform`: Frame timing, wall clock and logger setup
//! - `highscores`: High score persistence
//! - `audio`: Synthesized sound cues
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod levels;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use game::Game;
pub use highscores::{HighScoreStore, MemoryStore};
pub use levels::{LevelDescriptor, builtin_levels};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game geometry constants (playfield units are pixels, time is frame units)
pub mod consts {
    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_WIDE_WIDTH: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Distance from the bottom of the field to the paddle center
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;
    /// Fraction of the gap to the target closed per update
    pub const PADDLE_SMOOTHING: f32 = 0.2;
    /// Horizontal steering gained from the paddle hit offset
    pub const PADDLE_SPIN_FACTOR: f32 = 0.75;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Gap between an attached ball and the paddle top
    pub const BALL_ATTACH_GAP: f32 = 5.0;
    pub const TRAIL_LENGTH: usize = 10;

    /// Brick grid layout
    pub const BRICK_SIDE_MARGIN: f32 = 30.0;
    pub const BRICK_TOP_OFFSET: f32 = 100.0;
    pub const BRICK_ROW_HEIGHT: f32 = 25.0;
    pub const BRICK_PADDING: f32 = 2.0;
    /// Shake timer set on every hit (frame units)
    pub const BRICK_HIT_ANIMATION: f32 = 10.0;

    /// Falling pickups
    pub const PICKUP_RADIUS: f32 = 15.0;
    pub const PICKUP_FALL_SPEED: f32 = 3.0;
    pub const PICKUP_SPIN_SPEED: f32 = 0.05;

    /// Combo cue level cap
    pub const COMBO_CUE_CAP: u32 = 5;
}
