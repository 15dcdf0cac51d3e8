//! Simulation module
//!
//! All gameplay logic lives here. Given the same seed, inputs and clock
//! readings a session plays out identically:
//! - Seeded RNG only
//! - Wall-clock time is passed in, never read
//! - No rendering or platform dependencies

pub mod collision;
pub mod driver;
pub mod particles;
pub mod powerups;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::HitAxis;
pub use particles::{Particle, ParticleSystem};
pub use state::{
    ActivePowerUp, Ball, BallColor, BallState, Brick, BrickKind, BrickSpec, GameEvent, GamePhase,
    GameState, Paddle, PowerUp, PowerUpKind, PowerUpSpec,
};
pub use tick::{TickInput, tick};
