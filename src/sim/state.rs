//! Game state and core simulation types
//!
//! Everything the simulation owns lives in [`GameState`]. Renderers read it,
//! only the simulation mutates it.

use std::collections::{BTreeMap, VecDeque};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision;
use super::particles::ParticleSystem;
use crate::consts::*;
use crate::levels::{LevelDescriptor, builtin_levels};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Start,
    /// Active gameplay
    Playing,
    /// Suspended; no steps run until resumed
    Paused,
    /// All bricks cleared, waiting for the host to advance
    LevelComplete,
    /// Run ended
    GameOver,
    /// Campaign finished (transient, immediately followed by GameOver)
    Win,
}

/// Ball state - attached to paddle or free-moving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    /// Ball rides the paddle at a horizontal offset from its center
    Attached { offset: f32 },
    /// Ball is free-moving
    Free,
}

/// Ball color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallColor {
    #[default]
    Normal,
    Fire,
}

impl BallColor {
    pub fn hex(self) -> u32 {
        match self {
            BallColor::Normal => 0x00ffff,
            BallColor::Fire => 0xff4500,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Nominal speed (velocity magnitude on launch and paddle spin)
    pub speed: f32,
    pub color: BallColor,
    pub state: BallState,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Ball {
    /// A free ball heading up and to the right at `speed` per axis
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(speed, -speed),
            radius: BALL_RADIUS,
            speed,
            color: BallColor::Normal,
            state: BallState::Free,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// A ball waiting on the paddle for launch
    pub fn attached(paddle: &Paddle, speed: f32) -> Self {
        let mut ball = Self::new(paddle.pos, speed);
        ball.vel = Vec2::ZERO;
        ball.state = BallState::Attached { offset: 0.0 };
        ball.follow_paddle(paddle);
        ball
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, BallState::Attached { .. })
    }

    /// Advance position, bounce off side and top walls, record trail
    pub fn update(&mut self, dt: f32, field_width: f32) {
        self.pos += self.vel * dt;
        collision::reflect_off_walls(self, field_width);

        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Slave an attached ball to the paddle top
    pub fn follow_paddle(&mut self, paddle: &Paddle) {
        if let BallState::Attached { offset } = self.state {
            self.pos = Vec2::new(
                paddle.pos.x + offset,
                paddle.top() - self.radius - BALL_ATTACH_GAP,
            );
            self.vel = Vec2::ZERO;
        }
    }

    /// Stick to the paddle where it touched
    pub fn attach(&mut self, paddle: &Paddle) {
        let half = paddle.width / 2.0;
        let offset = (self.pos.x - paddle.pos.x).clamp(-half, half);
        self.state = BallState::Attached { offset };
        self.trail.clear();
        self.follow_paddle(paddle);
    }

    /// Release an attached ball upward with a random horizontal component
    pub fn launch(&mut self, rng: &mut Pcg32) {
        if self.is_attached() {
            let spread = rng.random::<f32>() - 0.5;
            self.vel = Vec2::new(self.speed * spread * 2.0, -self.speed);
            self.state = BallState::Free;
        }
    }

    /// Scale nominal speed and velocity together
    pub fn scale_speed(&mut self, factor: f32) {
        self.speed *= factor;
        self.vel *= factor;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Level paddle speed (informational, smoothing is fixed)
    pub speed: f32,
    /// Where the input layer wants the paddle center to be
    pub target_x: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed,
            target_x: pos.x,
        }
    }

    /// Paddle centered at the bottom of the field
    pub fn for_field(tuning: &Tuning, speed: f32) -> Self {
        Self::new(
            Vec2::new(
                tuning.field_width / 2.0,
                tuning.field_height - PADDLE_BOTTOM_OFFSET,
            ),
            speed,
        )
    }

    pub fn move_to(&mut self, x: f32) {
        self.target_x = x;
    }

    /// Ease toward the target then clamp inside the field
    pub fn update(&mut self, field_width: f32) {
        let dx = self.target_x - self.pos.x;
        self.pos.x += dx * PADDLE_SMOOTHING;

        let half = self.width / 2.0;
        self.pos.x = self.pos.x.min(field_width - half).max(half);
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }
}

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickKind {
    Normal,
    Hard,
    Metal,
    Gold,
    Explosive,
}

/// Immutable per-kind brick data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickSpec {
    pub health: u8,
    pub color: u32,
    pub points: u64,
    /// Destroying it may drop a pickup
    pub power_up: bool,
    /// Destroying it damages nearby bricks
    pub explosive: bool,
}

impl BrickKind {
    pub const ALL: [BrickKind; 5] = [
        BrickKind::Normal,
        BrickKind::Hard,
        BrickKind::Metal,
        BrickKind::Gold,
        BrickKind::Explosive,
    ];

    pub const fn spec(self) -> BrickSpec {
        match self {
            BrickKind::Normal => BrickSpec {
                health: 1,
                color: 0xff006e,
                points: 10,
                power_up: false,
                explosive: false,
            },
            BrickKind::Hard => BrickSpec {
                health: 2,
                color: 0x8338ec,
                points: 20,
                power_up: false,
                explosive: false,
            },
            BrickKind::Metal => BrickSpec {
                health: 3,
                color: 0x3a86ff,
                points: 30,
                power_up: false,
                explosive: false,
            },
            BrickKind::Gold => BrickSpec {
                health: 1,
                color: 0xffd700,
                points: 50,
                power_up: true,
                explosive: false,
            },
            BrickKind::Explosive => BrickSpec {
                health: 1,
                color: 0xff4500,
                points: 40,
                power_up: false,
                explosive: true,
            },
        }
    }

    /// Level grid character; anything unrecognized is an empty cell
    pub fn from_grid_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(BrickKind::Normal),
            'H' => Some(BrickKind::Hard),
            'M' => Some(BrickKind::Metal),
            'G' => Some(BrickKind::Gold),
            'E' => Some(BrickKind::Explosive),
            _ => None,
        }
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: BrickKind,
    pub health: u8,
    pub destroyed: bool,
    /// Shake timer (frame units), cosmetic only
    pub animation: f32,
}

impl Brick {
    pub fn new(pos: Vec2, size: Vec2, kind: BrickKind) -> Self {
        Self {
            pos,
            size,
            kind,
            health: kind.spec().health,
            destroyed: false,
            animation: 0.0,
        }
    }

    /// Take one point of damage. Returns true if this destroyed the brick.
    pub fn hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.animation = BRICK_HIT_ANIMATION;
        if self.health == 0 {
            self.destroyed = true;
        }
        self.destroyed
    }

    /// Count down the shake timer
    pub fn update(&mut self, dt: f32) {
        if self.animation > 0.0 {
            self.animation -= dt;
        }
    }

    pub fn min(&self) -> Vec2 {
        self.pos
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    MultiBall,
    WidePaddle,
    SlowBall,
    FireBall,
    Catch,
}

/// Immutable per-kind power-up data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpSpec {
    pub color: u32,
    /// 0 = instantaneous
    pub duration_ms: u32,
    pub symbol: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::MultiBall,
        PowerUpKind::WidePaddle,
        PowerUpKind::SlowBall,
        PowerUpKind::FireBall,
        PowerUpKind::Catch,
    ];

    pub const fn spec(self) -> PowerUpSpec {
        match self {
            PowerUpKind::MultiBall => PowerUpSpec {
                color: 0x00ff00,
                duration_ms: 0,
                symbol: "⚡",
                name: "Multi Ball",
                description: "Splits all balls into 3!",
            },
            PowerUpKind::WidePaddle => PowerUpSpec {
                color: 0xff00ff,
                duration_ms: 10_000,
                symbol: "↔",
                name: "Wide Paddle",
                description: "Paddle width increased by 50%",
            },
            PowerUpKind::SlowBall => PowerUpSpec {
                color: 0x00ffff,
                duration_ms: 8_000,
                symbol: "🐌",
                name: "Slow Motion",
                description: "Ball speed reduced by 30%",
            },
            PowerUpKind::FireBall => PowerUpSpec {
                color: 0xff4500,
                duration_ms: 12_000,
                symbol: "🔥",
                name: "Fire Ball",
                description: "Ball destroys bricks in one hit!",
            },
            PowerUpKind::Catch => PowerUpSpec {
                color: 0xffff00,
                duration_ms: 15_000,
                symbol: "🧲",
                name: "Magnetic Paddle",
                description: "Ball sticks to paddle on contact",
            },
        }
    }

    pub fn is_instant(self) -> bool {
        self.spec().duration_ms == 0
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Cosmetic spin
    pub angle: f32,
    pub kind: PowerUpKind,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            radius: PICKUP_RADIUS,
            speed: PICKUP_FALL_SPEED,
            angle: 0.0,
            kind,
            collected: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
        self.angle += PICKUP_SPIN_SPEED * dt;
    }
}

/// Timer record for a collected power-up with a duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub start_ms: f64,
    pub end_ms: f64,
    pub duration_ms: f64,
}

impl ActivePowerUp {
    pub fn new(now_ms: f64, duration_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            end_ms: now_ms + duration_ms,
            duration_ms,
        }
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms > self.end_ms
    }

    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.end_ms - now_ms).max(0.0)
    }

    /// Whole seconds left, rounded up (HUD countdown)
    pub fn remaining_secs(&self, now_ms: f64) -> u32 {
        (self.remaining_ms(now_ms) / 1000.0).ceil() as u32
    }

    /// 1.0 right after collection, 0.0 at expiry (HUD bar)
    pub fn remaining_fraction(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            0.0
        } else {
            self.remaining_ms(now_ms) / self.duration_ms
        }
    }
}

/// Notifications for the audio and UI collaborators, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball touched the paddle or a brick that survived, or was launched
    Hit,
    BrickBreak { kind: BrickKind },
    Combo { count: u32, level: u32 },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    LoseLife { lives: u8 },
    /// Accuracy is always reported as 100
    LevelComplete { level: usize, bonus: u64, accuracy: u8 },
    Win,
    GameOver { score: u64 },
    NewHighScore { score: u64 },
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub levels: Vec<LevelDescriptor>,
    /// Current level index (0-based)
    pub level_index: usize,
    pub score: u64,
    pub lives: u8,
    /// Best score known to the persistence collaborator
    pub high_score: u64,
    pub combo: u32,
    /// Wall-clock time of the last brick destruction
    pub last_brick_ms: Option<f64>,
    pub magnetic_paddle: bool,
    pub fire_ball: bool,
    pub phase: GamePhase,
    /// Simulated frames since the session started
    pub time_frames: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    /// At most one record per kind
    pub active_power_ups: BTreeMap<PowerUpKind, ActivePowerUp>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: ParticleSystem,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session on the built-in campaign
    pub fn new(seed: u64) -> Self {
        Self::with_levels(seed, Tuning::default(), builtin_levels())
    }

    pub fn with_levels(seed: u64, tuning: Tuning, levels: Vec<LevelDescriptor>) -> Self {
        let paddle_speed = levels.first().map(|l| l.paddle_speed).unwrap_or(0.0);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            paddle: Paddle::for_field(&tuning, paddle_speed),
            lives: tuning.starting_lives,
            tuning,
            levels,
            level_index: 0,
            score: 0,
            high_score: 0,
            combo: 0,
            last_brick_ms: None,
            magnetic_paddle: false,
            fire_ball: false,
            phase: GamePhase::Start,
            time_frames: 0,
            balls: Vec::new(),
            bricks: Vec::new(),
            power_ups: Vec::new(),
            active_power_ups: BTreeMap::new(),
            particles: ParticleSystem::default(),
            events: Vec::new(),
        }
    }

    /// Ball speed of the current level
    pub fn level_ball_speed(&self) -> f32 {
        self.levels
            .get(self.level_index)
            .map(|l| l.ball_speed)
            .unwrap_or(0.0)
    }

    /// True while any ball waits on the paddle
    pub fn ball_attached(&self) -> bool {
        self.balls.iter().any(Ball::is_attached)
    }

    /// Spawn a ball attached to the paddle
    pub fn spawn_ball_attached(&mut self) {
        let ball = Ball::attached(&self.paddle, self.level_ball_speed());
        self.balls.push(ball);
    }

    pub fn is_power_up_active(&self, kind: PowerUpKind) -> bool {
        self.active_power_ups.contains_key(&kind)
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
