//! Per-frame simulation step
//!
//! Order of operations is fixed: paddle, balls (movement, bottom exit,
//! paddle, bricks), brick timers, pickups, power-up expiry, particles,
//! level-complete check.

use glam::Vec2;

use super::collision;
use super::powerups;
use super::scoring;
use super::state::{GameEvent, GamePhase, GameState};

/// Spark color where a ball meets the paddle
const PADDLE_SPARK_COLOR: u32 = 0xff00ff;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired paddle center (from mouse/touch position)
    pub target_x: Option<f32>,
    /// Launch attached balls (click/tap/space)
    pub launch: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game by `dt` frame units. `now_ms` is the wall clock used by
/// the combo window and power-up timers. Does nothing unless playing.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    if let Some(x) = input.target_x {
        state.paddle.move_to(x);
    }
    if input.launch {
        state.launch_ball();
    }

    state.time_frames += 1;
    let width = state.tuning.field_width;
    let height = state.tuning.field_height;

    state.paddle.update(width);

    for i in (0..state.balls.len()).rev() {
        if update_ball(state, i, dt, width, height) {
            collide_bricks(state, i, now_ms);
        }
    }

    for brick in &mut state.bricks {
        brick.update(dt);
    }

    update_pickups(state, dt, height, now_ms);
    powerups::expire(state, now_ms);
    state.particles.update(dt);

    if state.phase == GamePhase::Playing && state.bricks.is_empty() {
        state.level_complete();
    }
}

/// Move one ball and resolve walls, bottom exit and paddle.
/// Returns false if the ball is attached or gone.
fn update_ball(state: &mut GameState, i: usize, dt: f32, width: f32, height: f32) -> bool {
    let ball = &mut state.balls[i];
    if ball.is_attached() {
        ball.follow_paddle(&state.paddle);
        return false;
    }

    ball.update(dt, width);

    if ball.pos.y > height {
        state.balls.remove(i);
        if state.balls.is_empty() {
            state.lose_life();
        }
        return false;
    }

    if collision::ball_paddle_collision(ball, &state.paddle) {
        state.events.push(GameEvent::Hit);
        state.particles.trail(&mut state.rng, ball.pos, PADDLE_SPARK_COLOR);
        if state.magnetic_paddle {
            ball.attach(&state.paddle);
            log::debug!("Ball caught at offset {:.1}", ball.pos.x - state.paddle.pos.x);
        }
    }
    true
}

/// Test ball `i` against every live brick. Each overlap is resolved
/// independently in the same pass; destroyed bricks are swept afterwards.
fn collide_bricks(state: &mut GameState, i: usize, now_ms: f64) {
    for j in (0..state.bricks.len()).rev() {
        if state.bricks[j].destroyed {
            continue;
        }
        if !collision::ball_brick_collision(&mut state.balls[i], &state.bricks[j]) {
            continue;
        }

        if scoring::damage_brick(&mut state.bricks[j], state.fire_ball) {
            scoring::on_brick_destroyed(state, j, now_ms);
        } else {
            state.events.push(GameEvent::Hit);
        }
    }
    scoring::sweep_destroyed(state);
}

/// Drift pickups, collect the ones touching the paddle, drop the ones that
/// left the field
fn update_pickups(state: &mut GameState, dt: f32, height: f32, now_ms: f64) {
    for i in (0..state.power_ups.len()).rev() {
        let pickup = &mut state.power_ups[i];
        pickup.update(dt);

        if collision::pickup_paddle_collision(pickup, &state.paddle) {
            pickup.collected = true;
            let (kind, pos) = (pickup.kind, pickup.pos);
            state.power_ups.remove(i);
            powerups::collect(state, kind, pos, now_ms);
        } else if pickup.pos.y > height {
            state.power_ups.remove(i);
        }
    }
}

/// Demo-mode player: serve immediately, get under the lowest falling ball,
/// otherwise chase the nearest pickup
fn autopilot(state: &GameState, input: &mut TickInput) {
    if state.ball_attached() {
        input.launch = true;
    }

    let threat = state
        .balls
        .iter()
        .filter(|b| !b.is_attached() && b.vel.y > 0.0)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(ball) = threat {
        // Where the ball will cross the paddle line, folded back off the side walls
        let frames = ((state.paddle.top() - ball.pos.y) / ball.vel.y).max(0.0);
        let landing = fold_into_field(
            ball.pos.x + ball.vel.x * frames,
            ball.radius,
            state.tuning.field_width,
        );

        // Strike off-center so the return angle varies
        let time_factor = state.time_frames as f32 * 0.01;
        let offset = (time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15)
            * state.paddle.width
            / 2.0;
        input.target_x = Some(landing + offset);
        return;
    }

    let paddle = Vec2::new(state.paddle.pos.x, state.paddle.top());
    let nearest_pickup = state.power_ups.iter().min_by(|a, b| {
        a.pos
            .distance_squared(paddle)
            .partial_cmp(&b.pos.distance_squared(paddle))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(pickup) = nearest_pickup {
        input.target_x = Some(pickup.pos.x);
    } else if let Some(ball) = state.balls.iter().find(|b| !b.is_attached()) {
        input.target_x = Some(ball.pos.x);
    }
}

/// Reflect an unbounded x back between the side walls
fn fold_into_field(x: f32, radius: f32, field_width: f32) -> f32 {
    let span = field_width - 2.0 * radius;
    if span <= 0.0 {
        return field_width / 2.0;
    }
    let t = (x - radius).rem_euclid(2.0 * span);
    radius + if t > span { 2.0 * span - t } else { t }
}
