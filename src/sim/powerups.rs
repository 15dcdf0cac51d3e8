//! Power-up activation manager
//!
//! Each kind is either inactive or active. Timed kinds get one record in
//! `GameState::active_power_ups`. Every collection applies the immediate
//! effect; collecting a kind that is already active also replaces its record
//! (the timer restarts). Expiry reverts the effect exactly once.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;

use super::state::{ActivePowerUp, Ball, BallColor, GameEvent, GameState, PowerUpKind};
use crate::consts::{PADDLE_WIDE_WIDTH, PADDLE_WIDTH};

/// Balls spawned per existing ball by MultiBall
const MULTI_BALL_SPLIT: usize = 2;

/// Catch a pickup of `kind` at `pos`
pub fn collect(state: &mut GameState, kind: PowerUpKind, pos: Vec2, now_ms: f64) {
    state.events.push(GameEvent::PowerUpCollected { kind });
    state.particles.power_up_collect(&mut state.rng, pos);
    state.score += state.tuning.power_up_collect_points;

    let spec = kind.spec();
    if state.is_power_up_active(kind) {
        log::debug!("{} refreshed", spec.name);
    } else {
        log::info!("{} activated", spec.name);
    }
    if spec.duration_ms > 0 {
        state
            .active_power_ups
            .insert(kind, ActivePowerUp::new(now_ms, spec.duration_ms as f64));
    }
    activate(state, kind);
}

/// Apply the immediate effect of `kind`
fn activate(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::MultiBall => multi_ball(state),
        PowerUpKind::WidePaddle => state.paddle.width = PADDLE_WIDE_WIDTH,
        PowerUpKind::SlowBall => {
            let factor = state.tuning.slow_factor;
            for ball in &mut state.balls {
                ball.scale_speed(factor);
            }
        }
        PowerUpKind::FireBall => {
            state.fire_ball = true;
            for ball in &mut state.balls {
                ball.color = BallColor::Fire;
            }
        }
        PowerUpKind::Catch => state.magnetic_paddle = true,
    }
}

/// Revert the effect of `kind`
fn deactivate(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::MultiBall => {}
        PowerUpKind::WidePaddle => state.paddle.width = PADDLE_WIDTH,
        PowerUpKind::SlowBall => {
            let factor = state.tuning.slow_factor;
            for ball in &mut state.balls {
                ball.speed /= factor;
                ball.vel /= factor;
            }
        }
        PowerUpKind::FireBall => {
            state.fire_ball = false;
            for ball in &mut state.balls {
                ball.color = BallColor::Normal;
            }
        }
        PowerUpKind::Catch => state.magnetic_paddle = false,
    }
}

/// Every current ball spawns two more at its position, aimed within ±45°
/// of straight up at the same speed
pub fn multi_ball(state: &mut GameState) {
    let sources: Vec<(Vec2, f32, f32)> = state
        .balls
        .iter()
        .map(|b| (b.pos, b.radius, b.speed))
        .collect();

    for (pos, radius, speed) in sources {
        for _ in 0..MULTI_BALL_SPLIT {
            let angle = (state.rng.random::<f32>() - 0.5) * FRAC_PI_2;
            let mut ball = Ball::new(pos, speed);
            ball.radius = radius;
            ball.vel = Vec2::new(speed * angle.sin(), -speed * angle.cos());
            state.balls.push(ball);
        }
    }
}

/// Deactivate and drop every record whose end time has passed
pub fn expire(state: &mut GameState, now_ms: f64) {
    let expired: Vec<PowerUpKind> = state
        .active_power_ups
        .iter()
        .filter(|(_, active)| active.is_expired(now_ms))
        .map(|(kind, _)| *kind)
        .collect();

    for kind in expired {
        state.active_power_ups.remove(&kind);
        deactivate(state, kind);
        state.events.push(GameEvent::PowerUpExpired { kind });
        log::info!("{} expired", kind.spec().name);
    }
}

/// Revert everything (level load)
pub fn clear_all(state: &mut GameState) {
    let active: Vec<PowerUpKind> = state.active_power_ups.keys().copied().collect();
    for kind in active {
        deactivate(state, kind);
    }
    state.active_power_ups.clear();
    state.fire_ball = false;
    state.magnetic_paddle = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(9);
        state.start_game();
        state.launch_ball();
        state
    }

    #[test]
    fn test_multi_ball_triples_one_ball() {
        let mut state = playing_state();
        let speed = state.balls[0].speed;
        collect(&mut state, PowerUpKind::MultiBall, Vec2::ZERO, 0.0);

        assert_eq!(state.balls.len(), 3);
        assert!(state.active_power_ups.is_empty());
        for ball in &state.balls[1..] {
            assert_eq!(ball.speed, speed);
            assert!((ball.vel.length() - speed).abs() < 1e-4);
            assert!(ball.vel.y < 0.0);
            // Within 45 degrees of straight up
            assert!(ball.vel.x.abs() <= -ball.vel.y + 1e-4);
            assert_eq!(ball.pos, state.balls[0].pos);
        }
    }

    #[test]
    fn test_slow_ball_round_trip() {
        let mut state = playing_state();
        let speed = state.balls[0].speed;
        let vel = state.balls[0].vel;

        collect(&mut state, PowerUpKind::SlowBall, Vec2::ZERO, 1000.0);
        assert!((state.balls[0].speed - speed * 0.7).abs() < 1e-5);

        expire(&mut state, 8999.0);
        assert!(state.is_power_up_active(PowerUpKind::SlowBall));

        expire(&mut state, 9001.0);
        assert!(!state.is_power_up_active(PowerUpKind::SlowBall));
        assert!((state.balls[0].speed - speed).abs() < 1e-4);
        assert!((state.balls[0].vel - vel).length() < 1e-4);
    }

    #[test]
    fn test_slow_ball_skips_later_balls() {
        let mut state = playing_state();
        collect(&mut state, PowerUpKind::SlowBall, Vec2::ZERO, 0.0);
        let slowed = state.balls[0].speed;
        state.spawn_ball_attached();
        let fresh = state.balls[1].speed;
        assert!(fresh > slowed);
    }

    #[test]
    fn test_recollect_refreshes_timer_and_reapplies() {
        let mut state = playing_state();
        let speed = state.balls[0].speed;
        collect(&mut state, PowerUpKind::SlowBall, Vec2::ZERO, 0.0);
        collect(&mut state, PowerUpKind::SlowBall, Vec2::ZERO, 5000.0);

        assert_eq!(state.active_power_ups.len(), 1);
        assert_eq!(state.active_power_ups[&PowerUpKind::SlowBall].end_ms, 13_000.0);
        // Slowed again by the second pickup
        assert!((state.balls[0].speed - speed * 0.49).abs() < 1e-4);

        // First timer would have lapsed at 8000
        expire(&mut state, 9000.0);
        assert!(state.is_power_up_active(PowerUpKind::SlowBall));
        // A single expiry undoes one slowdown
        expire(&mut state, 13_001.0);
        assert!((state.balls[0].speed - speed * 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_recollect_slows_ball_served_after_first_pickup() {
        let mut state = playing_state();
        collect(&mut state, PowerUpKind::SlowBall, Vec2::ZERO, 0.0);

        // Life lost: a fresh ball at level speed replaces the slowed one
        state.balls.clear();
        state.spawn_ball_attached();
        state.launch_ball();
        let speed = state.balls[0].speed;
        let vel = state.balls[0].vel;

        collect(&mut state, PowerUpKind::SlowBall, Vec2::ZERO, 4000.0);
        assert!((state.balls[0].speed - speed * 0.7).abs() < 1e-4);

        expire(&mut state, 20_000.0);
        assert!(!state.is_power_up_active(PowerUpKind::SlowBall));
        assert!((state.balls[0].speed - speed).abs() < 1e-4);
        assert!((state.balls[0].vel - vel).length() < 1e-4);
    }

    #[test]
    fn test_recollect_fire_recolors_new_balls() {
        let mut state = playing_state();
        collect(&mut state, PowerUpKind::FireBall, Vec2::ZERO, 0.0);
        multi_ball(&mut state);
        assert_eq!(state.balls[1].color, BallColor::Normal);

        collect(&mut state, PowerUpKind::FireBall, Vec2::ZERO, 1000.0);
        assert!(state.balls.iter().all(|b| b.color == BallColor::Fire));
    }

    #[test]
    fn test_wide_paddle_and_expiry_event() {
        let mut state = playing_state();
        collect(&mut state, PowerUpKind::WidePaddle, Vec2::ZERO, 0.0);
        assert_eq!(state.paddle.width, PADDLE_WIDE_WIDTH);
        state.drain_events();

        expire(&mut state, 10_001.0);
        assert_eq!(state.paddle.width, PADDLE_WIDTH);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PowerUpExpired { kind: PowerUpKind::WidePaddle }]
        );

        // Deactivation happens exactly once
        expire(&mut state, 20_000.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_fire_and_catch_flags() {
        let mut state = playing_state();
        collect(&mut state, PowerUpKind::FireBall, Vec2::ZERO, 0.0);
        collect(&mut state, PowerUpKind::Catch, Vec2::ZERO, 0.0);
        assert!(state.fire_ball);
        assert!(state.magnetic_paddle);
        assert_eq!(state.balls[0].color, BallColor::Fire);

        expire(&mut state, 12_001.0);
        assert!(!state.fire_ball);
        assert!(state.magnetic_paddle);
        assert_eq!(state.balls[0].color, BallColor::Normal);

        expire(&mut state, 15_001.0);
        assert!(!state.magnetic_paddle);
    }

    #[test]
    fn test_collect_awards_points() {
        let mut state = playing_state();
        collect(&mut state, PowerUpKind::Catch, Vec2::ZERO, 0.0);
        assert_eq!(state.score, 25);
    }

    #[test]
    fn test_clear_all_reverts_everything() {
        let mut state = playing_state();
        collect(&mut state, PowerUpKind::WidePaddle, Vec2::ZERO, 0.0);
        collect(&mut state, PowerUpKind::FireBall, Vec2::ZERO, 0.0);
        clear_all(&mut state);
        assert!(state.active_power_ups.is_empty());
        assert_eq!(state.paddle.width, PADDLE_WIDTH);
        assert!(!state.fire_ball);
    }
}
