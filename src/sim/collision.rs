//! Collision detection and response
//!
//! Everything is an axis-aligned box test with the ball (or pickup) treated
//! as its bounding square: center ± radius against the other box.

use glam::Vec2;

use super::state::{Ball, Brick, Paddle, PowerUp};
use crate::consts::PADDLE_SPIN_FACTOR;

/// Which velocity component a brick hit flips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitAxis {
    /// Entered through the left or right face
    Horizontal,
    /// Entered through the top or bottom face
    Vertical,
}

/// Does a circle's bounding square touch the box `[min, max]`?
#[inline]
pub fn circle_box_overlap(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    center.x + radius >= min.x
        && center.x - radius <= max.x
        && center.y + radius >= min.y
        && center.y - radius <= max.y
}

/// Pick the face with the smallest penetration depth
pub fn penetration_axis(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> HitAxis {
    let overlap_left = center.x + radius - min.x;
    let overlap_right = max.x - (center.x - radius);
    let overlap_top = center.y + radius - min.y;
    let overlap_bottom = max.y - (center.y - radius);

    let min_overlap = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);

    if min_overlap == overlap_left || min_overlap == overlap_right {
        HitAxis::Horizontal
    } else {
        HitAxis::Vertical
    }
}

/// Bounce off the left, right and top walls. The bottom is open.
pub fn reflect_off_walls(ball: &mut Ball, field_width: f32) {
    let r = ball.radius;
    if ball.pos.x - r <= 0.0 || ball.pos.x + r >= field_width {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = ball.pos.x.min(field_width - r).max(r);
    }
    if ball.pos.y - r <= 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = r;
    }
}

/// Ball vs paddle. On contact the ball always heads up and its horizontal
/// velocity is steered by where it struck the paddle.
pub fn ball_paddle_collision(ball: &mut Ball, paddle: &Paddle) -> bool {
    let min = Vec2::new(paddle.left(), paddle.top());
    let max = Vec2::new(paddle.right(), paddle.bottom());
    if !circle_box_overlap(ball.pos, ball.radius, min, max) {
        return false;
    }

    ball.vel.y = -ball.vel.y.abs();

    let hit_offset = (ball.pos.x - paddle.pos.x) / (paddle.width / 2.0);
    ball.vel.x = ball.speed * hit_offset * PADDLE_SPIN_FACTOR;

    true
}

/// Ball vs brick. Flips the velocity component across the face with the
/// least penetration; no positional correction.
pub fn ball_brick_collision(ball: &mut Ball, brick: &Brick) -> bool {
    if !circle_box_overlap(ball.pos, ball.radius, brick.min(), brick.max()) {
        return false;
    }

    match penetration_axis(ball.pos, ball.radius, brick.min(), brick.max()) {
        HitAxis::Horizontal => ball.vel.x = -ball.vel.x,
        HitAxis::Vertical => ball.vel.y = -ball.vel.y,
    }

    true
}

/// Pickup vs paddle; any overlap collects
pub fn pickup_paddle_collision(pickup: &PowerUp, paddle: &Paddle) -> bool {
    let min = Vec2::new(paddle.left(), paddle.top());
    let max = Vec2::new(paddle.right(), paddle.bottom());
    circle_box_overlap(pickup.pos, pickup.radius, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BrickKind, PowerUpKind};

    fn paddle() -> Paddle {
        Paddle::new(Vec2::new(400.0, 550.0), 12.0)
    }

    #[test]
    fn test_paddle_hit_reflects_up() {
        let mut ball = Ball::new(Vec2::new(400.0, 540.0), 6.0);
        ball.vel = Vec2::new(2.0, 6.0);
        assert!(ball_paddle_collision(&mut ball, &paddle()));
        assert_eq!(ball.vel.y, -6.0);
        // Dead center: no steering
        assert_eq!(ball.vel.x, 0.0);
    }

    #[test]
    fn test_paddle_hit_never_reenters() {
        // Already moving up while overlapping: stays moving up
        let mut ball = Ball::new(Vec2::new(400.0, 545.0), 6.0);
        ball.vel = Vec2::new(0.0, -6.0);
        assert!(ball_paddle_collision(&mut ball, &paddle()));
        assert_eq!(ball.vel.y, -6.0);
    }

    #[test]
    fn test_paddle_edge_steers() {
        let mut ball = Ball::new(Vec2::new(450.0, 540.0), 8.0);
        ball.vel = Vec2::new(0.0, 8.0);
        assert!(ball_paddle_collision(&mut ball, &paddle()));
        assert!((ball.vel.x - 8.0 * 0.75).abs() < 1e-5);

        let mut ball = Ball::new(Vec2::new(375.0, 540.0), 8.0);
        ball.vel = Vec2::new(0.0, 8.0);
        assert!(ball_paddle_collision(&mut ball, &paddle()));
        assert!((ball.vel.x + 8.0 * 0.5 * 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_miss() {
        let mut ball = Ball::new(Vec2::new(200.0, 540.0), 6.0);
        let before = ball.vel;
        assert!(!ball_paddle_collision(&mut ball, &paddle()));
        assert_eq!(ball.vel, before);
    }

    #[test]
    fn test_brick_side_hit_flips_vx() {
        let brick = Brick::new(Vec2::new(100.0, 100.0), Vec2::new(60.0, 21.0), BrickKind::Normal);
        // Ball just touching the left face, vertically centered
        let mut ball = Ball::new(Vec2::new(97.0, 110.0), 5.0);
        ball.vel = Vec2::new(5.0, -1.0);
        assert!(ball_brick_collision(&mut ball, &brick));
        assert_eq!(ball.vel, Vec2::new(-5.0, -1.0));
    }

    #[test]
    fn test_brick_bottom_hit_flips_vy() {
        let brick = Brick::new(Vec2::new(100.0, 100.0), Vec2::new(60.0, 21.0), BrickKind::Normal);
        let mut ball = Ball::new(Vec2::new(130.0, 124.0), 5.0);
        ball.vel = Vec2::new(1.0, -5.0);
        assert!(ball_brick_collision(&mut ball, &brick));
        assert_eq!(ball.vel, Vec2::new(1.0, 5.0));
    }

    #[test]
    fn test_penetration_axis() {
        let min = Vec2::new(0.0, 0.0);
        let max = Vec2::new(100.0, 20.0);
        assert_eq!(penetration_axis(Vec2::new(50.0, -5.0), 8.0, min, max), HitAxis::Vertical);
        assert_eq!(penetration_axis(Vec2::new(105.0, 10.0), 8.0, min, max), HitAxis::Horizontal);
    }

    #[test]
    fn test_pickup_collection_box() {
        let paddle = paddle();
        let mut pickup = PowerUp::new(Vec2::new(460.0, 530.0), PowerUpKind::Catch);
        // Circle reaches x=445 and y=545: touches the paddle corner box
        assert!(pickup_paddle_collision(&pickup, &paddle));
        pickup.pos = Vec2::new(400.0, 520.0);
        assert!(!pickup_paddle_collision(&pickup, &paddle));
    }
}
