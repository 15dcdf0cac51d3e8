//! Brick damage, scoring, combos, pickup drops and explosions

use rand::Rng;

use super::state::{Brick, GameEvent, GameState, PowerUp, PowerUpKind};
use crate::consts::COMBO_CUE_CAP;

/// Explosion particle count
const EXPLOSION_PARTICLES: usize = 40;
const EXPLOSION_COLOR: u32 = 0xff4500;

/// Apply a ball hit to a brick. Fire balls destroy outright.
/// Returns true if the brick was destroyed.
pub fn damage_brick(brick: &mut Brick, fire_ball: bool) -> bool {
    if fire_ball {
        brick.health = 0;
        brick.destroyed = true;
        brick.animation = crate::consts::BRICK_HIT_ANIMATION;
        true
    } else {
        brick.hit()
    }
}

/// Advance the combo counter for a destruction at `now_ms`.
/// Returns the bonus points awarded.
pub fn register_combo(state: &mut GameState, now_ms: f64) -> u64 {
    let within_window = state
        .last_brick_ms
        .is_some_and(|last| now_ms - last < state.tuning.combo_timeout_ms);

    let mut bonus = 0;
    if within_window {
        state.combo += 1;
        if state.combo > 1 {
            bonus = state.combo as u64 * state.tuning.combo_bonus;
            state.score += bonus;
            state.events.push(GameEvent::Combo {
                count: state.combo,
                level: state.combo.min(COMBO_CUE_CAP),
            });
        }
    } else {
        state.combo = 1;
    }
    state.last_brick_ms = Some(now_ms);
    bonus
}

/// Full consequences of a ball destroying the brick at `index`: points,
/// debris, combo, pickup drop and (for explosive bricks) one-hop area damage.
/// The brick stays in the collection flagged destroyed; the caller sweeps it.
pub fn on_brick_destroyed(state: &mut GameState, index: usize, now_ms: f64) {
    let brick = &state.bricks[index];
    let kind = brick.kind;
    let spec = kind.spec();
    let center = brick.center();

    state.score += spec.points;
    state.particles.brick_break(&mut state.rng, center, spec.color);
    state.events.push(GameEvent::BrickBreak { kind });

    register_combo(state, now_ms);

    let drop_chance = state.tuning.power_up_drop_chance.clamp(0.0, 1.0);
    if spec.power_up && state.rng.random_bool(drop_chance) {
        let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
        log::debug!("Dropping {:?} pickup", kind);
        state.power_ups.push(PowerUp::new(center, kind));
    }

    if spec.explosive {
        explode(state, index);
    }
}

/// Hit every other live brick whose center lies within the explosion radius.
/// Bricks destroyed here award no points and never explode themselves.
pub fn explode(state: &mut GameState, index: usize) {
    let origin = state.bricks[index].center();
    let radius = state.tuning.explosion_radius;

    state.particles.explosion(&mut state.rng, origin, EXPLOSION_COLOR, EXPLOSION_PARTICLES);

    let mut chained = 0;
    for (i, other) in state.bricks.iter_mut().enumerate() {
        if i == index || other.destroyed {
            continue;
        }
        if other.center().distance(origin) < radius && other.hit() {
            let color = other.kind.spec().color;
            state.particles.brick_break(&mut state.rng, other.center(), color);
            state.events.push(GameEvent::BrickBreak { kind: other.kind });
            chained += 1;
        }
    }
    if chained > 0 {
        log::debug!("Explosion destroyed {} neighbouring bricks", chained);
    }
}

/// Drop destroyed bricks from the active collection
pub fn sweep_destroyed(state: &mut GameState) {
    state.bricks.retain(|b| !b.destroyed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BrickKind;
    use glam::Vec2;

    fn brick_at(x: f32, y: f32, kind: BrickKind) -> Brick {
        Brick::new(Vec2::new(x, y), Vec2::new(60.0, 21.0), kind)
    }

    fn state_with(bricks: Vec<Brick>) -> GameState {
        let mut state = GameState::new(42);
        state.bricks = bricks;
        state
    }

    #[test]
    fn test_fire_ball_destroys_metal_outright() {
        let mut brick = brick_at(0.0, 0.0, BrickKind::Metal);
        assert!(damage_brick(&mut brick, true));
        assert!(brick.destroyed);
        assert_eq!(brick.health, 0);

        let mut brick = brick_at(0.0, 0.0, BrickKind::Metal);
        assert!(!damage_brick(&mut brick, false));
        assert_eq!(brick.health, 2);
    }

    #[test]
    fn test_combo_sequence_resets_after_timeout() {
        let mut state = GameState::new(1);
        let mut combos = Vec::new();
        for t in [500.0, 1000.0, 2500.0] {
            register_combo(&mut state, t);
            combos.push(state.combo);
        }
        assert_eq!(combos, vec![1, 2, 1]);
        // Only the second destruction earned a bonus (2 * 5)
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_combo_bonus_and_cue_cap() {
        let mut state = GameState::new(1);
        for i in 0..7 {
            register_combo(&mut state, i as f64 * 100.0);
        }
        assert_eq!(state.combo, 7);
        // 2+3+4+5+6+7 = 27 steps of 5
        assert_eq!(state.score, 135);
        let last = state.drain_events().into_iter().last();
        assert_eq!(last, Some(GameEvent::Combo { count: 7, level: 5 }));
    }

    #[test]
    fn test_destroying_ten_normal_bricks_without_combo() {
        let bricks = (0..10)
            .map(|i| brick_at(30.0 + i as f32 * 74.0, 102.0, BrickKind::Normal))
            .collect();
        let mut state = state_with(bricks);
        for i in 0..10 {
            assert!(damage_brick(&mut state.bricks[i], false));
            // Two seconds apart: never a combo
            on_brick_destroyed(&mut state, i, i as f64 * 2000.0);
        }
        sweep_destroyed(&mut state);
        assert_eq!(state.score, 100);
        assert_eq!(state.combo, 1);
        assert!(state.bricks.is_empty());
    }

    #[test]
    fn test_explosion_is_single_hop() {
        // Row of explosives 64 apart: each only reaches its direct neighbours
        let bricks = vec![
            brick_at(0.0, 100.0, BrickKind::Explosive),
            brick_at(64.0, 100.0, BrickKind::Explosive),
            brick_at(128.0, 100.0, BrickKind::Explosive),
            brick_at(192.0, 100.0, BrickKind::Explosive),
        ];
        let mut state = state_with(bricks);
        assert!(damage_brick(&mut state.bricks[0], false));
        on_brick_destroyed(&mut state, 0, 0.0);

        assert!(state.bricks[1].destroyed);
        // Brick 2 is in range of brick 1 only: no second-order explosion
        assert!(!state.bricks[2].destroyed);
        assert!(!state.bricks[3].destroyed);
        // Only the brick the ball destroyed scores
        assert_eq!(state.score, 40);

        sweep_destroyed(&mut state);
        assert_eq!(state.bricks.len(), 2);
    }

    #[test]
    fn test_explosion_damages_multi_hit_bricks_once() {
        let bricks = vec![
            brick_at(0.0, 100.0, BrickKind::Explosive),
            brick_at(64.0, 100.0, BrickKind::Metal),
            brick_at(0.0, 125.0, BrickKind::Hard),
        ];
        let mut state = state_with(bricks);
        assert!(damage_brick(&mut state.bricks[0], false));
        on_brick_destroyed(&mut state, 0, 0.0);
        assert_eq!(state.bricks[1].health, 2);
        assert_eq!(state.bricks[2].health, 1);
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_explosion_victims_award_no_points() {
        let bricks = vec![
            brick_at(0.0, 100.0, BrickKind::Explosive),
            brick_at(64.0, 100.0, BrickKind::Normal),
        ];
        let mut state = state_with(bricks);
        assert!(damage_brick(&mut state.bricks[0], false));
        on_brick_destroyed(&mut state, 0, 0.0);

        assert!(state.bricks[1].destroyed);
        assert_eq!(state.score, BrickKind::Explosive.spec().points);
        let breaks = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::BrickBreak { .. }))
            .count();
        assert_eq!(breaks, 2);
    }

    #[test]
    fn test_gold_drops_only_from_power_up_bricks() {
        let mut state = state_with(vec![brick_at(0.0, 0.0, BrickKind::Normal)]);
        state.tuning.power_up_drop_chance = 1.0;
        state.bricks[0].hit();
        on_brick_destroyed(&mut state, 0, 0.0);
        assert!(state.power_ups.is_empty());

        let mut state = state_with(vec![brick_at(0.0, 0.0, BrickKind::Gold)]);
        state.tuning.power_up_drop_chance = 1.0;
        state.bricks[0].hit();
        on_brick_destroyed(&mut state, 0, 0.0);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].pos, Vec2::new(30.0, 10.5));
    }

    #[test]
    fn test_gold_never_drops_at_zero_chance() {
        let mut state = state_with(vec![brick_at(0.0, 0.0, BrickKind::Gold)]);
        state.tuning.power_up_drop_chance = 0.0;
        state.bricks[0].hit();
        on_brick_destroyed(&mut state, 0, 0.0);
        assert!(state.power_ups.is_empty());
    }
}
