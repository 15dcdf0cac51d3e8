//! Cosmetic particle bursts
//!
//! Particles never feed back into gameplay. The render collaborator reads
//! them; the simulation only spawns and ages them.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Downward acceleration per frame unit
const PARTICLE_GRAVITY: f32 = 0.15;

/// Palette for the pickup burst
const COLLECT_COLORS: [u32; 4] = [0xff00ff, 0x00ff00, 0xffff00, 0x00ffff];

/// Default cap when no settings are applied
pub const MAX_PARTICLES: usize = 500;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub size: f32,
    /// Frame units left
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl Particle {
    /// Age the particle. Returns false once it has burned out.
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.vel.y += PARTICLE_GRAVITY * dt;
        self.lifetime -= dt;
        self.lifetime > 0.0
    }

    /// 1.0 when fresh, 0.0 when gone (alpha and size scale)
    pub fn alpha(&self) -> f32 {
        (self.lifetime / self.max_lifetime).max(0.0)
    }
}

/// Owned collection of live particles
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    capacity: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::with_capacity(MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::new(),
            capacity,
        }
    }

    /// Change the cap; excess particles are dropped oldest first
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.particles.len() > capacity {
            let excess = self.particles.len() - capacity;
            self.particles.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn push(&mut self, pos: Vec2, vel: Vec2, color: u32, size: f32, lifetime: f32) {
        if self.particles.len() >= self.capacity {
            return;
        }
        self.particles.push(Particle {
            pos,
            vel,
            color,
            size,
            lifetime,
            max_lifetime: lifetime,
        });
    }

    /// Evenly spaced ring of sparks
    pub fn explosion(&mut self, rng: &mut Pcg32, pos: Vec2, color: u32, count: usize) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = 2.0 + rng.random::<f32>() * 3.0;
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let size = 2.0 + rng.random::<f32>() * 3.0;
            let lifetime = 30.0 + rng.random::<f32>() * 20.0;
            self.push(pos, vel, color, size, lifetime);
        }
    }

    /// Small puff where the ball met the paddle
    pub fn trail(&mut self, rng: &mut Pcg32, pos: Vec2, color: u32) {
        for _ in 0..3 {
            let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
            let size = 1.0 + rng.random::<f32>() * 2.0;
            let lifetime = 10.0 + rng.random::<f32>() * 10.0;
            self.push(pos, vel, color, size, lifetime);
        }
    }

    /// Multicolored burst for a collected pickup
    pub fn power_up_collect(&mut self, rng: &mut Pcg32, pos: Vec2) {
        for _ in 0..30 {
            let angle = rng.random::<f32>() * TAU;
            let speed = 1.0 + rng.random::<f32>() * 4.0;
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let color = COLLECT_COLORS[rng.random_range(0..COLLECT_COLORS.len())];
            let size = 2.0 + rng.random::<f32>() * 4.0;
            let lifetime = 40.0 + rng.random::<f32>() * 20.0;
            self.push(pos, vel, color, size, lifetime);
        }
    }

    /// Debris kicked upward from a destroyed brick
    pub fn brick_break(&mut self, rng: &mut Pcg32, pos: Vec2, color: u32) {
        for _ in 0..15 {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * 4.0,
                -rng.random::<f32>() * 3.0 - 1.0,
            );
            let size = 1.0 + rng.random::<f32>() * 3.0;
            let lifetime = 20.0 + rng.random::<f32>() * 20.0;
            self.push(pos, vel, color, size, lifetime);
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.update(dt));
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_explosion_ring_and_decay() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::default();
        system.explosion(&mut rng, Vec2::new(100.0, 100.0), 0xff4500, 40);
        assert_eq!(system.len(), 40);

        // Longest lifetime is under 50 frame units
        for _ in 0..26 {
            system.update(2.0);
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: 0,
            size: 1.0,
            lifetime: 10.0,
            max_lifetime: 10.0,
        };
        assert!(p.update(1.0));
        assert!(p.vel.y > 0.0);
        assert!((p.alpha() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_capacity_caps_spawns() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::with_capacity(10);
        system.brick_break(&mut rng, Vec2::ZERO, 0xffffff);
        assert_eq!(system.len(), 10);

        system.set_capacity(4);
        assert_eq!(system.len(), 4);

        let mut off = ParticleSystem::with_capacity(0);
        off.power_up_collect(&mut rng, Vec2::ZERO);
        assert!(off.is_empty());
    }
}
