//! Particle system - two pools sharing one capacity bound, integrated with
//! the same drag/gravity physics every frame.

mod emitters;

use bevy::prelude::*;

use crate::game::{MAX_PARTICLES, PARTICLE_DRAG, PARTICLE_GRAVITY, PARTICLE_MIN_SIZE};

/// Which pool a particle lives in. Background draws first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Background,
    Foreground,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub color: Color,
    pub size: f32,
    /// Lingers around the snake; drawn at reduced opacity.
    pub persistent: bool,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, life: f32, color: Color, size: f32) -> Self {
        debug_assert!(life > 0.0, "particle life must be positive");
        Particle {
            position,
            velocity,
            life,
            max_life: life,
            color,
            size,
            persistent: false,
        }
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    /// Advances one frame. Returns false once the particle has expired.
    pub fn integrate(&mut self, dt: f32) -> bool {
        self.velocity *= PARTICLE_DRAG;
        self.velocity += PARTICLE_GRAVITY * dt;
        self.position += self.velocity * dt;
        self.life -= dt;
        self.life > 0.0
    }

    /// Remaining life as a fraction of the starting life.
    pub fn life_fraction(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    /// Draw alpha and edge length for this particle in the given pool.
    pub fn appearance(&self, pool: PoolKind) -> (f32, f32) {
        let base_alpha = match pool {
            PoolKind::Background => 0.4,
            PoolKind::Foreground if self.persistent => 0.25,
            PoolKind::Foreground => 1.0,
        };
        let t = self.life_fraction();
        let size = (self.size * (0.5 + t * 0.5)).max(PARTICLE_MIN_SIZE);
        (base_alpha * t, size)
    }
}

/// Unordered particle storage. Removal swaps the last particle into the hole.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    fn integrate(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].integrate(dt) {
                i += 1;
            } else {
                self.particles.swap_remove(i);
            }
        }
    }

    fn clear(&mut self) {
        self.particles.clear();
    }
}

/// Background and foreground pools bounded by one shared cap.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    background: ParticlePool,
    foreground: ParticlePool,
    capacity: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        ParticleSystem::with_capacity(MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn with_capacity(capacity: usize) -> Self {
        ParticleSystem {
            background: ParticlePool::default(),
            foreground: ParticlePool::default(),
            capacity,
        }
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total(&self) -> usize {
        self.background.len() + self.foreground.len()
    }

    pub fn is_full(&self) -> bool {
        self.total() >= self.capacity
    }

    pub fn pool(&self, kind: PoolKind) -> &ParticlePool {
        match kind {
            PoolKind::Background => &self.background,
            PoolKind::Foreground => &self.foreground,
        }
    }

    /// Adds a particle unless the cap is reached. Dropped requests are not queued
    /// and existing particles are never evicted.
    pub fn spawn(&mut self, kind: PoolKind, particle: Particle) -> bool {
        if self.is_full() {
            return false;
        }
        match kind {
            PoolKind::Background => self.background.push(particle),
            PoolKind::Foreground => self.foreground.push(particle),
        }
        true
    }

    pub fn integrate(&mut self, dt: f32) {
        self.background.integrate(dt);
        self.foreground.integrate(dt);
    }

    pub fn clear(&mut self) {
        self.background.clear();
        self.foreground.clear();
    }
}
