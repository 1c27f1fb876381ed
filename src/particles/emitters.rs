//! Spawn policies: how many particles each trigger asks for, and where they go.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::{Particle, ParticleSystem, PoolKind};
use crate::game::{
    AMBIENT_COLOR, BACKGROUND_ENABLE_SCORE, CELL_SIZE, EXPLOSION_COLOR, HEAD_EMISSION_CAP,
    MAX_BURST_MULTIPLIER, SNAKE_OUTLINE_COLOR, TRAIL_COLOR, TRAIL_EMISSION_CAP,
};

fn random_unit(rng: &mut impl Rng) -> Vec2 {
    Vec2::from_angle(rng.random_range(0.0..TAU))
}

fn jitter(rng: &mut impl Rng, radius: f32) -> Vec2 {
    Vec2::new(
        rng.random_range(-radius..=radius),
        rng.random_range(-radius..=radius),
    )
}

/// Particles per frame for the ambient background field.
pub fn ambient_count(score: u32) -> usize {
    if score < BACKGROUND_ENABLE_SCORE {
        return 0;
    }
    1 + ((score - BACKGROUND_ENABLE_SCORE) / 2) as usize
}

/// Size of the pickup burst around the snake for a streak.
pub fn burst_count(baseline: u32, streak: u32) -> usize {
    (baseline * streak.max(1)).min(baseline * MAX_BURST_MULTIPLIER) as usize
}

pub fn explosion_count(score: u32) -> usize {
    36 + (score * 12).min(300) as usize
}

pub fn head_emission_count(score: u32, streak: u32) -> usize {
    (2 + score as usize / 3 + 3 * streak as usize).min(HEAD_EMISSION_CAP)
}

pub fn trail_count(streak: u32) -> usize {
    (1 + streak as usize / 2).min(TRAIL_EMISSION_CAP)
}

impl ParticleSystem {
    /// Requests `count` particles from `make`, stopping at the first dropped request.
    fn emit<R: Rng>(
        &mut self,
        kind: PoolKind,
        count: usize,
        rng: &mut R,
        mut make: impl FnMut(&mut R) -> Particle,
    ) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            if !self.spawn(kind, make(&mut *rng)) {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Slow, long-lived motes scattered over the whole viewport.
    pub fn emit_ambient(&mut self, score: u32, viewport: Vec2, rng: &mut impl Rng) -> usize {
        self.emit(PoolKind::Background, ambient_count(score), rng, |rng| {
            let position = Vec2::new(
                rng.random_range(0.0..viewport.x.max(1.0)),
                rng.random_range(0.0..viewport.y.max(1.0)),
            );
            let velocity = Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(-15.0..5.0));
            Particle::new(
                position,
                velocity,
                rng.random_range(6.0..12.0),
                AMBIENT_COLOR,
                rng.random_range(1.0..3.0),
            )
        })
    }

    /// Ring of lingering particles around the eaten cell, pushed outward harder as
    /// the streak grows.
    pub fn emit_pickup_burst(
        &mut self,
        center: Vec2,
        baseline: u32,
        streak: u32,
        rng: &mut impl Rng,
    ) -> usize {
        let push = 1.0 + 0.1 * streak as f32;
        self.emit(
            PoolKind::Foreground,
            burst_count(baseline, streak),
            rng,
            |rng| {
                let dir = random_unit(rng);
                let radius = rng.random_range(0.0..CELL_SIZE * 1.2);
                let speed = rng.random_range(40.0_f32..140.0) * push;
                Particle::new(
                    center + dir * radius,
                    dir * speed,
                    rng.random_range(0.5..1.4),
                    SNAKE_OUTLINE_COLOR,
                    rng.random_range(2.0..5.0),
                )
                .persistent()
            },
        )
    }

    /// Full radial spray from the pickup point.
    pub fn emit_explosion(&mut self, center: Vec2, score: u32, rng: &mut impl Rng) -> usize {
        self.emit(PoolKind::Foreground, explosion_count(score), rng, |rng| {
            let speed: f32 = rng.random_range(60.0..260.0);
            Particle::new(
                center,
                random_unit(rng) * speed,
                rng.random_range(0.6..1.8),
                EXPLOSION_COLOR,
                rng.random_range(2.0..5.0),
            )
        })
    }

    /// Per-frame glow around the head while the post-pickup window is open.
    pub fn emit_head_glow(
        &mut self,
        head: Vec2,
        score: u32,
        streak: u32,
        rng: &mut impl Rng,
    ) -> usize {
        self.emit(
            PoolKind::Foreground,
            head_emission_count(score, streak),
            rng,
            |rng| {
                Particle::new(
                    head + jitter(rng, CELL_SIZE / 2.0),
                    jitter(rng, 30.0),
                    rng.random_range(0.3..0.8),
                    SNAKE_OUTLINE_COLOR,
                    rng.random_range(1.0..3.0),
                )
                .persistent()
            },
        )
    }

    /// Short streaks left behind the tail during the speed boost. `travel` is the
    /// tail's unit direction of motion in pixel space.
    pub fn emit_tail_trail(
        &mut self,
        tail: Vec2,
        travel: Vec2,
        streak: u32,
        rng: &mut impl Rng,
    ) -> usize {
        let behind = tail - travel * CELL_SIZE * 0.5;
        self.emit(PoolKind::Foreground, trail_count(streak), rng, |rng| {
            let speed: f32 = rng.random_range(40.0..100.0);
            let velocity = -travel * speed + jitter(rng, 15.0);
            Particle::new(
                behind + jitter(rng, 4.0),
                velocity,
                rng.random_range(0.35..0.95),
                TRAIL_COLOR,
                rng.random_range(2.0..4.0),
            )
        })
    }

    /// One small pink spark drifting up from the score label.
    pub fn emit_score_sparkle(&mut self, anchor: Vec2, rng: &mut impl Rng) -> usize {
        self.emit(PoolKind::Foreground, 1, rng, |rng| {
            Particle::new(
                anchor + jitter(rng, 3.0),
                Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(-20.0..0.0)),
                0.6,
                SNAKE_OUTLINE_COLOR,
                rng.random_range(1.0..3.0),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn ambient_is_off_below_threshold() {
        assert_eq!(ambient_count(BACKGROUND_ENABLE_SCORE - 1), 0);
        assert_eq!(ambient_count(BACKGROUND_ENABLE_SCORE), 1);
        assert_eq!(ambient_count(BACKGROUND_ENABLE_SCORE + 5), 3);
    }

    #[test]
    fn burst_scales_with_streak_up_to_multiplier() {
        assert_eq!(burst_count(48, 0), 48);
        assert_eq!(burst_count(48, 1), 48);
        assert_eq!(burst_count(48, 3), 144);
        assert_eq!(burst_count(48, 50), 48 * MAX_BURST_MULTIPLIER as usize);
    }

    #[test]
    fn emission_counts_are_capped() {
        assert_eq!(explosion_count(0), 36);
        assert_eq!(explosion_count(100), 336);
        assert_eq!(head_emission_count(1000, 20), HEAD_EMISSION_CAP);
        assert_eq!(trail_count(20), TRAIL_EMISSION_CAP);
    }

    #[test]
    fn burst_stays_near_the_pickup_and_lingers() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut system = ParticleSystem::default();
        let center = Vec2::new(100.0, 100.0);
        let spawned = system.emit_pickup_burst(center, 48, 2, &mut rng);
        assert_eq!(spawned, 96);
        for p in system.pool(PoolKind::Foreground).iter() {
            assert!(p.persistent);
            assert!(p.position.distance(center) <= CELL_SIZE * 1.2 + 1e-3);
            assert!((p.position - center).dot(p.velocity) >= -1e-3, "velocity points outward");
        }
    }

    #[test]
    fn spawns_beyond_capacity_are_dropped() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut system = ParticleSystem::with_capacity(100);
        system.emit_ambient(BACKGROUND_ENABLE_SCORE + 40, Vec2::new(640.0, 480.0), &mut rng);
        assert_eq!(system.total(), 21);
        let spawned = system.emit_explosion(Vec2::ZERO, 50, &mut rng);
        assert_eq!(spawned, 79);
        assert_eq!(system.total(), system.capacity());
        assert_eq!(system.emit_score_sparkle(Vec2::ZERO, &mut rng), 0);
        assert_eq!(system.total(), system.capacity());
    }

    #[test]
    fn trail_spawns_behind_the_tail() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut system = ParticleSystem::default();
        let tail = Vec2::new(200.0, 200.0);
        let travel = Vec2::X;
        system.emit_tail_trail(tail, travel, 4, &mut rng);
        assert_eq!(system.total(), 3);
        for p in system.pool(PoolKind::Foreground).iter() {
            assert!(p.position.x < tail.x);
            assert!(!p.persistent);
            assert!((0.35..0.95).contains(&p.max_life));
        }
    }
}
