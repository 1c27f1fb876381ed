//! The explicit simulation state and its per-frame `advance`.

use bevy::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::time::Duration;

use super::{
    CHERRY_PARTICLE_DURATION, FACE_INTERVAL, FACES, GameEvent, Grid, INITIAL_VIEWPORT,
    InputIntents, MoveScheduler, Position, SCORE_POSITION, ScreenShake, VIEWPORT_GROWTH, Viewport,
    finished_timer,
};
use crate::death::DeathSequence;
use crate::food::{Pickup, spawn_pickup};
use crate::particles::ParticleSystem;
use crate::rendering::FrameSnapshot;
use crate::snake::{Snake, StepOutcome};
use crate::streak::StreakTracker;

/// Viewport, grid, and the two counters.
#[derive(Debug, Clone)]
pub struct Arena {
    viewport: Vec2,
    grid: Grid,
    score: u32,
    /// Survives resets for the lifetime of the process.
    deaths: u32,
}

impl Default for Arena {
    fn default() -> Self {
        Arena {
            viewport: INITIAL_VIEWPORT,
            grid: Grid::from_viewport(INITIAL_VIEWPORT),
            score: 0,
            deaths: 0,
        }
    }
}

impl Arena {
    /// Widens the viewport by half a cell and re-derives the grid. Never shrinks.
    fn grow(&mut self, viewport: &mut impl Viewport) {
        let applied = viewport.resize(self.viewport + Vec2::splat(VIEWPORT_GROWTH));
        self.viewport = applied.max(self.viewport);
        self.grid = Grid::from_viewport(self.viewport);
    }

    fn restore(&mut self, viewport: &mut impl Viewport) {
        self.viewport = viewport.resize(INITIAL_VIEWPORT);
        self.grid = Grid::from_viewport(self.viewport);
        self.score = 0;
    }
}

/// Entire game state, mutated only by [`Game::advance`] and the one-shot
/// snapshot hand-off from the render pass.
#[derive(Resource)]
pub struct Game {
    arena: Arena,
    snake: Snake,
    pickup: Pickup,
    streak: StreakTracker,
    particles: ParticleSystem,
    shake: ScreenShake,
    death: DeathSequence,
    scheduler: MoveScheduler,
    head_glow: Timer,
    face_timer: Timer,
    face_index: usize,
    clock: f32,
    events: Vec<GameEvent>,
    rng: StdRng,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        let arena = Arena::default();
        let snake = Snake::new(arena.grid.center(), &arena.grid);
        let mut game = Game {
            pickup: Pickup {
                position: Position::new(0, 0),
            },
            arena,
            snake,
            streak: StreakTracker::default(),
            particles: ParticleSystem::default(),
            shake: ScreenShake::default(),
            death: DeathSequence::default(),
            scheduler: MoveScheduler::default(),
            head_glow: finished_timer(CHERRY_PARTICLE_DURATION),
            face_timer: Timer::from_seconds(FACE_INTERVAL, TimerMode::Repeating),
            face_index: 0,
            clock: 0.0,
            events: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        game.respawn_pickup();
        game
    }

    pub fn score(&self) -> u32 {
        self.arena.score
    }

    pub fn deaths(&self) -> u32 {
        self.arena.deaths
    }

    pub fn viewport(&self) -> Vec2 {
        self.arena.viewport
    }

    #[cfg(test)]
    pub fn grid(&self) -> &Grid {
        &self.arena.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn pickup(&self) -> &Pickup {
        &self.pickup
    }

    pub fn streak(&self) -> &StreakTracker {
        &self.streak
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn shake(&self) -> &ScreenShake {
        &self.shake
    }

    pub fn death(&self) -> &DeathSequence {
        &self.death
    }

    /// Seconds of live play since the process started; drives cosmetic pulses.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn face(&self) -> &'static str {
        FACES[self.face_index]
    }

    /// Events raised since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hands the captured frame to the death sequence if it asked for one.
    pub fn fulfil_snapshot(&mut self, snapshot: FrameSnapshot) {
        self.death.fulfil_snapshot(snapshot);
    }

    /// Advances the simulation by `dt` seconds. Movement, collision, and pickup
    /// effects resolve before particles integrate and before timers advance.
    pub fn advance(&mut self, input: &InputIntents, dt: f32, viewport: &mut impl Viewport) {
        if !self.death.is_alive() {
            if input.dismiss {
                self.death.dismiss();
            }
            if self.death.tick(dt) {
                self.reset(viewport);
            }
            return;
        }

        self.snake.steer_from_input(input);
        self.scheduler.accumulate(dt);
        while self
            .scheduler
            .try_consume(MoveScheduler::interval(self.streak.boosted()))
        {
            if !self.step(viewport) {
                break;
            }
        }
        if !self.death.is_alive() {
            return;
        }

        self.emit_continuous();
        self.particles.integrate(dt);
        self.streak.tick(dt);
        self.shake.tick(dt, &mut self.rng);

        let delta = Duration::from_secs_f32(dt);
        self.head_glow.tick(delta);
        let faces = self.face_timer.tick(delta).times_finished_this_tick() as usize;
        self.face_index = (self.face_index + faces) % FACES.len();
        self.clock += dt;
    }

    /// One snake step. Returns false when play was interrupted by a death or reset.
    fn step(&mut self, viewport: &mut impl Viewport) -> bool {
        match self.snake.step(&self.arena.grid) {
            StepOutcome::Collided(cell) => {
                self.die(cell);
                false
            }
            StepOutcome::Moved(head) if head == self.pickup.position => {
                self.consume_pickup(head, viewport)
            }
            StepOutcome::Moved(_) => true,
        }
    }

    fn consume_pickup(&mut self, head: Position, viewport: &mut impl Viewport) -> bool {
        let streak = self.streak.register_pickup(self.arena.score, &mut self.rng);
        self.arena.score += 1;
        self.snake.grow();

        if !self.respawn_pickup() {
            self.events.push(GameEvent::BoardFull {
                score: self.arena.score,
            });
            self.reset(viewport);
            return false;
        }

        let center = head.center();
        self.particles.emit_pickup_burst(
            center,
            self.streak.burst_baseline(),
            streak,
            &mut self.rng,
        );
        self.particles.emit_explosion(center, self.arena.score, &mut self.rng);
        self.head_glow = Timer::from_seconds(CHERRY_PARTICLE_DURATION, TimerMode::Once);

        self.arena.grow(viewport);
        if streak >= 2 {
            self.shake.trigger(streak);
        }
        self.streak.trigger_display();

        self.events.push(GameEvent::PickupConsumed {
            position: head,
            score: self.arena.score,
            streak,
        });
        true
    }

    fn respawn_pickup(&mut self) -> bool {
        match spawn_pickup(&self.arena.grid, &self.snake, &mut self.rng) {
            Some(pickup) => {
                self.pickup = pickup;
                true
            }
            None => false,
        }
    }

    fn die(&mut self, position: Position) {
        self.arena.deaths += 1;
        self.shake.clear();
        self.death.trigger(&mut self.rng);
        self.events.push(GameEvent::SnakeDied {
            position,
            score: self.arena.score,
            deaths: self.arena.deaths,
        });
    }

    /// Restores the starting playfield. The death counter is kept.
    fn reset(&mut self, viewport: &mut impl Viewport) {
        self.death.release();
        self.arena.restore(viewport);
        self.snake = Snake::new(self.arena.grid.center(), &self.arena.grid);
        self.particles.clear();
        self.streak.clear();
        self.shake.clear();
        self.scheduler.reset();
        self.head_glow = finished_timer(CHERRY_PARTICLE_DURATION);
        self.respawn_pickup();
        self.events.push(GameEvent::Reset);
    }

    fn emit_continuous(&mut self) {
        let score = self.arena.score;
        let streak = self.streak.count();

        self.particles.emit_ambient(score, self.arena.viewport, &mut self.rng);
        if !self.head_glow.is_finished() {
            self.particles
                .emit_head_glow(self.snake.head().center(), score, streak, &mut self.rng);
        }
        if self.streak.boosted() {
            let travel = self.snake.tail_direction().as_vec2();
            self.particles
                .emit_tail_trail(self.snake.tail().center(), travel, streak, &mut self.rng);
        }
        self.particles
            .emit_score_sparkle(SCORE_POSITION + Vec2::new(40.0, 8.0), &mut self.rng);
    }
}

#[cfg(test)]
impl Game {
    pub(crate) fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    pub(crate) fn set_pickup(&mut self, position: Position) {
        self.pickup = Pickup { position };
    }

    pub(crate) fn set_counters(&mut self, score: u32, deaths: u32) {
        self.arena.score = score;
        self.arena.deaths = deaths;
    }
}
