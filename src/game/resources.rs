//! Frame-level state: input intents, the move accumulator, and screen shake.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;
use std::time::Duration;

use super::{BASE_MOVE_INTERVAL, BOOST_DIVISOR, SHAKE_DURATION, SHAKE_MAX_AMPLITUDE};

/// Instantaneous player intents, polled once per frame. Nothing is buffered.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputIntents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub dismiss: bool,
}

/// Fixed-interval accumulator that turns frame time into discrete snake steps.
#[derive(Default, Debug, Clone)]
pub struct MoveScheduler {
    accumulator: f32,
}

impl MoveScheduler {
    /// Seconds per step, shortened while the speed boost holds.
    pub fn interval(boosted: bool) -> f32 {
        if boosted {
            BASE_MOVE_INTERVAL / BOOST_DIVISOR
        } else {
            BASE_MOVE_INTERVAL
        }
    }

    pub fn accumulate(&mut self, dt: f32) {
        self.accumulator += dt;
    }

    /// Takes one interval out of the accumulator if enough time has built up.
    /// Leftover time carries over to the next call.
    pub fn try_consume(&mut self, interval: f32) -> bool {
        if self.accumulator >= interval {
            self.accumulator -= interval;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// A one-shot timer that has already run out, for effects that start idle.
pub fn finished_timer(seconds: f32) -> Timer {
    let mut timer = Timer::from_seconds(seconds, TimerMode::Once);
    timer.finish();
    timer
}

/// Decaying random camera offset triggered by streak milestones.
#[derive(Debug, Clone)]
pub struct ScreenShake {
    timer: Timer,
    amplitude: f32,
    offset: Vec2,
}

impl Default for ScreenShake {
    fn default() -> Self {
        ScreenShake {
            timer: finished_timer(SHAKE_DURATION),
            amplitude: 0.0,
            offset: Vec2::ZERO,
        }
    }
}

impl ScreenShake {
    /// Restarts the shake with an amplitude that grows with the streak.
    pub fn trigger(&mut self, streak: u32) {
        self.timer = Timer::from_seconds(SHAKE_DURATION, TimerMode::Once);
        self.amplitude = (2.0 + 2.5 * streak as f32).min(SHAKE_MAX_AMPLITUDE);
    }

    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.timer.is_finished() {
            return;
        }

        self.timer.tick(Duration::from_secs_f32(dt));
        if self.timer.is_finished() {
            self.amplitude = 0.0;
            self.offset = Vec2::ZERO;
        } else {
            let decay = self.timer.fraction_remaining();
            let angle = rng.random_range(0.0..TAU);
            self.offset = Vec2::from_angle(angle) * self.amplitude * decay;
        }
    }

    pub fn clear(&mut self) {
        *self = ScreenShake::default();
    }

    pub fn is_active(&self) -> bool {
        !self.timer.is_finished()
    }

    #[cfg(test)]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Current render offset in pixels.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}
