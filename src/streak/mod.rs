//! Streak tracker - combo counting, timeout decay, and the pop/idle/fade
//! animation of the on-screen streak number.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};
use std::time::Duration;

use crate::game::{
    BOOST_MIN_STREAK, MAX_STREAK, STREAK_FADE_DURATION, STREAK_POP_DURATION, STREAK_POP_PEAK,
    STREAK_TIMEOUT, finished_timer,
};

/// Combo state plus the display timers of the streak number.
#[derive(Debug, Clone)]
pub struct StreakTracker {
    count: u32,
    elapsed_since_last_pickup: f32,
    burst_baseline: u32,
    display_number: u32,
    pop_timer: Timer,
    fade_timer: Option<Timer>,
    idle_clock: f32,
    idle_phase: f32,
}

impl Default for StreakTracker {
    fn default() -> Self {
        StreakTracker {
            count: 0,
            elapsed_since_last_pickup: 0.0,
            burst_baseline: 0,
            display_number: 0,
            pop_timer: finished_timer(STREAK_POP_DURATION),
            fade_timer: None,
            idle_clock: 0.0,
            idle_phase: 0.0,
        }
    }
}

impl StreakTracker {
    /// Records a pickup. `score` is the score before this pickup is counted.
    /// Returns the updated streak count.
    pub fn register_pickup(&mut self, score: u32, rng: &mut impl Rng) -> u32 {
        if self.count > 0 && self.elapsed_since_last_pickup <= STREAK_TIMEOUT {
            self.count = (self.count + 1).min(MAX_STREAK);
        } else {
            self.count = 1;
            self.burst_baseline = 48 + (score * 8).min(200);
            self.idle_phase = rng.random_range(0.0..TAU);
            self.idle_clock = 0.0;
        }
        self.elapsed_since_last_pickup = 0.0;
        self.count
    }

    /// Shows the current count and restarts the pop, superseding any running pop or fade.
    pub fn trigger_display(&mut self) {
        self.display_number = self.count;
        self.pop_timer = Timer::from_seconds(STREAK_POP_DURATION, TimerMode::Once);
        self.fade_timer = None;
    }

    pub fn tick(&mut self, dt: f32) {
        let delta = Duration::from_secs_f32(dt);

        let faded = self
            .fade_timer
            .as_mut()
            .is_some_and(|fade| fade.tick(delta).is_finished());
        if faded {
            self.display_number = 0;
            self.pop_timer = finished_timer(STREAK_POP_DURATION);
            self.fade_timer = None;
        }

        self.pop_timer.tick(delta);
        if self.display_number != 0 && self.pop_timer.is_finished() {
            self.idle_clock += dt;
        }

        self.elapsed_since_last_pickup += dt;
        if self.elapsed_since_last_pickup > STREAK_TIMEOUT {
            self.count = 0;
            // The fade starts on the frame the timeout is crossed.
            if self.display_number != 0 && self.fade_timer.is_none() {
                self.fade_timer = Some(Timer::from_seconds(STREAK_FADE_DURATION, TimerMode::Once));
            }
        }
    }

    pub fn clear(&mut self) {
        *self = StreakTracker::default();
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    #[cfg(test)]
    pub fn elapsed_since_last_pickup(&self) -> f32 {
        self.elapsed_since_last_pickup
    }

    /// Burst size captured when the current streak started.
    pub fn burst_baseline(&self) -> u32 {
        self.burst_baseline
    }

    /// Whether movement runs at the boosted rate.
    pub fn boosted(&self) -> bool {
        self.count >= BOOST_MIN_STREAK && self.elapsed_since_last_pickup <= STREAK_TIMEOUT
    }

    /// Number on screen, or `None` when hidden.
    pub fn display_number(&self) -> Option<u32> {
        (self.display_number != 0).then_some(self.display_number)
    }

    #[cfg(test)]
    pub fn is_fading(&self) -> bool {
        self.fade_timer.is_some()
    }

    /// Scale multiplier of the streak number: a single sine peak during the pop.
    pub fn display_scale(&self) -> f32 {
        pop_scale(&self.pop_timer)
    }

    /// Floating offset applied once the pop has settled.
    pub fn idle_offset(&self) -> Vec2 {
        if !self.pop_timer.is_finished() {
            return Vec2::ZERO;
        }
        idle_bob(self.idle_clock, self.idle_phase)
    }

    pub fn display_alpha(&self) -> f32 {
        self.fade_timer
            .as_ref()
            .map_or(1.0, Timer::fraction_remaining)
    }
}

/// Sine-peak pop: 1 at rest, `STREAK_POP_PEAK` at the midpoint of the pop.
pub fn pop_scale(timer: &Timer) -> f32 {
    if timer.is_finished() {
        return 1.0;
    }
    1.0 + (STREAK_POP_PEAK - 1.0) * (timer.fraction() * PI).sin()
}

/// Sum of phase-shifted sines used for idle floating text.
pub fn idle_bob(clock: f32, phase: f32) -> Vec2 {
    Vec2::new(
        (clock * 2.1 + phase).sin() * 3.0,
        (clock * 1.7 + phase * 0.5).cos() * 2.0 + (clock * 3.3 + phase).sin(),
    )
}
