//! Death sequence - snapshot, zoom and pop, dismiss, then hand back for reset.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;
use std::time::Duration;

use crate::game::{
    DEATH_POP_DURATION, DISMISS_DURATION, DISMISS_SLIDE, ZOOM_AMOUNT, ZOOM_DURATION,
    finished_timer,
};
use crate::rendering::FrameSnapshot;
use crate::streak::{idle_bob, pop_scale};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeathPhase {
    #[default]
    Alive,
    /// Waiting for the render pass to capture the final frame.
    AwaitingSnapshot,
    Displayed,
    Dismissing,
}

/// Gates gameplay while the player is dead and owns the captured backdrop.
#[derive(Debug, Clone)]
pub struct DeathSequence {
    phase: DeathPhase,
    zoom_timer: Timer,
    pop_timer: Timer,
    idle_clock: f32,
    idle_phase: f32,
    dismiss_timer: Timer,
    snapshot: Option<FrameSnapshot>,
}

impl Default for DeathSequence {
    fn default() -> Self {
        DeathSequence {
            phase: DeathPhase::Alive,
            zoom_timer: Timer::from_seconds(ZOOM_DURATION, TimerMode::Once),
            pop_timer: finished_timer(DEATH_POP_DURATION),
            idle_clock: 0.0,
            idle_phase: 0.0,
            dismiss_timer: Timer::from_seconds(DISMISS_DURATION, TimerMode::Once),
            snapshot: None,
        }
    }
}

impl DeathSequence {
    #[cfg(test)]
    pub fn phase(&self) -> DeathPhase {
        self.phase
    }

    pub fn is_alive(&self) -> bool {
        self.phase == DeathPhase::Alive
    }

    /// Enters the sequence and asks the next render pass for a snapshot.
    pub fn trigger(&mut self, rng: &mut impl Rng) {
        debug_assert!(self.is_alive(), "death triggered twice");
        *self = DeathSequence {
            phase: DeathPhase::AwaitingSnapshot,
            pop_timer: Timer::from_seconds(DEATH_POP_DURATION, TimerMode::Once),
            idle_phase: rng.random_range(0.0..TAU),
            ..DeathSequence::default()
        };
    }

    pub fn snapshot_requested(&self) -> bool {
        self.phase == DeathPhase::AwaitingSnapshot
    }

    /// Stores the captured frame and moves on to display it.
    pub fn fulfil_snapshot(&mut self, snapshot: FrameSnapshot) {
        if self.phase != DeathPhase::AwaitingSnapshot {
            return;
        }
        self.snapshot = Some(snapshot);
        self.phase = DeathPhase::Displayed;
    }

    pub fn snapshot(&self) -> Option<&FrameSnapshot> {
        self.snapshot.as_ref()
    }

    /// Starts the dismiss transition. Only accepted while displayed.
    pub fn dismiss(&mut self) -> bool {
        if self.phase != DeathPhase::Displayed {
            return false;
        }
        self.phase = DeathPhase::Dismissing;
        self.dismiss_timer = Timer::from_seconds(DISMISS_DURATION, TimerMode::Once);
        true
    }

    /// Advances the death timers. Returns true when dismissal has finished and
    /// the game should reset.
    pub fn tick(&mut self, dt: f32) -> bool {
        let delta = Duration::from_secs_f32(dt);
        match self.phase {
            DeathPhase::Alive | DeathPhase::AwaitingSnapshot => false,
            DeathPhase::Displayed => {
                self.advance_display(delta);
                false
            }
            DeathPhase::Dismissing => {
                self.advance_display(delta);
                self.dismiss_timer.tick(delta).is_finished()
            }
        }
    }

    fn advance_display(&mut self, delta: Duration) {
        self.zoom_timer.tick(delta);
        self.pop_timer.tick(delta);
        if self.pop_timer.is_finished() {
            self.idle_clock += delta.as_secs_f32();
        }
    }

    /// Drops the backdrop and returns to the alive state.
    pub fn release(&mut self) {
        *self = DeathSequence::default();
    }

    /// Scale of the backdrop: linear zoom from 1 to `ZOOM_AMOUNT`.
    pub fn backdrop_scale(&self) -> f32 {
        1.0 + (ZOOM_AMOUNT - 1.0) * self.zoom_timer.fraction()
    }

    pub fn text_scale(&self) -> f32 {
        pop_scale(&self.pop_timer)
    }

    /// Dismiss progress from 0 to 1.
    pub fn dismiss_progress(&self) -> f32 {
        if self.phase != DeathPhase::Dismissing {
            return 0.0;
        }
        self.dismiss_timer.fraction()
    }

    /// Bobbing plus the horizontal dismiss slide.
    pub fn text_offset(&self) -> Vec2 {
        let bob = if self.pop_timer.is_finished() {
            idle_bob(self.idle_clock, self.idle_phase)
        } else {
            Vec2::ZERO
        };
        bob + Vec2::new(self.dismiss_progress() * DISMISS_SLIDE, 0.0)
    }

    pub fn text_alpha(&self) -> f32 {
        1.0 - self.dismiss_progress()
    }
}
