//! Game constants for grid size, timing, effects tuning, and colors.

use bevy::prelude::*;

// Grid
pub const CELL_SIZE: f32 = 32.0;
pub const INITIAL_GRID_WIDTH: i32 = 20;
pub const INITIAL_GRID_HEIGHT: i32 = 15;
pub const INITIAL_VIEWPORT: Vec2 = Vec2::new(
    INITIAL_GRID_WIDTH as f32 * CELL_SIZE,
    INITIAL_GRID_HEIGHT as f32 * CELL_SIZE,
);
/// Viewport growth per pickup, in pixels on both axes.
pub const VIEWPORT_GROWTH: f32 = CELL_SIZE / 2.0;
/// Largest window the host will accept.
pub const MAX_VIEWPORT: Vec2 = Vec2::new(1600.0, 1000.0);
pub const INITIAL_SNAKE_LENGTH: usize = 3;

// Timing
pub const BASE_MOVE_INTERVAL: f32 = 0.12;
pub const BOOST_DIVISOR: f32 = 1.5;
pub const BOOST_MIN_STREAK: u32 = 3;

// Streak
pub const STREAK_TIMEOUT: f32 = 2.0;
pub const MAX_STREAK: u32 = 20;
pub const MAX_BURST_MULTIPLIER: u32 = 6;
pub const STREAK_POP_DURATION: f32 = 0.35;
pub const STREAK_FADE_DURATION: f32 = 0.5;
pub const STREAK_POP_PEAK: f32 = 2.2;

// Particles
pub const MAX_PARTICLES: usize = 8000;
pub const BACKGROUND_ENABLE_SCORE: u32 = 10;
pub const CHERRY_PARTICLE_DURATION: f32 = 2.2;
pub const HEAD_EMISSION_CAP: usize = 60;
pub const TRAIL_EMISSION_CAP: usize = 6;
pub const PARTICLE_DRAG: f32 = 0.98;
pub const PARTICLE_GRAVITY: Vec2 = Vec2::new(0.0, 50.0);
pub const PARTICLE_MIN_SIZE: f32 = 1.0;

// Screen shake
pub const SHAKE_DURATION: f32 = 0.45;
pub const SHAKE_MAX_AMPLITUDE: f32 = 18.0;

// Death sequence
pub const ZOOM_DURATION: f32 = 0.8;
pub const ZOOM_AMOUNT: f32 = 1.12;
pub const DEATH_POP_DURATION: f32 = 0.5;
pub const DISMISS_DURATION: f32 = 0.35;
pub const DISMISS_SLIDE: f32 = 600.0;

// Head face
pub const FACE_INTERVAL: f32 = 0.7;
pub const FACES: [&str; 7] = [":3", "^w^", "UwU", "0w0", "(w)", "n_n", "˃ w ˂"];

// HUD
pub const SCORE_POSITION: Vec2 = Vec2::new(8.0, 8.0);
pub const HUD_TEXT_SCALE: f32 = 2.0;
pub const STREAK_TEXT_SCALE: f32 = 4.0;
pub const DEATH_TEXT_SCALE: f32 = 8.0;

// Colors
pub const BACKGROUND_COLOR: Color = Color::srgb(20.0 / 255.0, 20.0 / 255.0, 25.0 / 255.0);
pub const SNAKE_FILL_COLOR: Color = Color::WHITE;
pub const SNAKE_OUTLINE_COLOR: Color = Color::srgb(1.0, 128.0 / 255.0, 200.0 / 255.0);
pub const PICKUP_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const HUD_COLOR: Color = Color::WHITE;
pub const FACE_COLOR: Color = Color::BLACK;
pub const EXPLOSION_COLOR: Color = Color::srgb(1.0, 0.85, 0.3);
pub const AMBIENT_COLOR: Color = Color::srgb(0.55, 0.45, 1.0);
pub const TRAIL_COLOR: Color = Color::srgb(0.3, 0.9, 1.0);
pub const STREAK_COLOR: Color = Color::srgb(1.0, 0.9, 0.3);
pub const DEATH_TEXT_COLOR: Color = Color::srgb(1.0, 0.3, 0.3);
pub const DEATH_OVERLAY_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.55);
