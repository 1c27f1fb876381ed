//! UI plugin - camera setup, HUD counters, the streak number, and the death overlay.

use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;

use crate::game::{
    BACKGROUND_COLOR, DEATH_TEXT_COLOR, DEATH_TEXT_SCALE, Game, HUD_COLOR, HUD_TEXT_SCALE,
    SCORE_POSITION, STREAK_COLOR, STREAK_TEXT_SCALE,
};
use crate::rendering::{DrawList, font};

/// Vertical center of the streak number.
const STREAK_TEXT_Y: f32 = 64.0;
const PROMPT_COLOR: Color = Color::srgb(0.8, 0.8, 0.8);

/// Plugin for camera setup.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND_COLOR))
            .add_systems(Startup, setup_system);
    }
}

/// Initial setup system - camera with HDR and bloom so bursts glow.
fn setup_system(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Hdr,
        Bloom {
            intensity: 0.3,
            low_frequency_boost: 0.6,
            low_frequency_boost_curvature: 0.5,
            high_pass_frequency: 0.8,
            ..default()
        },
    ));
}

/// Score top-left, deaths top-right, and the streak number while it is shown.
pub fn compose_hud(game: &Game, list: &mut DrawList) {
    list.text(
        format!("SCORE {}", game.score()),
        SCORE_POSITION,
        HUD_TEXT_SCALE,
        HUD_COLOR,
    );

    let deaths = format!("DEATHS {}", game.deaths());
    let width = font::text_size(&deaths, HUD_TEXT_SCALE).x;
    let origin = Vec2::new(game.viewport().x - SCORE_POSITION.x - width, SCORE_POSITION.y);
    list.text(deaths, origin, HUD_TEXT_SCALE, HUD_COLOR);

    compose_streak(game, list);
}

fn compose_streak(game: &Game, list: &mut DrawList) {
    let streak = game.streak();
    let Some(number) = streak.display_number() else {
        return;
    };
    let center = Vec2::new(game.viewport().x / 2.0, STREAK_TEXT_Y) + streak.idle_offset();
    list.text_centered(
        format!("X{number}"),
        center,
        STREAK_TEXT_SCALE * streak.display_scale(),
        STREAK_COLOR.with_alpha(streak.display_alpha()),
    );
}

/// "YOU DIED" with its pop, bob and slide, then the final score and prompt.
pub fn compose_death_overlay(game: &Game, list: &mut DrawList) {
    let death = game.death();
    let center = game.viewport() / 2.0;
    let offset = death.text_offset();
    let alpha = death.text_alpha();

    list.text_centered(
        "YOU DIED",
        center + offset,
        DEATH_TEXT_SCALE * death.text_scale(),
        DEATH_TEXT_COLOR.with_alpha(alpha),
    );

    let below = Vec2::new(offset.x, DEATH_TEXT_SCALE * 5.0);
    list.text_centered(
        format!("SCORE {}", game.score()),
        center + below,
        HUD_TEXT_SCALE * 2.0,
        HUD_COLOR.with_alpha(alpha),
    );
    list.text_centered(
        "PRESS SPACE",
        center + below + Vec2::new(0.0, HUD_TEXT_SCALE * 12.0),
        HUD_TEXT_SCALE,
        PROMPT_COLOR.with_alpha(alpha),
    );
}
