//! Rendering plugin - composes each frame as draw directives, fulfils the
//! death snapshot, and paints directives and camera shake.

mod draw;
pub mod font;

pub use draw::{DrawCommand, DrawList, FrameSnapshot};

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::food::pulse_scale;
use crate::game::{
    BACKGROUND_COLOR, CELL_SIZE, DEATH_OVERLAY_COLOR, FACE_COLOR, Game, GameSet, PICKUP_COLOR,
    SNAKE_FILL_COLOR, SNAKE_OUTLINE_COLOR,
};
use crate::particles::PoolKind;
use crate::ui::{compose_death_overlay, compose_hud};

/// Depth between consecutive directives.
const Z_STEP: f32 = 0.01;
const OUTLINE_WIDTH: f32 = 2.0;
const FACE_TEXT_SCALE: f32 = 2.0;

/// Plugin for frame composition and painting.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (paint_frame, camera_shake_system).in_set(GameSet::Present),
        );
    }
}

/// Builds this frame's directives. When the death sequence is waiting for a
/// snapshot, the live frame is captured first and handed over, so the same
/// call already shows the death screen.
pub fn compose_frame(game: &mut Game, list: &mut DrawList) {
    list.clear();

    if game.death().snapshot_requested() {
        compose_live(game, list);
        let snapshot = FrameSnapshot::capture(list, game.viewport());
        game.fulfil_snapshot(snapshot);
        list.clear();
    }

    if game.death().is_alive() {
        compose_live(game, list);
    } else {
        compose_death_screen(game, list);
    }
}

fn compose_live(game: &Game, list: &mut DrawList) {
    compose_scene(game, list);
    compose_hud(game, list);
}

/// Background, particles, pickup, then the snake from tail to head.
fn compose_scene(game: &Game, list: &mut DrawList) {
    list.rect(Vec2::ZERO, game.viewport(), BACKGROUND_COLOR);

    for kind in [PoolKind::Background, PoolKind::Foreground] {
        for particle in game.particles().pool(kind).iter() {
            let (alpha, size) = particle.appearance(kind);
            let color = particle.color.with_alpha(particle.color.alpha() * alpha);
            list.square_centered(particle.position, size, color);
        }
    }

    let pickup = game.pickup().position.center();
    list.square_centered(pickup, CELL_SIZE * pulse_scale(game.clock()), PICKUP_COLOR);

    let segments: Vec<_> = game.snake().segments().copied().collect();
    for segment in segments.iter().rev() {
        let center = segment.center();
        list.square_centered(center, CELL_SIZE + OUTLINE_WIDTH * 2.0, SNAKE_OUTLINE_COLOR);
        list.square_centered(center, CELL_SIZE, SNAKE_FILL_COLOR);
    }

    list.text_centered(
        game.face(),
        game.snake().head().center(),
        FACE_TEXT_SCALE,
        FACE_COLOR,
    );
}

/// Zooming backdrop, dimming layer, and the overlay text.
fn compose_death_screen(game: &Game, list: &mut DrawList) {
    let viewport = game.viewport();
    if let Some(snapshot) = game.death().snapshot() {
        list.snapshot(snapshot, snapshot.size() / 2.0, game.death().backdrop_scale());
    }
    list.rect(Vec2::ZERO, viewport, DEATH_OVERLAY_COLOR);
    compose_death_overlay(game, list);
}

/// System to compose the frame and paint it with immediate-mode shapes.
fn paint_frame(mut game: ResMut<Game>, mut list: Local<DrawList>, mut painter: ShapePainter) {
    compose_frame(&mut game, &mut list);

    painter.reset();
    let half = game.viewport() / 2.0;
    for (index, command) in list.iter().enumerate() {
        let z = index as f32 * Z_STEP;
        match command {
            DrawCommand::Rect { min, size, color } => {
                paint_rect(&mut painter, *min, *size, *color, half, z);
            }
            DrawCommand::Text {
                text,
                origin,
                scale,
                color,
            } => {
                for (min, size) in font::glyph_rects(text, *origin, *scale) {
                    paint_rect(&mut painter, min, size, *color, half, z);
                }
            }
        }
    }
}

/// Converts a top-left, y-down pixel rect to the camera's centered, y-up space.
fn paint_rect(painter: &mut ShapePainter, min: Vec2, size: Vec2, color: Color, half: Vec2, z: f32) {
    let center = min + size / 2.0;
    painter.set_translation(Vec3::new(center.x - half.x, half.y - center.y, z));
    painter.color = color;
    painter.rect(size);
}

/// System to apply the shake offset to the camera.
fn camera_shake_system(game: Res<Game>, mut camera_query: Query<&mut Transform, With<Camera2d>>) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    let offset = if game.death().is_alive() && game.shake().is_active() {
        game.shake().offset()
    } else {
        Vec2::ZERO
    };
    // Moving the camera against the offset moves the scene with it.
    camera_transform.translation.x = -offset.x;
    camera_transform.translation.y = offset.y;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::death::DeathPhase;
    use crate::game::{BASE_MOVE_INTERVAL, Direction, InputIntents, Position, UnboundedViewport};
    use crate::snake::Snake;

    fn texts(list: &DrawList) -> Vec<String> {
        list.iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                DrawCommand::Rect { .. } => None,
            })
            .collect()
    }

    /// Puts the head in front of its own body and takes one step.
    fn kill(game: &mut Game) {
        game.set_snake(Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 6),
                Position::new(5, 6),
            ],
            Direction::Down,
        ));
        game.set_pickup(Position::new(0, 0));
        game.advance(&InputIntents::default(), BASE_MOVE_INTERVAL, &mut UnboundedViewport);
        assert!(!game.death().is_alive());
    }

    #[test]
    fn live_frame_starts_with_background_and_ends_with_hud() {
        let mut game = Game::new(1);
        let mut list = DrawList::default();
        compose_frame(&mut game, &mut list);

        let Some(DrawCommand::Rect { min, size, color }) = list.iter().next() else {
            panic!("background first");
        };
        assert_eq!(*min, Vec2::ZERO);
        assert_eq!(*size, game.viewport());
        assert_eq!(*color, BACKGROUND_COLOR);

        let texts = texts(&list);
        assert!(texts.contains(&"SCORE 0".to_string()));
        assert!(texts.contains(&"DEATHS 0".to_string()));
        assert!(texts.contains(&game.face().to_string()));
    }

    #[test]
    fn snake_draws_outline_then_fill_per_segment() {
        let mut game = Game::new(1);
        let mut list = DrawList::default();
        compose_frame(&mut game, &mut list);

        let fills = list
            .iter()
            .filter(|command| {
                matches!(command, DrawCommand::Rect { color, .. } if *color == SNAKE_FILL_COLOR)
            })
            .count();
        let outlines = list
            .iter()
            .filter(|command| {
                matches!(command, DrawCommand::Rect { color, .. } if *color == SNAKE_OUTLINE_COLOR)
            })
            .count();
        assert_eq!(fills, game.snake().len());
        assert_eq!(outlines, game.snake().len());
    }

    #[test]
    fn snapshot_is_taken_exactly_once() {
        let mut game = Game::new(9);
        kill(&mut game);
        assert_eq!(game.death().phase(), DeathPhase::AwaitingSnapshot);

        let mut list = DrawList::default();
        compose_frame(&mut game, &mut list);
        assert_eq!(game.death().phase(), DeathPhase::Displayed);
        let captured = game.death().snapshot().map(FrameSnapshot::len);
        assert!(captured.is_some_and(|len| len > 0));

        compose_frame(&mut game, &mut list);
        assert_eq!(game.death().snapshot().map(FrameSnapshot::len), captured);
        assert!(texts(&list).contains(&"YOU DIED".to_string()));
    }

    #[test]
    fn backdrop_zooms_about_the_viewport_center() {
        let mut game = Game::new(9);
        kill(&mut game);
        let mut list = DrawList::default();
        compose_frame(&mut game, &mut list);
        game.advance(&InputIntents::default(), 10.0, &mut UnboundedViewport);
        compose_frame(&mut game, &mut list);

        let Some(DrawCommand::Rect { min, size, .. }) = list.iter().next() else {
            panic!("backdrop starts with the captured background");
        };
        let factor = game.death().backdrop_scale();
        assert!(factor > 1.0);
        assert!((*size - game.viewport() * factor).length() < 1e-3);
        assert!((*min + *size / 2.0 - game.viewport() / 2.0).length() < 1e-3);
    }
}
