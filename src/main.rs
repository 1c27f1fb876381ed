mod death;
mod food;
mod game;
mod particles;
mod rendering;
mod snake;
mod streak;
mod ui;

use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;

use game::{GamePlugin, INITIAL_VIEWPORT};
use rendering::RenderingPlugin;
use snake::SnakePlugin;
use ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(
                        INITIAL_VIEWPORT.x as u32,
                        INITIAL_VIEWPORT.y as u32,
                    ),
                    title: "Cherry Snake".to_string(),
                    resizable: false,
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .add_plugins((GamePlugin, SnakePlugin, RenderingPlugin, UiPlugin))
        .run();
}
