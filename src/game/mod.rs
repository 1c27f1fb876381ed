//! Core game module: shared types, constants, events, frame resources, and the
//! simulation state driven once per frame.

mod components;
mod constants;
mod events;
mod resources;
mod sim;
mod viewport;

pub use components::*;
pub use constants::*;
pub use events::*;
pub use resources::*;
pub use sim::*;
pub use viewport::*;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Frame phases: simulate first, then compose and paint what was simulated.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Simulate,
    Present,
}

/// Plugin owning the simulation resource and its per-frame advance.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GameEvent>()
            .configure_sets(Update, (GameSet::Simulate, GameSet::Present).chain())
            .add_systems(Startup, init_game)
            .add_systems(
                Update,
                (advance_game, log_game_events)
                    .chain()
                    .in_set(GameSet::Simulate),
            );
    }
}

/// System to create the simulation, seeded from `SNAKE_SEED` when set.
fn init_game(mut commands: Commands) {
    let seed = match std::env::var("SNAKE_SEED") {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring SNAKE_SEED={raw:?}: not an unsigned integer");
            rand::random()
        }),
        Err(_) => rand::random(),
    };
    info!(seed, "starting game");
    commands.insert_resource(Game::new(seed));
}

/// System to step the simulation by the frame delta.
fn advance_game(
    time: Res<Time>,
    intents: Res<InputIntents>,
    mut game: ResMut<Game>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut events: MessageWriter<GameEvent>,
) {
    let dt = time.delta_secs();
    match windows.single_mut() {
        Ok(mut window) => {
            let mut viewport = WindowViewport {
                window: &mut *window,
                max: MAX_VIEWPORT,
            };
            game.advance(&intents, dt, &mut viewport);
        }
        Err(_) => {
            let mut viewport = ClampedViewport { max: MAX_VIEWPORT };
            game.advance(&intents, dt, &mut viewport);
        }
    }

    for event in game.take_events() {
        events.write(event);
    }
}

/// System to report game events in the log.
fn log_game_events(mut reader: MessageReader<GameEvent>) {
    for event in reader.read() {
        match event {
            GameEvent::PickupConsumed {
                position,
                score,
                streak,
            } => debug!(score, streak, "pickup eaten at ({}, {})", position.x, position.y),
            GameEvent::SnakeDied {
                position,
                score,
                deaths,
            } => info!(score, deaths, "snake died at ({}, {})", position.x, position.y),
            GameEvent::BoardFull { score } => info!(score, "board full, starting over"),
            GameEvent::Reset => info!("playfield reset"),
        }
    }
}
