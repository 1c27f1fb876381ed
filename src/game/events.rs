//! Game events (messages).

use bevy::prelude::*;

use super::Position;

/// Notable transitions raised by the simulation during one `advance`.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A pickup was eaten.
    PickupConsumed {
        position: Position,
        score: u32,
        streak: u32,
    },
    /// The snake ran into its own body at `position`.
    SnakeDied {
        position: Position,
        score: u32,
        deaths: u32,
    },
    /// No free cell was left for the next pickup.
    BoardFull { score: u32 },
    /// The playfield was restored to its starting state.
    Reset,
}
