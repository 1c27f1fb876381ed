//! Pickup spawning on a free cell of the grid.

use rand::Rng;
use std::collections::HashSet;
use std::f32::consts::TAU;

use crate::game::{Grid, Position};
use crate::snake::Snake;

/// Pickup pulse period in seconds (render-only).
const PULSE_PERIOD: f32 = 0.8;

/// The collectible cell ("cherry").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub position: Position,
}

/// Picks a cell not covered by the snake, uniformly at random.
/// Returns `None` when the snake fills the whole grid.
pub fn spawn_pickup(grid: &Grid, snake: &Snake, rng: &mut impl Rng) -> Option<Pickup> {
    let occupied: HashSet<Position> = snake.segments().copied().collect();
    if occupied.len() >= grid.cell_count() {
        return None;
    }
    let free: Vec<Position> = grid.cells().filter(|c| !occupied.contains(c)).collect();

    if free.is_empty() {
        return None;
    }

    let position = free[rng.random_range(0..free.len())];
    Some(Pickup { position })
}

/// Draw scale of the pickup at `clock` seconds, a gentle sine pulse.
pub fn pulse_scale(clock: f32) -> f32 {
    let progress = (clock / PULSE_PERIOD).fract();
    1.0 + (progress * TAU).sin() * 0.15
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn pickup_never_lands_on_the_snake() {
        let grid = Grid::new(6, 4);
        let snake = Snake::new(grid.center(), &grid);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let pickup = spawn_pickup(&grid, &snake, &mut rng).expect("free cells remain");
            assert!(grid.contains(pickup.position));
            assert!(!snake.occupies(pickup.position));
        }
    }

    #[test]
    fn last_free_cell_is_chosen() {
        let grid = Grid::new(2, 2);
        let snake = Snake::from_segments(
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)],
            Direction::Left,
        );
        let mut rng = StdRng::seed_from_u64(1);
        let pickup = spawn_pickup(&grid, &snake, &mut rng);
        assert_eq!(pickup.map(|p| p.position), Some(Position::new(0, 1)));
    }

    #[test]
    fn full_board_has_no_pickup() {
        let grid = Grid::new(2, 1);
        let snake = Snake::from_segments(
            vec![Position::new(0, 0), Position::new(1, 0)],
            Direction::Left,
        );
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(spawn_pickup(&grid, &snake, &mut rng), None);
    }

    #[test]
    fn pulse_stays_within_fifteen_percent() {
        for i in 0..50 {
            let scale = pulse_scale(i as f32 * 0.037);
            assert!((0.85..=1.15).contains(&scale));
        }
    }
}
