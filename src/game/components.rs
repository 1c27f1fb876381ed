//! Grid-level value types shared by the snake, pickup, and effects.

use bevy::prelude::*;

use super::CELL_SIZE;

/// Grid position of a snake segment or pickup.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Check if this position collides with another position.
    pub fn collides_with(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Pixel-space center of the cell, y pointing down.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.x as f32 + 0.5) * CELL_SIZE,
            (self.y as f32 + 0.5) * CELL_SIZE,
        )
    }
}

/// Direction of travel. Up is towards row 0.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit step in grid coordinates.
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
        }
    }
}

/// Playfield dimensions in cells. Coordinates wrap on both axes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must have at least one cell");
        Grid { width, height }
    }

    /// Grid that fits inside a viewport of the given pixel size.
    pub fn from_viewport(size: Vec2) -> Self {
        Grid::new(
            (size.x / CELL_SIZE).floor() as i32,
            (size.y / CELL_SIZE).floor() as i32,
        )
    }

    /// Moves `from` by `delta`, wrapping each axis independently.
    pub fn offset(&self, from: Position, delta: IVec2) -> Position {
        Position {
            x: (from.x + delta.x).rem_euclid(self.width),
            y: (from.y + delta.y).rem_euclid(self.height),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_every_edge() {
        let grid = Grid::new(20, 15);
        assert_eq!(
            grid.offset(Position::new(19, 4), Direction::Right.delta()),
            Position::new(0, 4)
        );
        assert_eq!(
            grid.offset(Position::new(0, 4), Direction::Left.delta()),
            Position::new(19, 4)
        );
        assert_eq!(
            grid.offset(Position::new(7, 0), Direction::Up.delta()),
            Position::new(7, 14)
        );
        assert_eq!(
            grid.offset(Position::new(7, 14), Direction::Down.delta()),
            Position::new(7, 0)
        );
    }

    #[test]
    fn grid_from_viewport_floors_partial_cells() {
        let grid = Grid::from_viewport(Vec2::new(656.0, 496.0));
        assert_eq!(grid, Grid::new(20, 15));
        let grid = Grid::from_viewport(Vec2::new(672.0, 512.0));
        assert_eq!(grid, Grid::new(21, 16));
    }

    #[test]
    fn cells_cover_the_grid_once() {
        let grid = Grid::new(4, 3);
        let cells: Vec<Position> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert!(cells.iter().all(|c| grid.contains(*c)));
    }

    #[test]
    fn opposite_directions_pair_up() {
        for dir in [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ] {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
    }
}
