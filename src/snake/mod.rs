//! Snake plugin - handles snake movement, input, and self-collision.

use bevy::prelude::*;
use std::collections::VecDeque;

use crate::game::{Direction, Grid, INITIAL_SNAKE_LENGTH, InputIntents, Position};

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputIntents>()
            .add_systems(PreUpdate, (read_input_intents, quit_on_escape));
    }
}

/// Result of one discrete snake step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The head advanced to this cell.
    Moved(Position),
    /// The next cell is occupied by the body; nothing was mutated.
    Collided(Position),
}

/// Ordered body (head first), direction, and growth flag.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    heading: Direction,
    pending_growth: bool,
}

impl Snake {
    /// A snake of the default length with its head at `head`, trailing to the left.
    pub fn new(head: Position, grid: &Grid) -> Self {
        let body = (0..INITIAL_SNAKE_LENGTH as i32)
            .map(|i| grid.offset(head, IVec2::new(-i, 0)))
            .collect();
        Snake {
            body,
            direction: Direction::Right,
            heading: Direction::Right,
            pending_growth: false,
        }
    }

    /// Builds a snake from explicit segments, head first.
    #[cfg(test)]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs at least one segment");
        Snake {
            body: segments.into(),
            direction,
            heading: direction,
            pending_growth: false,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.iter().any(|segment| segment.collides_with(&pos))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn pending_growth(&self) -> bool {
        self.pending_growth
    }

    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Turns towards `direction` unless that would reverse the last completed step.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == self.heading.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Applies the pressed directional intents in Up, Down, Left, Right order.
    pub fn steer_from_input(&mut self, input: &InputIntents) {
        let pressed = [
            (input.up, Direction::Up),
            (input.down, Direction::Down),
            (input.left, Direction::Left),
            (input.right, Direction::Right),
        ];
        for (_, direction) in pressed.into_iter().filter(|(down, _)| *down) {
            self.steer(direction);
        }
    }

    /// Unit vector the tail moved along on its last step, in grid space.
    pub fn tail_direction(&self) -> IVec2 {
        if self.body.len() < 2 {
            return self.heading.delta();
        }
        let tail = self.tail();
        let ahead = self.body[self.body.len() - 2];
        let mut delta = IVec2::new(ahead.x - tail.x, ahead.y - tail.y);
        // Undo wrap-around so the delta stays a unit step.
        if delta.x.abs() > 1 {
            delta.x = -delta.x.signum();
        }
        if delta.y.abs() > 1 {
            delta.y = -delta.y.signum();
        }
        delta
    }

    /// Advances one cell. Every current segment, including the tail that would
    /// vacate this step, counts as occupied.
    pub fn step(&mut self, grid: &Grid) -> StepOutcome {
        let new_head = grid.offset(self.head(), self.direction.delta());
        debug_assert!(grid.contains(new_head), "wrapped head left the grid");

        if self.occupies(new_head) {
            return StepOutcome::Collided(new_head);
        }

        self.body.push_front(new_head);
        if self.pending_growth {
            self.pending_growth = false;
        } else {
            self.body.pop_back();
        }
        self.heading = self.direction;

        debug_assert!(!self.body.is_empty(), "snake length must stay positive");
        StepOutcome::Moved(new_head)
    }
}

/// System to poll keyboard and gamepad state into the frame's intents.
fn read_input_intents(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut intents: ResMut<InputIntents>,
) {
    let keys = |codes: &[KeyCode]| keyboard_input.any_pressed(codes.iter().copied());
    let pad = |button: GamepadButton| gamepads.iter().any(|gamepad| gamepad.pressed(button));

    *intents = InputIntents {
        up: keys(&[KeyCode::ArrowUp, KeyCode::KeyW]) || pad(GamepadButton::DPadUp),
        down: keys(&[KeyCode::ArrowDown, KeyCode::KeyS]) || pad(GamepadButton::DPadDown),
        left: keys(&[KeyCode::ArrowLeft, KeyCode::KeyA]) || pad(GamepadButton::DPadLeft),
        right: keys(&[KeyCode::ArrowRight, KeyCode::KeyD]) || pad(GamepadButton::DPadRight),
        dismiss: keys(&[KeyCode::Space, KeyCode::Enter]) || pad(GamepadButton::South),
    };
}

/// System to close the app on Escape or the gamepad's Select (Back) button.
fn quit_on_escape(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut exit: MessageWriter<AppExit>,
) {
    let back = gamepads.iter().any(|gamepad| gamepad.just_pressed(GamepadButton::Select));
    if keyboard_input.just_pressed(KeyCode::Escape) || back {
        info!("quit requested");
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(20, 15)
    }

    #[test]
    fn new_snake_has_default_length_facing_right() {
        let grid = grid();
        let snake = Snake::new(grid.center(), &grid);
        assert_eq!(snake.len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(snake.head(), Position::new(10, 7));
        assert_eq!(snake.tail(), Position::new(8, 7));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn head_wraps_across_right_edge() {
        let grid = grid();
        let mut snake = Snake::from_segments(
            vec![Position::new(19, 3), Position::new(18, 3)],
            Direction::Right,
        );
        assert_eq!(snake.step(&grid), StepOutcome::Moved(Position::new(0, 3)));
    }

    #[test]
    fn head_wraps_across_top_edge() {
        let grid = grid();
        let mut snake = Snake::from_segments(
            vec![Position::new(4, 0), Position::new(4, 1)],
            Direction::Up,
        );
        assert_eq!(snake.step(&grid), StepOutcome::Moved(Position::new(4, 14)));
    }

    #[test]
    fn reversal_is_rejected() {
        let grid = grid();
        let mut snake = Snake::new(grid.center(), &grid);
        assert!(!snake.steer(Direction::Left));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn two_perpendicular_presses_cannot_reverse_before_a_step() {
        let grid = grid();
        let mut snake = Snake::new(grid.center(), &grid);
        assert!(snake.steer(Direction::Up));
        assert!(!snake.steer(Direction::Left));
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn later_intent_wins_when_several_are_held() {
        let grid = grid();
        let mut snake = Snake::new(grid.center(), &grid);
        snake.steer_from_input(&InputIntents {
            up: true,
            down: true,
            ..default()
        });
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn growth_adds_exactly_one_segment() {
        let grid = grid();
        let mut snake = Snake::new(grid.center(), &grid);
        snake.grow();
        snake.step(&grid);
        assert_eq!(snake.len(), 4);
        assert!(!snake.pending_growth());
        snake.step(&grid);
        snake.step(&grid);
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn collision_leaves_body_untouched() {
        let grid = grid();
        // Head at (5,5) moving down into (5,6), which is part of the body.
        let segments = vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ];
        let mut snake = Snake::from_segments(segments.clone(), Direction::Down);
        assert_eq!(snake.step(&grid), StepOutcome::Collided(Position::new(5, 6)));
        assert_eq!(snake.segments().copied().collect::<Vec<_>>(), segments);
    }

    #[test]
    fn moving_into_vacating_tail_cell_is_fatal() {
        let grid = grid();
        // A 2x2 loop: the head's next cell is the current tail.
        let segments = vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
        ];
        let mut snake = Snake::from_segments(segments, Direction::Down);
        assert_eq!(snake.tail(), Position::new(5, 6));
        assert_eq!(snake.step(&grid), StepOutcome::Collided(Position::new(5, 6)));
        assert_eq!(snake.len(), 4);
    }

    fn quit_app() -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, quit_on_escape);
        app
    }

    #[test]
    fn escape_requests_a_clean_exit() {
        let mut app = quit_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        assert_eq!(app.should_exit(), Some(AppExit::Success));
    }

    #[test]
    fn other_keys_keep_running() {
        let mut app = quit_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        app.update();
        assert_eq!(app.should_exit(), None);
    }

    #[test]
    fn tail_direction_follows_the_body_across_wrap() {
        let snake = Snake::from_segments(
            vec![Position::new(1, 2), Position::new(0, 2), Position::new(19, 2)],
            Direction::Right,
        );
        assert_eq!(snake.tail_direction(), IVec2::new(1, 0));
    }
}
