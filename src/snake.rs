use crate::geometry::{is_valid_turn, Direction, Position};
use Direction::*;

/// Self-intersection can't happen below this length, so a fresh snake never
/// reports a collision on its first moves.
const MIN_COLLIDING_LENGTH: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    // Head first
    body: Vec<Position>,
    direction: Direction,
    next_direction: Direction,
}

impl Snake {
    pub fn new(start: Position, direction: Direction, length: usize) -> Self {
        let mut snake = Snake { body: vec![], direction, next_direction: direction };
        snake.reset(start, direction, length);
        snake
    }

    pub fn reset(&mut self, start: Position, direction: Direction, length: usize) {
        let back = direction.opposite().delta();

        self.body = (0..length as i32)
            .map(|i| start.offset((back.0 * i, back.1 * i)))
            .collect();
        self.direction = direction;
        self.next_direction = direction;
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn queue_direction(&mut self, direction: Direction) {
        if is_valid_turn(direction, self.direction, self.next_direction) {
            self.next_direction = direction;
        }
    }

    pub fn peek_next_head(&self) -> Position {
        self.head().step(self.next_direction)
    }

    /// Commits the buffered direction and advances one cell. Returns the new head.
    pub fn move_step(&mut self, grow: bool) -> Position {
        self.direction = self.next_direction;
        let new_head = self.head().step(self.direction);

        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }

        new_head
    }

    pub fn has_self_collision(&self) -> bool {
        self.body.len() >= MIN_COLLIDING_LENGTH && self.body[1..].contains(&self.head())
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn find_segment_index(&self, pos: Position) -> Option<usize> {
        self.body.iter().position(|&p| p == pos)
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
