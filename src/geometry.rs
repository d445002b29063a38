use Direction::*;

/// A cell on the board. The playable interior is `[1, width] x [1, height]`,
/// row and column 0 and `dimension + 1` hold the walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Position::new(self.x + dx, self.y + dy)
    }

    pub fn step(self, direction: Direction) -> Self {
        self.offset(direction.delta())
    }

    /// True if the cell lies on or beyond the border of a `width` x `height` board.
    pub fn is_out_of_bounds(self, width: i32, height: i32) -> bool {
        self.x <= 0 || self.y <= 0 || self.x >= width + 1 || self.y >= height + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Whether `candidate` may replace the buffered direction. Repeating the
/// current or queued heading is a no-op, and reversing onto either would
/// fold the head back into the neck.
pub fn is_valid_turn(candidate: Direction, current: Direction, queued: Direction) -> bool {
    candidate != current
        && candidate != queued
        && !candidate.is_opposite(current)
        && !candidate.is_opposite(queued)
}
