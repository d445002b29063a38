use std::time::Duration;

use crate::config::Difficulty;
use crate::game::{GameOverCause, GameState, SnakeGame};
use crate::geometry::Position;
use crate::highscore::HighScoreStore;
use crate::item::{is_visible, ItemKind};
use crate::{Coords, TermInt};

const SNAKE_BODY_CHAR: char = '█';
const SNAKE_TAIL_CHAR: char = '▓';
const DEAD_SNAKE_CHAR: char = 'X';
const RECORD_BLINK_MS: u128 = 250;

/// Scoreboard plus three message lines under the board.
pub const STATUS_LINES: TermInt = 4;
/// Status text stays readable even on narrow boards
const MIN_CANVAS_WIDTH: TermInt = 46;

/// A full frame of characters, ready for the terminal to diff and print.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: TermInt,
    height: TermInt,
    cells: Vec<char>,
}

impl Canvas {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        Canvas { width, height, cells: vec![' '; width as usize * height as usize] }
    }

    pub fn size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn get(&self, pos: Coords) -> char {
        self.cells[self.index(pos)]
    }

    pub fn set(&mut self, pos: Coords, ch: char) {
        if pos.0 < self.width && pos.1 < self.height {
            let idx = self.index(pos);
            self.cells[idx] = ch;
        }
    }

    /// Writes `text` from the left edge of row `y`, clipped to the canvas width.
    pub fn write_line(&mut self, y: TermInt, text: &str) {
        for (x, ch) in text.chars().enumerate().take(self.width as usize) {
            self.set((x as TermInt, y), ch);
        }
    }

    pub fn line(&self, y: TermInt) -> String {
        (0..self.width).map(|x| self.get((x, y))).collect()
    }

    fn index(&self, pos: Coords) -> usize {
        self.width as usize * pos.1 as usize + pos.0 as usize
    }
}

/// Board size including walls, saturating at the largest terminal coordinate.
pub fn board_size(width: i32, height: i32) -> Coords {
    let side = |n: i32| TermInt::try_from(n.saturating_add(2)).unwrap_or(TermInt::MAX);
    (side(width), side(height))
}

/// Canvas size needed for a `width` x `height` board.
pub fn canvas_size(width: i32, height: i32) -> Coords {
    let (w, h) = board_size(width, height);
    (w.max(MIN_CANVAS_WIDTH), h.saturating_add(STATUS_LINES))
}

/// Blinks for `duration` after the record was set, then stays lit.
pub fn new_record_visible(now: Duration, set_at: Duration, duration: Duration) -> bool {
    let age = now.saturating_sub(set_at);
    age >= duration || (age.as_millis() / RECORD_BLINK_MS) % 2 == 0
}

pub fn compose<S: HighScoreStore>(game: &SnakeGame<S>) -> Canvas {
    let config = game.config();
    let (w, h) = canvas_size(config.width, config.height);
    let (board_w, board_h) = board_size(config.width, config.height);
    let mut canvas = Canvas::new(w, h);

    draw_borders(&mut canvas, board_w, board_h);

    if let Some(item) = game.item() {
        if game.state() != GameState::GameOver && is_visible(item, game.clock()) {
            canvas.set(to_coords(item.pos), item.kind.glyph());
        }
    }

    let snake = game.snake();
    let dead = game.state() == GameState::GameOver;
    for y in 1..=config.height {
        for x in 1..=config.width {
            let pos = Position::new(x, y);
            let ch = match snake.find_segment_index(pos) {
                None => continue,
                Some(_) if dead => DEAD_SNAKE_CHAR,
                Some(0) => snake.head_char(),
                Some(i) if i == snake.len() - 1 => SNAKE_TAIL_CHAR,
                Some(_) => SNAKE_BODY_CHAR,
            };
            canvas.set(to_coords(pos), ch);
        }
    }

    let status = board_h;
    canvas.write_line(
        status,
        &format!(
            "Score: {}  High: {}  Level: {}  Length: {}",
            game.score(),
            game.high_score(),
            game.level(),
            snake.len()
        ),
    );

    for (i, line) in messages(game).iter().enumerate() {
        canvas.write_line(status.saturating_add(1 + i as TermInt), line);
    }

    canvas
}

fn messages<S: HighScoreStore>(game: &SnakeGame<S>) -> Vec<String> {
    match game.state() {
        GameState::Start => vec![
            format!("Mode: [1] Normal  [2] Extreme  (now: {})", game.difficulty().label()),
            "Arrows/WASD or Enter to start".to_string(),
            "P pause, Q quit".to_string(),
        ],
        GameState::Running if game.is_paused() => {
            vec!["Paused".to_string(), "P to resume, Q to quit".to_string()]
        }
        GameState::Running if game.difficulty() == Difficulty::Extreme => vec![format!(
            "{} +10  {} +20  {} -10",
            ItemKind::Normal.glyph(),
            ItemKind::Rare.glyph(),
            ItemKind::Poison.glyph()
        )],
        GameState::Running => vec![],
        GameState::GameOver => {
            let banner = match game.cause() {
                Some(GameOverCause::BoardCleared) => "You filled the board!",
                Some(GameOverCause::SelfCollision) => "Game over! You bit yourself",
                _ => "Game over! You hit the wall",
            };
            let blink = game.config().new_record_blink;
            let record = match game.new_record_at() {
                Some(at) if new_record_visible(game.clock(), at, blink) => "NEW RECORD!",
                _ => "",
            };

            vec![banner.to_string(), record.to_string(), "R to restart, Q to quit".to_string()]
        }
    }
}

fn draw_borders(canvas: &mut Canvas, width: TermInt, height: TermInt) {
    let end_x = width - 1;
    let end_y = height - 1;

    for x in 0..width {
        let ch = if x == 0 || x == end_x { '+' } else { '-' };
        canvas.set((x, 0), ch);
        canvas.set((x, end_y), ch);
    }

    for y in 1..end_y {
        canvas.set((0, y), '|');
        canvas.set((end_x, y), '|');
    }
}

fn to_coords(pos: Position) -> Coords {
    (pos.x as TermInt, pos.y as TermInt)
}
