use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Difficulty;
use crate::geometry::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    SelectDifficulty(Difficulty),
    Confirm,
    Restart,
    Pause,
    Quit,
    None,
}

pub fn command_for(ev: &KeyEvent) -> Command {
    if is_ctrl_c(ev) {
        return Command::Quit;
    }

    match ev.code {
        KeyCode::Up => Command::Turn(Direction::Up),
        KeyCode::Down => Command::Turn(Direction::Down),
        KeyCode::Left => Command::Turn(Direction::Left),
        KeyCode::Right => Command::Turn(Direction::Right),
        KeyCode::Enter => Command::Confirm,
        KeyCode::Esc => Command::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Command::Turn(Direction::Up),
            'a' => Command::Turn(Direction::Left),
            's' => Command::Turn(Direction::Down),
            'd' => Command::Turn(Direction::Right),
            '1' => Command::SelectDifficulty(Difficulty::Normal),
            '2' => Command::SelectDifficulty(Difficulty::Extreme),
            ' ' => Command::Confirm,
            'r' => Command::Restart,
            'p' => Command::Pause,
            'q' => Command::Quit,
            _ => Command::None,
        },
        _ => Command::None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
