use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Smallest board that still fits the starting snake with room to turn.
pub const MIN_BOARD_SIDE: i32 = 8;
/// Largest board side; walls and status lines must still fit in terminal coordinates.
pub const MAX_BOARD_SIDE: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    /// Only regular food, steady pace
    Normal,
    /// Rare and poison items, faster base speed
    Extreme,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Normal => "Normal",
            Difficulty::Extreme => "Extreme",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "snake")]
#[command(version, about = "Snake in your terminal")]
pub struct Cli {
    /// Interior width of the board
    #[arg(long, default_value_t = 30, value_parser = parse_side)]
    pub width: i32,

    /// Interior height of the board
    #[arg(long, default_value_t = 18, value_parser = parse_side)]
    pub height: i32,

    /// Mode pre-selected on the start screen
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    pub difficulty: Difficulty,

    /// Where the best score is kept between runs
    #[arg(long, default_value = ".snake_high_score")]
    pub high_score_file: PathBuf,

    /// Log output (the terminal itself is taken by the game)
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    /// Most verbose level written to the log file
    #[arg(long, default_value_t = LevelFilter::Debug, value_parser = parse_level)]
    pub log_level: LevelFilter,

    /// Seed for item placement, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

fn parse_side(s: &str) -> Result<i32, String> {
    let side: i32 = s.parse().map_err(|e| format!("{}", e))?;
    if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&side) {
        return Err(format!("must be between {} and {}", MIN_BOARD_SIDE, MAX_BOARD_SIDE));
    }
    Ok(side)
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level '{}'", s))
}

/// Tuning for a game session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub initial_length: usize,
    pub base_interval: Duration,
    pub min_interval: Duration,
    /// Taken off the interval for every level above the first
    pub level_step: Duration,
    pub foods_per_level: u32,
    pub new_record_blink: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 30,
            height: 18,
            initial_length: 4,
            base_interval: Duration::from_millis(150),
            min_interval: Duration::from_millis(50),
            level_step: Duration::from_millis(10),
            foods_per_level: 5,
            new_record_blink: Duration::from_secs(3),
        }
    }
}

impl GameConfig {
    pub fn new(width: i32, height: i32) -> Self {
        GameConfig { width, height, ..Default::default() }
    }

    pub fn multiplier(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Normal => 1.0,
            Difficulty::Extreme => 0.6,
        }
    }

    pub fn level_for(&self, foods_consumed: u32) -> u32 {
        1 + foods_consumed / self.foods_per_level
    }

    pub fn movement_interval(&self, level: u32, difficulty: Difficulty) -> Duration {
        let scaled = self.base_interval.mul_f64(self.multiplier(difficulty));
        let ramp = self.level_step * level.saturating_sub(1);

        scaled.checked_sub(ramp).unwrap_or_default().max(self.min_interval)
    }
}
