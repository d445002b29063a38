mod app;
mod config;
mod game;
mod geometry;
mod highscore;
mod input;
mod item;
mod render;
mod snake;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config, WriteLogger};

use config::{Cli, GameConfig};
use highscore::FileHighScoreStore;
use item::ItemSpawner;

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Error creating log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Error setting up logging")?;

    info!("Starting snake on a {}x{} board, seed {:?}", cli.width, cli.height, cli.seed);

    let config = GameConfig::new(cli.width, cli.height);
    let store = FileHighScoreStore::new(&cli.high_score_file);
    let spawner = ItemSpawner::new(cli.width, cli.height, cli.seed);
    let mut game = game::SnakeGame::new(config, store, spawner, cli.difficulty);

    // The game loop restores the terminal before returning
    app::run(&mut game)
}
