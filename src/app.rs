use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::{bail, Context, Result};
use log::{error, info};

use crate::game::SnakeGame;
use crate::highscore::HighScoreStore;
use crate::input::command_for;
use crate::render::{canvas_size, compose};
use crate::term::TermManager;

const FRAME_INTERVAL_MS: u64 = 16;

/// Drives a game against the real terminal until the player quits.
pub fn run<S: HighScoreStore>(game: &mut SnakeGame<S>) -> Result<()> {
    let mut term = TermManager::new().context("Error reading terminal size")?;

    let needed = canvas_size(game.config().width, game.config().height);
    let (w, h) = term.get_terminal_size();
    if w < needed.0 || h < needed.1 {
        bail!(
            "Terminal is {}x{}, the board needs at least {}x{}",
            w, h, needed.0, needed.1
        );
    }

    term.setup().context("Error setting up the terminal")?;
    let result = play(&mut term, game);
    let restored = term.restore();

    finish(result, restored)
}

/// Combines the loop outcome with the terminal restore outcome. When both
/// failed the loop error is kept as the cause.
fn finish<E>(result: Result<()>, restored: Result<(), E>) -> Result<()>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match (result, restored) {
        (result, Ok(())) => result,
        (Ok(()), Err(e)) => Err(e).context("Error restoring the terminal"),
        (Err(cause), Err(e)) => {
            error!("Error restoring the terminal after a failed game loop: {}", e);
            Err(cause.context(format!("Error restoring the terminal: {}", e)))
        }
    }
}

fn play<S: HighScoreStore>(term: &mut TermManager, game: &mut SnakeGame<S>) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        for key_ev in term.read_key_events_queue().context("Error reading input")? {
            game.handle(command_for(&key_ev));
        }

        if !game.is_running() {
            info!("Player quit");
            return Ok(());
        }

        let now = Instant::now();
        game.advance(now - last_frame);
        last_frame = now;

        term.draw(&compose(game)).context("Error drawing frame")?;
        sleep(Duration::from_millis(FRAME_INTERVAL_MS));
    }
}
