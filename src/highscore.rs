use std::{fs, path::PathBuf};

use log::{info, warn};

/// Best-effort persistence for the best score. Failures never reach the game.
pub trait HighScoreStore {
    fn load(&mut self) -> u32;
    fn save(&mut self, score: u32);
}

pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHighScoreStore { path: path.into() }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring malformed high score file {}", self.path.display());
                0
            }),
            Err(e) => {
                info!("No high score loaded from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        if let Err(e) = fs::write(&self.path, score.to_string()) {
            warn!("Error saving high score to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryHighScoreStore {
    pub value: u32,
    pub saves: u32,
}

#[cfg(test)]
impl HighScoreStore for MemoryHighScoreStore {
    fn load(&mut self) -> u32 {
        self.value
    }

    fn save(&mut self, score: u32) {
        self.value = score;
        self.saves += 1;
    }
}
