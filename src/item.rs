use std::time::Duration;

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::config::Difficulty;
use crate::geometry::Position;
use crate::snake::Snake;

const FLASH_GRACE: Duration = Duration::from_millis(1000);
const FLASH_PERIOD_MS: u128 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Normal,
    Rare,
    Poison,
}

impl ItemKind {
    /// Maps a uniform roll in `0..100` onto the Extreme mode odds (70/20/10).
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..=69 => ItemKind::Normal,
            70..=89 => ItemKind::Rare,
            _ => ItemKind::Poison,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            ItemKind::Normal => 'O',
            ItemKind::Rare => '$',
            ItemKind::Poison => '%',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub pos: Position,
    pub kind: ItemKind,
    pub spawned_at: Duration,
}

/// Whether an item should be drawn at `now`. Normal items are steady; the
/// others sit still for a moment and then start flashing.
pub fn is_visible(item: &Item, now: Duration) -> bool {
    if item.kind == ItemKind::Normal {
        return true;
    }

    let age = now.saturating_sub(item.spawned_at);
    if age < FLASH_GRACE {
        return true;
    }

    ((age - FLASH_GRACE).as_millis() / FLASH_PERIOD_MS) % 2 == 0
}

pub struct ItemSpawner {
    rng: StdRng,
    width: i32,
    height: i32,
}

impl ItemSpawner {
    pub fn new(width: i32, height: i32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        ItemSpawner { rng, width, height }
    }

    /// Places a new item on a free interior cell, or `None` if the snake
    /// covers the whole board.
    pub fn spawn(
        &mut self,
        occupied: &Snake,
        difficulty: Difficulty,
        now: Duration,
    ) -> Option<Item> {
        let pos = self.free_cell(occupied)?;
        let kind = match difficulty {
            Difficulty::Normal => ItemKind::Normal,
            Difficulty::Extreme => ItemKind::from_roll(self.rng.gen_range(0..100)),
        };

        debug!("Spawned {:?} item at ({}, {})", kind, pos.x, pos.y);
        Some(Item { pos, kind, spawned_at: now })
    }

    fn free_cell(&mut self, occupied: &Snake) -> Option<Position> {
        let attempts = 4 * self.width * self.height;

        for _ in 0..attempts {
            let x = self.rng.gen_range(1..=self.width);
            let y = self.rng.gen_range(1..=self.height);
            let pos = Position::new(x, y);
            if !occupied.contains(pos) {
                return Some(pos);
            }
        }

        // Crowded board, pick among what's left
        let choices: Vec<Position> = (1..=self.height)
            .flat_map(|y| (1..=self.width).map(move |x| Position::new(x, y)))
            .filter(|&pos| !occupied.contains(pos))
            .collect();

        choices.choose(&mut self.rng).copied()
    }
}
