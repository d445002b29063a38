use std::time::Duration;

use log::info;

use crate::config::{Difficulty, GameConfig};
use crate::geometry::{Direction, Position};
use crate::highscore::HighScoreStore;
use crate::input::Command;
use crate::item::{Item, ItemKind, ItemSpawner};
use crate::snake::Snake;

const NORMAL_POINTS: u32 = 10;
const RARE_POINTS_EXTREME: u32 = 20;
const RARE_POINTS: u32 = 8;
const POISON_PENALTY: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Start,
    Running,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    Wall,
    SelfCollision,
    /// The snake filled every cell, nothing left to spawn on
    BoardCleared,
}

pub struct SnakeGame<S: HighScoreStore> {
    config: GameConfig,
    store: S,
    spawner: ItemSpawner,
    state: GameState,
    running: bool,
    paused: bool,
    difficulty: Difficulty,
    snake: Snake,
    item: Option<Item>,
    score: u32,
    high_score: u32,
    foods_consumed: u32,
    level: u32,
    interval: Duration,
    accumulator: Duration,
    clock: Duration,
    cause: Option<GameOverCause>,
    new_record_at: Option<Duration>,
}

impl<S: HighScoreStore> SnakeGame<S> {
    pub fn new(
        config: GameConfig,
        mut store: S,
        spawner: ItemSpawner,
        difficulty: Difficulty,
    ) -> Self {
        let high_score = store.load();
        let snake = Snake::new(center(&config), Direction::Right, config.initial_length);
        let interval = config.movement_interval(1, difficulty);

        SnakeGame {
            config,
            store,
            spawner,
            state: GameState::Start,
            running: true,
            paused: false,
            difficulty,
            snake,
            item: None,
            score: 0,
            high_score,
            foods_consumed: 0,
            level: 1,
            interval,
            accumulator: Duration::ZERO,
            clock: Duration::ZERO,
            cause: None,
            new_record_at: None,
        }
    }

    pub fn handle(&mut self, command: Command) {
        match (self.state, command) {
            (_, Command::Quit) => self.running = false,
            (GameState::Start, Command::SelectDifficulty(difficulty)) => {
                self.difficulty = difficulty;
                self.interval = self.config.movement_interval(1, difficulty);
            }
            (GameState::Start, Command::Turn(direction)) => self.start(direction),
            (GameState::Start, Command::Confirm) => self.start(Direction::Right),
            (GameState::Running, Command::Turn(direction)) if !self.paused => {
                self.snake.queue_direction(direction)
            }
            (GameState::Running, Command::Pause) => self.paused = !self.paused,
            (GameState::GameOver, Command::Restart) => self.start(Direction::Right),
            _ => {}
        }
    }

    /// Feeds elapsed wall time into the simulation, running one tick per
    /// full movement interval. A long frame catches up tick by tick so
    /// every step still goes through collision checks.
    pub fn advance(&mut self, delta: Duration) {
        self.clock += delta;

        if self.state != GameState::Running || self.paused {
            return;
        }

        self.accumulator += delta;
        while self.state == GameState::Running && self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            self.tick();
        }
    }

    fn tick(&mut self) {
        let next_head = self.snake.peek_next_head();
        let eaten = self.item.filter(|item| item.pos == next_head);
        let grow = matches!(eaten, Some(item) if item.kind != ItemKind::Poison);

        let head = self.snake.move_step(grow);

        if head.is_out_of_bounds(self.config.width, self.config.height) {
            self.game_over(GameOverCause::Wall);
            return;
        }
        if self.snake.has_self_collision() {
            self.game_over(GameOverCause::SelfCollision);
            return;
        }

        if let Some(item) = eaten {
            self.consume(item.kind);
        }
    }

    fn consume(&mut self, kind: ItemKind) {
        let extreme = self.difficulty == Difficulty::Extreme;
        match kind {
            ItemKind::Normal => self.score += NORMAL_POINTS,
            ItemKind::Rare if extreme => self.score += RARE_POINTS_EXTREME,
            ItemKind::Rare => self.score += RARE_POINTS,
            ItemKind::Poison => self.score = self.score.saturating_sub(POISON_PENALTY),
        }

        if kind != ItemKind::Poison {
            self.foods_consumed += 1;
        }
        self.level = self.config.level_for(self.foods_consumed);
        self.interval = self.config.movement_interval(self.level, self.difficulty);

        self.item = self.spawner.spawn(&self.snake, self.difficulty, self.clock);
        if self.item.is_none() {
            self.game_over(GameOverCause::BoardCleared);
        }
    }

    fn start(&mut self, direction: Direction) {
        self.snake.reset(center(&self.config), direction, self.config.initial_length);
        self.score = 0;
        self.foods_consumed = 0;
        self.level = 1;
        self.interval = self.config.movement_interval(1, self.difficulty);
        self.accumulator = Duration::ZERO;
        self.paused = false;
        self.cause = None;
        self.new_record_at = None;
        self.high_score = self.store.load();
        self.item = self.spawner.spawn(&self.snake, self.difficulty, self.clock);
        self.state = GameState::Running;

        info!("New game on {} difficulty, heading {:?}", self.difficulty.label(), direction);
    }

    fn game_over(&mut self, cause: GameOverCause) {
        self.state = GameState::GameOver;
        self.cause = Some(cause);

        info!(
            "Game over ({:?}): score {}, level {}, length {}",
            cause, self.score, self.level, self.snake.len()
        );

        if self.score > self.high_score {
            info!("New high score {} (was {})", self.score, self.high_score);
            self.high_score = self.score;
            self.store.save(self.score);
            self.new_record_at = Some(self.clock);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn cause(&self) -> Option<GameOverCause> {
        self.cause
    }

    pub fn new_record_at(&self) -> Option<Duration> {
        self.new_record_at
    }
}

fn center(config: &GameConfig) -> Position {
    Position::new(config.width / 2, config.height / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::MemoryHighScoreStore;

    fn game_with(difficulty: Difficulty, best: u32) -> SnakeGame<MemoryHighScoreStore> {
        let store = MemoryHighScoreStore { value: best, saves: 0 };
        let spawner = ItemSpawner::new(30, 18, Some(9));
        SnakeGame::new(GameConfig::default(), store, spawner, difficulty)
    }

    fn running(difficulty: Difficulty) -> SnakeGame<MemoryHighScoreStore> {
        let mut game = game_with(difficulty, 0);
        game.handle(Command::Confirm);
        park_item(&mut game);
        game
    }

    // Keeps the item off the snake's path along row 9
    fn park_item(game: &mut SnakeGame<MemoryHighScoreStore>) {
        game.item = Some(item_at(Position::new(1, 1), ItemKind::Normal));
    }

    fn item_at(pos: Position, kind: ItemKind) -> Item {
        Item { pos, kind, spawned_at: Duration::ZERO }
    }

    fn eat(game: &mut SnakeGame<MemoryHighScoreStore>, kind: ItemKind) {
        game.item = Some(item_at(game.snake.peek_next_head(), kind));
        game.tick();
    }

    #[test]
    fn test_start_screen_waits() {
        let mut game = game_with(Difficulty::Normal, 70);
        assert_eq!(game.state(), GameState::Start);
        assert_eq!(game.high_score(), 70);

        game.advance(Duration::from_secs(5));
        assert_eq!(game.snake().head(), Position::new(15, 9));

        game.handle(Command::Restart);
        assert_eq!(game.state(), GameState::Start);
    }

    #[test]
    fn test_confirm_starts_heading_right() {
        let mut game = game_with(Difficulty::Normal, 0);
        game.handle(Command::Confirm);

        assert_eq!(game.state(), GameState::Running);
        assert_eq!(
            game.snake().body(),
            &[
                Position::new(15, 9),
                Position::new(14, 9),
                Position::new(13, 9),
                Position::new(12, 9),
            ]
        );
        let item = game.item().unwrap();
        assert!(!game.snake().contains(item.pos));
    }

    #[test]
    fn test_direction_key_starts_in_that_direction() {
        let mut game = game_with(Difficulty::Normal, 0);
        game.handle(Command::Turn(Direction::Up));

        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.snake().direction(), Direction::Up);
        assert_eq!(game.snake().body()[3], Position::new(15, 12));
    }

    #[test]
    fn test_mode_selection() {
        let mut game = game_with(Difficulty::Normal, 0);
        game.handle(Command::SelectDifficulty(Difficulty::Extreme));
        game.handle(Command::Confirm);
        assert_eq!(game.difficulty(), Difficulty::Extreme);

        // Only honoured on the start screen
        game.handle(Command::SelectDifficulty(Difficulty::Normal));
        assert_eq!(game.difficulty(), Difficulty::Extreme);
    }

    #[test]
    fn test_normal_item_scores_ten() {
        for difficulty in [Difficulty::Normal, Difficulty::Extreme] {
            let mut game = running(difficulty);
            eat(&mut game, ItemKind::Normal);

            assert_eq!(game.score(), 10);
            assert_eq!(game.snake().len(), 5);
            assert_eq!(game.foods_consumed, 1);
            let item = game.item().unwrap();
            assert!(!game.snake().contains(item.pos));
        }
    }

    #[test]
    fn test_rare_item_points() {
        let mut game = running(Difficulty::Extreme);
        eat(&mut game, ItemKind::Rare);
        assert_eq!(game.score(), 20);
        assert_eq!(game.foods_consumed, 1);

        let mut game = running(Difficulty::Normal);
        eat(&mut game, ItemKind::Rare);
        assert_eq!(game.score(), 8);
    }

    #[test]
    fn test_poison_item() {
        let mut game = running(Difficulty::Extreme);
        eat(&mut game, ItemKind::Poison);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.foods_consumed, 0);

        eat(&mut game, ItemKind::Rare);
        eat(&mut game, ItemKind::Poison);
        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().len(), 5);
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn test_level_up_after_five_foods() {
        let mut game = running(Difficulty::Normal);
        let before = game.interval();

        for _ in 0..4 {
            eat(&mut game, ItemKind::Normal);
        }
        assert_eq!(game.level(), 1);

        eat(&mut game, ItemKind::Normal);

        assert_eq!(game.level(), 2);
        assert!(game.interval() < before);
        assert!(game.interval() >= game.config().min_interval);
    }

    #[test]
    fn test_wall_ends_game() {
        // Heading, ticks to the last interior cell, that cell, the wall cell
        let cases = [
            (Direction::Right, 15, Position::new(30, 9), Position::new(31, 9)),
            (Direction::Left, 14, Position::new(1, 9), Position::new(0, 9)),
            (Direction::Down, 9, Position::new(15, 18), Position::new(15, 19)),
            (Direction::Up, 8, Position::new(15, 1), Position::new(15, 0)),
        ];

        for (direction, ticks, last, wall) in cases {
            let mut game = game_with(Difficulty::Normal, 0);
            game.handle(Command::Turn(direction));
            park_item(&mut game);

            for _ in 0..ticks {
                game.tick();
            }
            assert_eq!(game.state(), GameState::Running);
            assert_eq!(game.snake().head(), last);

            game.tick();
            assert_eq!(game.state(), GameState::GameOver, "heading {:?}", direction);
            assert_eq!(game.cause(), Some(GameOverCause::Wall));
            assert_eq!(game.snake().head(), wall);
        }
    }

    #[test]
    fn test_turn_into_top_wall() {
        let mut game = running(Difficulty::Normal);
        game.handle(Command::Turn(Direction::Up));

        for _ in 0..9 {
            game.tick();
        }
        assert_eq!(game.snake().head().y, 0);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut game = running(Difficulty::Normal);
        eat(&mut game, ItemKind::Normal);

        for dir in [Direction::Down, Direction::Left, Direction::Up] {
            game.handle(Command::Turn(dir));
            game.tick();
        }
        assert_eq!(game.cause(), Some(GameOverCause::SelfCollision));
    }

    #[test]
    fn test_high_score_saved_on_record() {
        let mut game = game_with(Difficulty::Normal, 5);
        game.handle(Command::Confirm);
        eat(&mut game, ItemKind::Normal);
        park_item(&mut game);
        game.advance(Duration::from_secs(10));

        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.high_score(), 10);
        assert_eq!(game.store.value, 10);
        assert_eq!(game.store.saves, 1);
        assert_eq!(game.new_record_at(), Some(game.clock()));
    }

    #[test]
    fn test_high_score_kept_when_not_beaten() {
        let mut game = game_with(Difficulty::Normal, 500);
        game.handle(Command::Confirm);
        game.advance(Duration::from_secs(10));

        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.high_score(), 500);
        assert_eq!(game.store.saves, 0);
        assert_eq!(game.new_record_at(), None);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut game = running(Difficulty::Normal);
        eat(&mut game, ItemKind::Normal);
        park_item(&mut game);
        game.advance(Duration::from_secs(10));
        assert_eq!(game.state(), GameState::GameOver);

        game.handle(Command::Restart);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.cause(), None);
        assert_eq!(game.high_score(), 10);
    }

    #[test]
    fn test_catch_up_ticks() {
        let mut game = running(Difficulty::Normal);
        let interval = game.interval();

        game.advance(interval / 2);
        assert_eq!(game.snake().head(), Position::new(15, 9));

        game.advance(interval * 3);
        assert_eq!(game.snake().head(), Position::new(18, 9));
        assert_eq!(game.accumulator, interval / 2);
    }

    #[test]
    fn test_catch_up_stops_at_game_over() {
        let mut game = running(Difficulty::Normal);
        game.advance(game.interval() * 100);

        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.snake().head(), Position::new(31, 9));
    }

    #[test]
    fn test_pause() {
        let mut game = running(Difficulty::Normal);
        game.handle(Command::Pause);
        game.handle(Command::Turn(Direction::Up));
        game.advance(Duration::from_secs(1));

        assert!(game.is_paused());
        assert_eq!(game.snake().head(), Position::new(15, 9));
        assert_eq!(game.snake().next_direction(), Direction::Right);

        game.handle(Command::Pause);
        game.advance(game.interval());
        assert_eq!(game.snake().head(), Position::new(16, 9));
    }

    #[test]
    fn test_quit_from_any_state() {
        let mut game = game_with(Difficulty::Normal, 0);
        game.handle(Command::Quit);
        assert!(!game.is_running());

        let mut game = running(Difficulty::Normal);
        game.handle(Command::Quit);
        assert!(!game.is_running());
    }

    #[test]
    fn test_filling_the_board() {
        let config = GameConfig::new(8, 1);
        let store = MemoryHighScoreStore::default();
        let spawner = ItemSpawner::new(8, 1, Some(1));
        let mut game = SnakeGame::new(config, store, spawner, Difficulty::Normal);

        game.state = GameState::Running;
        game.snake = Snake::new(Position::new(7, 1), Direction::Right, 7);
        eat(&mut game, ItemKind::Normal);

        assert_eq!(game.snake().len(), 8);
        assert_eq!(game.item(), None);
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.cause(), Some(GameOverCause::BoardCleared));
        assert_eq!(game.store.value, 10);
    }
}
