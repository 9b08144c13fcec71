use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{BOARD, FOOD_POINTS, GridSize, START_POSITION};
use crate::food::Food;
use crate::input::{direction_change_is_valid, Direction, Heading};
use crate::snake::{Position, Snake};

/// Current high-level lifecycle state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Waiting for the first start command.
    NotStarted,
    Running,
    GameOver,
}

/// Why the last session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Result of a single [`GameState::tick`] call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Not started or already over; nothing changed.
    Inactive,
    /// Started but no direction chosen yet; the snake stayed put.
    Idle,
    Moved,
    Ate,
    GameOver(GameOver),
}

/// Details of a game-over transition.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOver {
    pub reason: DeathReason,
    pub score: u32,
    /// Set when `score` beat the cached high score; the cache already holds it.
    pub new_high_score: bool,
}

/// Read-only view handed to the renderer each frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub snake_cells: Vec<Position>,
    pub food_cell: Position,
    pub score: u32,
    pub high_score: u32,
    pub started: bool,
    pub game_over: bool,
    pub death_reason: Option<DeathReason>,
    pub bounds: GridSize,
}

/// Complete mutable game state for one process.
///
/// Sessions come and go through [`GameState::reset`]; the cached high score
/// and the food RNG live for the whole process.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub heading: Heading,
    pub score: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    high_score: u32,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a state on the standard board with entropy-seeded food placement.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(BOARD, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let food = Food::spawn(&mut rng, bounds);

        Self {
            snake: Snake::new(start_position(bounds)),
            food,
            heading: Heading::Idle,
            score: 0,
            status: GameStatus::NotStarted,
            death_reason: None,
            high_score: 0,
            bounds,
            rng,
        }
    }

    /// Returns the board dimensions.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Returns true once a start command has been accepted for this session.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.status != GameStatus::NotStarted
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Returns the cached high score.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Merges a high score obtained from the store into the cache.
    ///
    /// The cache never decreases, so a late load cannot hide a record set
    /// earlier in this process.
    pub fn merge_stored_high_score(&mut self, stored: u32) {
        self.high_score = self.high_score.max(stored);
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Inactive;
        }

        if self.heading == Heading::Idle {
            return TickOutcome::Idle;
        }

        let next_head = self.snake.head().stepped(self.heading.delta());

        if !next_head.is_within_bounds(self.bounds) {
            return TickOutcome::GameOver(self.end(DeathReason::WallCollision));
        }

        // Checked against the pre-move body, tail included.
        if self.snake.occupies(next_head) {
            return TickOutcome::GameOver(self.end(DeathReason::SelfCollision));
        }

        let ate = next_head == self.food.position;
        self.snake.advance(next_head, ate);

        if ate {
            self.score += FOOD_POINTS;
            self.food = Food::spawn(&mut self.rng, self.bounds);
            return TickOutcome::Ate;
        }

        TickOutcome::Moved
    }

    /// Applies a direction intent, ignoring reversals and anything before start.
    ///
    /// The new heading takes effect on the next tick.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.is_started() {
            return;
        }

        if direction_change_is_valid(self.heading, direction) {
            self.heading = Heading::Moving(direction);
        }
    }

    /// Accepts a start command when not started; returns whether it did.
    pub fn start(&mut self) -> bool {
        if self.is_started() {
            return false;
        }

        self.status = GameStatus::Running;
        true
    }

    /// Resets and starts a new session when the current one is over or was
    /// never started. A running session is left alone.
    pub fn restart(&mut self) -> bool {
        if self.status == GameStatus::Running {
            return false;
        }

        self.reset();
        self.start()
    }

    /// Reinitializes the session. The cached high score is kept.
    pub fn reset(&mut self) {
        self.snake = Snake::new(start_position(self.bounds));
        self.food = Food::spawn(&mut self.rng, self.bounds);
        self.heading = Heading::Idle;
        self.score = 0;
        self.status = GameStatus::NotStarted;
        self.death_reason = None;
    }

    /// Captures everything the renderer needs for one frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake_cells: self.snake.segments().copied().collect(),
            food_cell: self.food.position,
            score: self.score,
            high_score: self.high_score,
            started: self.is_started(),
            game_over: self.is_game_over(),
            death_reason: self.death_reason,
            bounds: self.bounds,
        }
    }

    fn end(&mut self, reason: DeathReason) -> GameOver {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }

        GameOver {
            reason,
            score: self.score,
            new_high_score,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn start_position(bounds: GridSize) -> Position {
    if START_POSITION.is_within_bounds(bounds) {
        START_POSITION
    } else {
        Position {
            x: i32::from(bounds.width / 2),
            y: i32::from(bounds.height / 2),
        }
    }
}
