use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit step `(dx, dy)`; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Stored movement vector: either a direction or the idle `(0, 0)` vector
/// the snake holds until the first turn after a start.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Heading {
    #[default]
    Idle,
    Moving(Direction),
}

impl Heading {
    /// Returns the step applied to the head on each tick.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Idle => (0, 0),
            Self::Moving(direction) => direction.delta(),
        }
    }

    /// Returns the current direction, if the snake is moving.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Idle => None,
            Self::Moving(direction) => Some(direction),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Start a session, or restart one that has ended.
    Start,
    Quit,
}

/// Returns whether turning from `current` to `next` is legal (no immediate 180° turns).
///
/// An idle heading accepts any direction.
#[must_use]
pub fn direction_change_is_valid(current: Heading, next: Direction) -> bool {
    match current {
        Heading::Idle => true,
        Heading::Moving(direction) => next != direction.opposite(),
    }
}

/// Maps one terminal key event to a game input.
///
/// Arrow keys and WASD steer, Enter and Space start, `q`, Esc and Ctrl-C quit.
/// Key releases and repeats of unmapped keys yield `None`.
#[must_use]
pub fn map_key_event(event: KeyEvent) -> Option<GameInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameInput::Quit),
            _ => None,
        };
    }

    let input = match event.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            GameInput::Direction(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameInput::Direction(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameInput::Direction(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Start,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}
