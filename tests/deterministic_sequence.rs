use std::sync::Arc;
use std::time::Duration;

use grid_snake::config::GridSize;
use grid_snake::food::Food;
use grid_snake::game::{DeathReason, GameState, GameStatus, TickOutcome};
use grid_snake::input::{Direction, GameInput, Heading};
use grid_snake::score::{MemoryStore, ScoreStore};
use grid_snake::session::Session;
use grid_snake::snake::{Position, Snake};

fn started(seed: u64) -> GameState {
    let mut state = GameState::new_with_seed(GridSize::square(20), seed);
    assert!(state.start());
    state
}

#[test]
fn first_turn_then_eat_food_at_start() {
    let mut state = started(42);
    assert_eq!(state.heading, Heading::Idle);

    state.set_direction(Direction::Right);
    assert_eq!(state.heading.delta(), (1, 0));

    state.food = Food::new(Position { x: 11, y: 10 });
    assert_eq!(state.tick(), TickOutcome::Ate);

    assert_eq!(
        state.snake.segments().copied().collect::<Vec<_>>(),
        vec![Position { x: 11, y: 10 }, Position { x: 10, y: 10 }]
    );
    assert_eq!(state.score, 10);
    assert!(state.food.position.is_within_bounds(state.bounds()));
}

#[test]
fn moving_left_at_left_wall_ends_game() {
    let mut state = started(7);
    state.snake = Snake::new(Position { x: 0, y: 0 });
    state.heading = Heading::Moving(Direction::Left);

    state.tick();

    assert_eq!(state.status, GameStatus::GameOver);
    assert_eq!(state.death_reason, Some(DeathReason::WallCollision));
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = started(3);
    state.snake = Snake::new(Position { x: 17, y: 1 });
    state.set_direction(Direction::Right);
    state.food = Food::new(Position { x: 18, y: 1 });

    assert_eq!(state.tick(), TickOutcome::Ate);
    assert_eq!(state.snake.len(), 2);

    // A reversal into the neck is ignored.
    state.set_direction(Direction::Left);
    state.food = Food::new(Position { x: 0, y: 19 });
    assert_eq!(state.tick(), TickOutcome::Moved);
    assert_eq!(state.snake.head(), Position { x: 19, y: 1 });

    state.set_direction(Direction::Up);
    assert_eq!(state.tick(), TickOutcome::Moved);
    assert_eq!(state.snake.head(), Position { x: 19, y: 0 });

    assert!(matches!(state.tick(), TickOutcome::GameOver(_)));
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.len(), 2);
}

#[test]
fn length_changes_by_at_most_one_per_tick() {
    let mut state = started(99);
    let turns = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    for step in 0..400 {
        if step % 5 == 0 {
            state.set_direction(turns[(step / 5) % turns.len()]);
        }

        let before = state.snake.len();
        let outcome = state.tick();
        let after = state.snake.len();

        match outcome {
            TickOutcome::Ate => assert_eq!(after, before + 1),
            TickOutcome::GameOver(_) => {
                assert_eq!(after, before);
                break;
            }
            _ => assert_eq!(after, before),
        }
    }
}

#[test]
fn reset_after_game_over_yields_fresh_session() {
    let mut state = started(5);
    state.snake = Snake::new(Position { x: 5, y: 19 });
    state.heading = Heading::Moving(Direction::Down);
    state.tick();
    assert!(state.is_game_over());

    state.reset();

    assert_eq!(state.snake.len(), 1);
    assert_eq!(state.score, 0);
    assert!(!state.is_game_over());
    assert!(!state.is_started());
}

#[test]
fn session_persists_new_record_and_survives_restart() {
    let store = Arc::new(MemoryStore::with_high_score(0));
    let mut state = started(11);
    state.food = Food::new(Position { x: 10, y: 9 });
    let mut session = Session::new(state, store.clone());

    session.handle_input(GameInput::Direction(Direction::Up));
    // Ten cells from the top wall: the eleventh tick ends the game.
    let mut outcome = TickOutcome::Idle;
    for _ in 0..11 {
        outcome = session.tick();
    }
    let TickOutcome::GameOver(game_over) = outcome else {
        panic!("expected game over, got {outcome:?}");
    };
    assert!(game_over.new_high_score);

    let score = session.snapshot().score;
    assert!(score >= 10);
    session.shutdown(Duration::from_secs(5));
    assert_eq!(store.get_high_score().expect("memory load"), score);

    session.handle_input(GameInput::Start);
    let snapshot = session.snapshot();
    assert!(snapshot.started);
    assert!(!snapshot.game_over);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.high_score, score);
}
