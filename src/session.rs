use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::game::{GameState, Snapshot, TickOutcome};
use crate::high_score::{GatewayEvent, HighScoreGateway};
use crate::input::GameInput;
use crate::score::ScoreStore;

/// Label for the start control, derived from the lifecycle flags.
#[must_use]
pub fn start_label(started: bool, game_over: bool) -> &'static str {
    if started || game_over {
        "Restart Game"
    } else {
        "Start Game"
    }
}

/// Driver-side owner of the game and its high-score gateway.
///
/// Constructed once by the binary and held for the life of the process.
pub struct Session {
    state: GameState,
    gateway: HighScoreGateway,
}

impl Session {
    /// Wraps `state` and immediately issues the high-score load, so the load
    /// always precedes the first tick.
    #[must_use]
    pub fn new(state: GameState, store: Arc<dyn ScoreStore>) -> Self {
        let mut gateway = HighScoreGateway::new(store);
        gateway.load();

        Self { state, gateway }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Routes one input. `Quit` is the driver's business and is ignored here.
    pub fn handle_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.state.set_direction(direction),
            GameInput::Start => {
                if self.state.restart() {
                    info!("session started");
                }
            }
            GameInput::Quit => {}
        }
    }

    /// Runs one simulation step and performs the game-over side effect.
    pub fn tick(&mut self) -> TickOutcome {
        self.pump();

        let outcome = self.state.tick();
        if let TickOutcome::GameOver(game_over) = outcome {
            info!(
                reason = ?game_over.reason,
                score = game_over.score,
                new_high_score = game_over.new_high_score,
                "game over"
            );

            if game_over.new_high_score {
                self.gateway.save(game_over.score);
            }
        }

        outcome
    }

    /// Applies any store completions that have arrived since the last call.
    pub fn pump(&mut self) {
        for event in self.gateway.poll() {
            self.apply(event);
        }
    }

    /// Returns the render view for this frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Returns the label the start control should show right now.
    #[must_use]
    pub fn start_label(&self) -> &'static str {
        start_label(self.state.is_started(), self.state.is_game_over())
    }

    /// Waits up to `timeout` for outstanding store calls before exit.
    pub fn shutdown(&mut self, timeout: Duration) {
        for event in self.gateway.drain(timeout) {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: GatewayEvent) {
        if let GatewayEvent::Loaded(score) = event {
            self.state.merge_stored_high_score(score);
            debug!(high_score = self.state.high_score(), "high score cache updated");
        }
    }
}
