use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{BOARD, FRAME_POLL_MS, TICK_INTERVAL_MS};
use grid_snake::game::GameState;
use grid_snake::input::GameInput;
use grid_snake::logging::{default_log_path, init_tracing};
use grid_snake::score::{JsonFileStore, MemoryStore, ScoreStore};
use grid_snake::session::Session;
use grid_snake::terminal_runtime::{install_panic_hook, GameScreen};
use tracing::info;

/// How long to wait for a pending high-score write on quit.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Read and write the high score at this path instead of the data directory.
    #[arg(long = "score-file", value_name = "PATH")]
    score_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long = "memory-store", conflicts_with = "score_file")]
    memory_store: bool,

    /// Append diagnostics to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(error) = init_tracing(&log_path) {
        eprintln!("Logging disabled ({}): {error}", log_path.display());
    }

    install_panic_hook();
    run(cli)
}

fn run(cli: Cli) -> io::Result<()> {
    let store = build_store(&cli);
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(BOARD, seed),
        None => GameState::new(),
    };
    let mut session = Session::new(state, store);
    info!(seed = ?cli.seed, "grid-snake starting");

    let mut screen = GameScreen::open()?;
    let tick_interval = Duration::from_millis(TICK_INTERVAL_MS);
    let mut last_tick = Instant::now();

    loop {
        session.pump();

        screen.draw(&session.snapshot(), session.start_label())?;

        let until_tick = tick_interval.saturating_sub(last_tick.elapsed());
        let poll_timeout = until_tick.min(Duration::from_millis(FRAME_POLL_MS));
        match screen.next_input(poll_timeout)? {
            Some(GameInput::Quit) => break,
            Some(input) => session.handle_input(input),
            None => {}
        }

        if last_tick.elapsed() >= tick_interval {
            session.tick();
            last_tick = Instant::now();
        }
    }

    drop(screen);
    session.shutdown(SHUTDOWN_GRACE);
    info!("grid-snake exiting");
    Ok(())
}

fn build_store(cli: &Cli) -> Arc<dyn ScoreStore> {
    if cli.memory_store {
        return Arc::new(MemoryStore::default());
    }

    let store = match &cli.score_file {
        Some(path) => JsonFileStore::new(path.clone()),
        None => JsonFileStore::at_default_location(),
    };
    info!(path = %store.path().display(), "using score file");

    Arc::new(store)
}
