//! Single-player grid Snake: a deterministic tick simulation with a
//! best-effort persisted high score, plus the terminal front end that drives it.

pub mod config;
pub mod food;
pub mod game;
pub mod high_score;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
