use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::PALETTE;
use crate::game::Snapshot;
use crate::input::{map_key_event, GameInput};
use crate::renderer;
use crate::ui::hud::HudInfo;

/// The game's screen and keyboard while it runs.
///
/// Raw mode and the alternate screen are held for the value's lifetime and
/// released best-effort on drop.
pub struct GameScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl GameScreen {
    /// Takes over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn open() -> io::Result<Self> {
        enable_raw_mode()?;

        let terminal = execute!(io::stdout(), EnterAlternateScreen, Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));

        terminal.map(|terminal| Self { terminal }).inspect_err(|_| {
            let _ = release_terminal();
        })
    }

    /// Paints one frame of `snapshot` with the HUD showing `start_label`.
    pub fn draw(&mut self, snapshot: &Snapshot, start_label: &str) -> io::Result<()> {
        self.terminal.draw(|frame| {
            renderer::render(
                frame,
                snapshot,
                HudInfo {
                    start_label,
                    palette: &PALETTE,
                },
            );
        })?;

        Ok(())
    }

    /// Waits up to `timeout` for a key press that maps to a game input.
    ///
    /// Unmapped keys, mouse and resize events yield `None`.
    pub fn next_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key_event(key)),
            _ => Ok(None),
        }
    }
}

impl Drop for GameScreen {
    fn drop(&mut self) {
        let _ = release_terminal();
    }
}

/// Chains a panic hook that gives the terminal back before the default report.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = release_terminal();
        default_hook(panic_info);
    }));
}

fn release_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)
}
