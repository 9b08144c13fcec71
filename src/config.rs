use ratatui::style::Color;
use ratatui::symbols::border;

use crate::snake::Position;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns a square grid with `side` cells on each axis.
    #[must_use]
    pub const fn square(side: u16) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Width of the square drawing surface in surface units.
pub const SURFACE_SIZE: u16 = 400;

/// Side of one board cell in surface units.
pub const CELL_SIZE: u16 = 20;

/// Number of cells along each board axis.
pub const BOARD_SIZE: u16 = SURFACE_SIZE / CELL_SIZE;

/// The fixed playing field.
pub const BOARD: GridSize = GridSize::square(BOARD_SIZE);

/// Cell the snake head occupies after every reset.
pub const START_POSITION: Position = Position { x: 10, y: 10 };

/// Points granted per food eaten.
pub const FOOD_POINTS: u32 = 10;

/// Fixed simulation cadence in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Input poll / redraw budget between ticks.
pub const FRAME_POLL_MS: u64 = 16;

/// Terminal columns used for one board cell so cells render roughly square.
pub const COLUMNS_PER_CELL: u16 = 2;

/// Colours used for every visual element.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub snake: Color,
    pub food: Color,
    pub board_bg: Color,
    pub border_fg: Color,
    pub overlay_fg: Color,
    pub overlay_bg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub title: Color,
}

/// Green snake and red food on a light board.
pub const PALETTE: Palette = Palette {
    snake: Color::Rgb(0x28, 0xa7, 0x45),
    food: Color::Rgb(0xdc, 0x35, 0x45),
    board_bg: Color::Rgb(0xf8, 0xf9, 0xfa),
    border_fg: Color::Gray,
    overlay_fg: Color::White,
    overlay_bg: Color::Black,
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    title: Color::Green,
};

/// Board frame glyphs.
pub const BORDER_BOARD: border::Set = border::ROUNDED;

/// Glyph painted for the snake and food cells.
pub const GLYPH_CELL: &str = "██";
