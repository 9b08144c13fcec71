use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{BORDER_BOARD, COLUMNS_PER_CELL, GLYPH_CELL, GridSize, Palette};
use crate::game::Snapshot;
use crate::snake::Position;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, hud_info: HudInfo<'_>) {
    let palette = hud_info.palette;
    let board_area = board_rect(frame.area(), snapshot.bounds);
    let play_area = render_hud(frame, board_area, snapshot, &hud_info);

    let block = Block::bordered()
        .border_set(BORDER_BOARD)
        .border_style(Style::new().fg(palette.border_fg))
        .style(Style::new().bg(palette.board_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    paint_cell(frame, inner, snapshot.bounds, snapshot.food_cell, palette.food, palette);
    for cell in &snapshot.snake_cells {
        paint_cell(frame, inner, snapshot.bounds, *cell, palette.snake, palette);
    }

    if snapshot.game_over {
        render_game_over_menu(
            frame,
            play_area,
            snapshot.score,
            snapshot.high_score,
            snapshot.death_reason,
            palette,
        );
    } else if !snapshot.started {
        render_start_menu(frame, play_area, snapshot.high_score, palette);
    }
}

/// Centers the bordered board plus its HUD row inside `area`.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(COLUMNS_PER_CELL).saturating_add(2);
    // Border rows plus one HUD row.
    let height = bounds.height.saturating_add(3);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);

    board
}

fn paint_cell(
    frame: &mut Frame<'_>,
    inner: Rect,
    bounds: GridSize,
    position: Position,
    color: Color,
    palette: &Palette,
) {
    let Some((x, y)) = logical_to_terminal(inner, bounds, position) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_CELL, Style::new().fg(color).bg(palette.board_bg));
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(COLUMNS_PER_CELL)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
