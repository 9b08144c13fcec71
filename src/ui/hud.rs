use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::Palette;
use crate::game::Snapshot;

/// Supplemental values displayed by the HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    /// Current label of the start control.
    pub start_label: &'a str,
    pub palette: &'a Palette,
}

/// Renders the one-line HUD along the bottom of `area` and returns the space above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, info: &HudInfo<'_>) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let control = control_line(info.start_label, info.palette);
    let control_width = u16::try_from(control.width()).unwrap_or(u16::MAX);
    let [scores_area, control_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(control_width)])
            .areas(hud_area);

    frame.render_widget(
        Paragraph::new(score_line(snapshot.score, snapshot.high_score, info.palette)),
        scores_area,
    );
    frame.render_widget(
        Paragraph::new(control).alignment(Alignment::Right),
        control_area,
    );

    play_area
}

fn score_line(score: u32, high_score: u32, palette: &Palette) -> Line<'static> {
    let label = Style::default().fg(palette.hud_muted);
    let value = Style::default()
        .fg(palette.hud_score)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Score ", label),
        Span::styled(score.to_string(), value),
        Span::styled("  High ", label),
        Span::styled(high_score.to_string(), value),
    ])
}

fn control_line<'a>(start_label: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(vec![
        Span::styled("[Enter] ", Style::default().fg(palette.hud_muted)),
        Span::styled(start_label, Style::default().fg(palette.title)),
    ])
}
