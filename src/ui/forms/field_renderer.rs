//! Field rendering utilities for forms

use crate::state::{FormField, Palette};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a single-line field: boxed input plus its error slot
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a field and the error slot underneath it
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
    palette: &Palette,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let border_style = match (is_active, error.is_some()) {
        (true, _) => Style::default().fg(palette.accent),
        (false, true) => Style::default().fg(palette.error),
        (false, false) => Style::default().fg(palette.border),
    };
    let text_style = Style::default().fg(palette.fg);
    let cursor = if is_active { "▌" } else { "" };
    let cursor_style = Style::default().fg(palette.accent);

    let display_value = field.display_value();
    let content = if field.is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(cursor, cursor_style));
        }
        Paragraph::new(lines).wrap(Wrap { trim: false })
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, text_style),
            Span::styled(cursor, cursor_style),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(content.block(block), chunks[0]);

    // Error slot stays reserved even when empty so the form does not jump
    let error_line = Paragraph::new(error.unwrap_or_default())
        .style(Style::default().fg(palette.error));
    frame.render_widget(error_line, chunks[1]);
}
