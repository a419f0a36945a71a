//! Layout components (header, body split, status bar)

use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT, THEME_SHORTCUT};
use crate::state::{AppState, FieldId};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Page title shown in the header
const TITLE: &str = " StudEng Forum · Join ";

/// Regions of the page
pub struct PageLayout {
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
}

/// Create the main layout: header, body, status bar
pub fn create_layout(area: Rect) -> PageLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Form and preview
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    PageLayout {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

/// Split the body into the form and the preview column
pub fn split_body(body: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form
            Constraint::Length(28), // Preview
        ])
        .split(body);
    (chunks[0], chunks[1])
}

/// Draw the header with the page title and the theme toggle
pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let toggle = format!(" [{THEME_SHORTCUT}] {} ", state.theme.toggle_label());

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(palette.bar));
    frame.render_widget(title, area);

    let width = toggle.chars().count() as u16;
    let toggle_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width: width.min(area.width),
        height: 1,
    };
    let toggle_widget = Paragraph::new(toggle)
        .style(Style::default().bg(palette.bar).fg(palette.fg));
    frame.render_widget(toggle_widget, toggle_area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let mut spans = vec![Span::styled(
        format!(" {} ", get_hints(state)),
        Style::default().fg(palette.muted),
    )];

    if let Some(msg) = &state.status_message {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg, Style::default().fg(palette.error)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.bar));
    frame.render_widget(status, area);

    // Footer year on the right
    let footer = format!(" © {} StudEng ", state.year);
    let width = footer.chars().count() as u16;
    let footer_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width: width.min(area.width),
        height: 1,
    };
    let footer_widget =
        Paragraph::new(footer).style(Style::default().bg(palette.bar).fg(palette.fg));
    frame.render_widget(footer_widget, footer_area);
}

/// Get keyboard hints for whatever holds focus
fn get_hints(state: &AppState) -> String {
    if state.consent.visible {
        return "a:accept  d:decline  ←/→:choose  Enter:confirm".to_string();
    }

    let form = &state.form;
    if form.is_buttons_row_active() {
        return "←/→:choose  Enter:press  Tab:next  ^C^C:quit".to_string();
    }

    let field_hint = match form.focused_field() {
        Some(FieldId::Agree) => "Space:toggle",
        Some(FieldId::Bio) => "Enter:newline",
        Some(FieldId::Cv) | Some(FieldId::Photo) => "type a path",
        _ => "Enter:submit",
    };
    format!("Tab:next  {field_hint}  {SUBMIT_SHORTCUT}:join  {RESET_SHORTCUT}:reset  ^C^C:quit")
}
