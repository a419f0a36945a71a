//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod preview;

use crate::state::AppState;
use ratatui::{style::Style, widgets::Block, Frame};

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState) {
    let palette = state.theme.palette();
    let area = frame.area();

    // Page background follows the theme
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        area,
    );

    let page = layout::create_layout(area);
    layout::draw_header(frame, page.header, state);

    let (form_area, preview_area) = layout::split_body(page.body);
    forms::draw_join_form(frame, form_area, state);
    preview::draw(frame, preview_area, state);

    layout::draw_status_bar(frame, page.status, state);

    // Consent banner sits on top of everything while unanswered
    if state.consent.visible {
        components::render_consent_banner(frame, &state.consent, &palette);
    }
}
