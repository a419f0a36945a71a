//! Sign-up form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::state::{AppState, FieldId, FormButton, MessageKind};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Fields in the left column; the rest go right
const LEFT_COLUMN: [FieldId; 5] = [
    FieldId::Fullname,
    FieldId::Email,
    FieldId::Password,
    FieldId::Password2,
    FieldId::Age,
];

const RIGHT_COLUMN: [FieldId; 3] = [FieldId::Cv, FieldId::Photo, FieldId::Agree];

/// Draw the sign-up form
pub fn draw_join_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let border_color = if state.consent.visible {
        palette.muted
    } else {
        palette.accent
    };
    let block = Block::default()
        .title(" Join the forum ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Fields
            Constraint::Length(1),             // Form message
            Constraint::Length(BUTTON_HEIGHT), // Buttons
        ])
        .split(inner);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .horizontal_margin(1)
        .spacing(1)
        .split(rows[0]);

    draw_column(frame, columns[0], state, &LEFT_COLUMN, false);
    draw_column(frame, columns[1], state, &RIGHT_COLUMN, true);
    draw_form_message(frame, rows[1], state);
    draw_buttons(frame, rows[2], state);
}

fn draw_column(frame: &mut Frame, area: Rect, state: &AppState, ids: &[FieldId], with_bio: bool) {
    let mut constraints: Vec<Constraint> =
        ids.iter().map(|_| Constraint::Length(FIELD_HEIGHT)).collect();
    if with_bio {
        constraints.push(Constraint::Min(FIELD_HEIGHT));
    } else {
        constraints.push(Constraint::Min(0));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let palette = state.theme.palette();
    let focused = state.form.focused_field();
    for (idx, id) in ids.iter().enumerate() {
        draw_field(
            frame,
            chunks[idx],
            state.form.field(*id),
            focused == Some(*id),
            state.error_for(*id),
            &palette,
        );
    }

    if with_bio {
        let bio_area = chunks[ids.len()];
        draw_field(
            frame,
            bio_area,
            &state.form.bio,
            focused == Some(FieldId::Bio),
            state.error_for(FieldId::Bio),
            &palette,
        );

        // Live character count on the bio's slot row
        let count_area = Rect {
            y: bio_area.y + bio_area.height.saturating_sub(1),
            height: 1.min(bio_area.height),
            ..bio_area
        };
        let count = Paragraph::new(format!("{} characters", state.bio_count()))
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Right);
        frame.render_widget(count, count_area);
    }
}

fn draw_form_message(frame: &mut Frame, area: Rect, state: &AppState) {
    let message = &state.form_message;
    if !message.visible {
        return;
    }
    let palette = state.theme.palette();
    let color = match message.kind {
        MessageKind::Success => palette.success,
        MessageKind::Error => palette.error,
    };
    let line = Line::from(Span::styled(
        format!(" {}", message.text),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_buttons(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(12), // Join
            Constraint::Length(1),
            Constraint::Length(12), // Reset
            Constraint::Min(0),
        ])
        .split(area);

    let palette = state.theme.palette();
    let on_buttons = state.form.is_buttons_row_active();
    for (button, chunk) in [(FormButton::Join, chunks[1]), (FormButton::Reset, chunks[3])] {
        let is_selected = on_buttons && state.form.selected_button == button;
        render_button(frame, chunk, button.label(), is_selected, &palette);
    }
}
