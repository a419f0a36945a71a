//! Cookie consent banner overlay

use crate::state::{ConsentBanner, ConsentChoice, Palette};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE: &str = " Cookies ";

const MESSAGE: &str = "This form stores your name and email in cookies so they are \
filled in next time, plus your answer to this banner. Nothing is sent anywhere.";

/// Maximum width of the banner
const MAX_WIDTH: u16 = 72;

/// Render the banner anchored to the bottom of the screen, above the status bar
pub fn render_consent_banner(frame: &mut Frame, banner: &ConsentBanner, palette: &Palette) {
    let area = frame.area();
    let width = MAX_WIDTH.min(area.width);
    let padding = 4u16; // 2 chars padding on each side
    let wrapped = wrap_text(MESSAGE, width.saturating_sub(padding) as usize);

    // Message lines + blank + buttons + borders
    let height = (wrapped.len() as u16 + 2 + 2).min(area.height);
    let banner_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    };

    frame.render_widget(Clear, banner_area);

    let mut content: Vec<Line> = wrapped
        .into_iter()
        .map(|l| Line::from(format!(" {l}")))
        .collect();
    content.push(Line::from(""));
    content.push(choice_line(banner.selected, palette));

    let widget = Paragraph::new(content)
        .block(
            Block::default()
                .title(TITLE)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        )
        .style(Style::default().bg(palette.bg).fg(palette.fg));

    frame.render_widget(widget, banner_area);
}

fn choice_line(selected: ConsentChoice, palette: &Palette) -> Line<'static> {
    let style_for = |choice: ConsentChoice| {
        if choice == selected {
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.accent)
        }
    };

    Line::from(vec![
        Span::raw(" "),
        Span::styled(" [a] Accept ", style_for(ConsentChoice::Accept)),
        Span::raw("  "),
        Span::styled(" [d] Decline ", style_for(ConsentChoice::Decline)),
    ])
}

/// Wrap text to fit within a maximum width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let needed = current_line.chars().count() + word.chars().count() + 1;
        if needed > max_width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
        }
        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }
    if !current_line.is_empty() || lines.is_empty() {
        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn test_wrap_text_keeps_long_word_whole() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcdefghij"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
