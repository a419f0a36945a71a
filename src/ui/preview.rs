//! Photo preview panel
//!
//! Each terminal cell shows two pixel rows with an upper half block: the
//! foreground paints the top pixel and the background the bottom one.

use crate::preview::PreviewImage;
use crate::state::{AppState, PreviewSlot};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const UPPER_HALF: &str = "▀";

/// Draw the `photoPreview` region
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = state.theme.palette();
    let mut block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let body = match &state.preview.slot {
        PreviewSlot::Empty => Paragraph::new("No photo selected")
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center),
        PreviewSlot::Loading { file_name, .. } => Paragraph::new(format!("Loading {file_name}…"))
            .style(Style::default().fg(palette.muted))
            .wrap(Wrap { trim: true }),
        PreviewSlot::Failed(message) => Paragraph::new(message.as_str())
            .style(Style::default().fg(palette.error))
            .wrap(Wrap { trim: true }),
        PreviewSlot::Ready(image) => {
            block = block.title_bottom(Line::from(format!(" {} ", PreviewImage::ALT)).centered());
            Paragraph::new(image_lines(image, palette.bg)).alignment(Alignment::Center)
        }
    };

    frame.render_widget(body.block(block), area);
}

/// Convert a thumbnail into half-block lines
fn image_lines(image: &PreviewImage, background: Color) -> Vec<Line<'static>> {
    (0..image.height)
        .step_by(2)
        .map(|y| {
            let spans: Vec<Span> = (0..image.width)
                .map(|x| {
                    let top = image.pixel(x, y).map_or(background, rgb);
                    let bottom = image.pixel(x, y + 1).map_or(background, rgb);
                    Span::styled(UPPER_HALF, Style::default().fg(top).bg(bottom))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}
