//! Light/dark display mode and its colors

use ratatui::style::Color;

/// Display mode; toggled from the header and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggle(&mut self) {
        *self = match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        };
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Label of the toggle button: the mode it switches to
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Self::Light => "Dark",
            Self::Dark => "Light",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Self::Light => Palette::light(),
            Self::Dark => Palette::dark(),
        }
    }
}

/// Colors used across the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    /// Focused borders and the cursor
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
    /// Status bar background
    pub bar: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            accent: Color::Blue,
            muted: Color::Gray,
            error: Color::Rgb(186, 26, 26),
            success: Color::Rgb(2, 156, 118),
            border: Color::Gray,
            bar: Color::Rgb(220, 220, 220),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            error: Color::Rgb(255, 180, 171),
            success: Color::Green,
            border: Color::DarkGray,
            bar: Color::DarkGray,
        }
    }
}
