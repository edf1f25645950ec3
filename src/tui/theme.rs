//! Styles for the two display modes.

use ratatui::style::{Color, Modifier, Style};

/// Style set for one display mode.
///
/// Light is the default. Every widget the renderer draws takes its colors
/// from these helpers, so flipping the mode restyles the whole frame on the
/// next draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Theme {
    dark: bool,
}

impl Theme {
    pub(crate) fn new(dark: bool) -> Self {
        Self { dark }
    }

    /// Short mode name shown in the header.
    pub(crate) fn label(&self) -> &'static str {
        if self.dark {
            "dark"
        } else {
            "light"
        }
    }

    pub(crate) fn base(&self) -> Style {
        if self.dark {
            Style::default().fg(Color::Gray).bg(Color::Black)
        } else {
            Style::default().fg(Color::Black).bg(Color::White)
        }
    }

    pub(crate) fn header(&self) -> Style {
        self.base().add_modifier(Modifier::BOLD)
    }

    pub(crate) fn dim(&self) -> Style {
        self.base().fg(Color::DarkGray)
    }

    pub(crate) fn card_border(&self) -> Style {
        if self.dark {
            self.base().fg(Color::DarkGray)
        } else {
            self.base().fg(Color::Gray)
        }
    }

    pub(crate) fn title(&self) -> Style {
        self.base().add_modifier(Modifier::BOLD)
    }

    pub(crate) fn authors(&self) -> Style {
        self.base().add_modifier(Modifier::ITALIC)
    }

    pub(crate) fn marker(&self, bookmarked: bool) -> Style {
        if bookmarked {
            self.base().fg(Color::Yellow)
        } else {
            self.dim()
        }
    }

    pub(crate) fn error(&self) -> Style {
        self.base().fg(Color::Red)
    }

    pub(crate) fn toast(&self) -> Style {
        self.base().fg(Color::Yellow)
    }

    pub(crate) fn footer_key(&self) -> Style {
        self.base().fg(Color::Cyan)
    }

    pub(crate) fn footer_label(&self) -> Style {
        self.dim()
    }

    pub(crate) fn selection(&self) -> Style {
        self.base().add_modifier(Modifier::REVERSED)
    }
}
