//! Styling for the TUI widgets.

use ratatui::style::{Color, Modifier, Style};

/// Style palette shared by all components.
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub text: Style,
    pub muted: Style,
    pub accent: Style,
    pub error: Style,
    pub table_header: Style,
    pub selected: Style,
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            text: Style::default().fg(Color::Gray),
            muted: Style::default().fg(Color::DarkGray),
            accent: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red),
            table_header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Cyan),
        }
    }
}
