//! Landing screen: pick a data view.

use crossterm::event::{KeyCode, KeyEvent};
use mse_types::{Effect, Route};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::component::Component;
use crate::app::App;

const ENTRIES: &[(&str, Route)] = &[
    ("Issuer Codes", Route::Issuers),
    ("Historical Data", Route::HistoricalData),
];

/// Home screen listing the available data views.
#[derive(Debug, Default)]
pub(crate) struct HomeComponent {
    selected: usize,
}

impl Component for HomeComponent {
    fn handle_key_events(&mut self, _app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(ENTRIES.len() - 1);
                Vec::new()
            }
            KeyCode::Enter => vec![Effect::SwitchTo(ENTRIES[self.selected].1)],
            KeyCode::Char('q') => vec![Effect::Quit],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &app.theme;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let title = Paragraph::new(Line::styled("Data for the Macedonian Stock Exchange", theme.title));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = ENTRIES
            .iter()
            .map(|(label, _)| ListItem::new(Line::styled(*label, theme.text)))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).border_style(theme.border))
            .highlight_style(theme.selected)
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }
}
