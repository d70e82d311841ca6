//! Top-level view: routes input and drawing to the active screen and owns
//! the shared chrome (title bar, notification line, key hints).

use crossterm::event::KeyEvent;
use mse_types::{Effect, Route};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
};

use super::{Component, DataTableComponent, HomeComponent};
use crate::app::App;

pub(crate) struct MainView {
    home: HomeComponent,
    issuers: DataTableComponent,
    historical: DataTableComponent,
}

impl MainView {
    pub(crate) fn new() -> Self {
        Self {
            home: HomeComponent::default(),
            issuers: DataTableComponent::new(Route::Issuers, "Issuer Codes"),
            historical: DataTableComponent::new(Route::HistoricalData, "Historical Data"),
        }
    }

    fn active(&mut self, route: Route) -> &mut dyn Component {
        match route {
            Route::Home => &mut self.home,
            Route::Issuers => &mut self.issuers,
            Route::HistoricalData => &mut self.historical,
        }
    }

    pub(crate) fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        self.active(app.route).handle_key_events(app, key)
    }

    pub(crate) fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(0),    // Active screen
                Constraint::Length(1), // Notification line
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        let title = Paragraph::new(Line::styled("mseview", app.theme.title));
        frame.render_widget(title, chunks[0]);

        self.active(app.route).render(frame, chunks[1], app);

        if let Some(notice) = app.notice.clone() {
            frame.render_widget(Paragraph::new(Line::styled(notice, app.theme.error)), chunks[2]);
        }

        let hints = match app.route {
            Route::Home => "↑/↓ select  Enter open  q quit",
            Route::Issuers => "←/→ page  +/- rows  r refetch  Esc home  q quit",
            Route::HistoricalData => "←/→ page  +/- rows  f fetch  Esc home  q quit",
        };
        frame.render_widget(Paragraph::new(Line::styled(hints, app.theme.muted)), chunks[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mse_types::Record;
    use ratatui::{Terminal, backend::TestBackend, layout::Position};
    use serde_json::json;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                if let Some(cell) = buffer.cell(Position::new(x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn renders_issuer_table_with_headers_and_rows() {
        let mut app = App::new();
        app.route = Route::Issuers;
        app.issuers.begin_fetch();
        let records: Vec<Record> = vec![
            match json!({"id": 1, "code": "ALK", "name": "Alkaloid"}) {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            },
        ];
        app.issuers.complete_fetch(Ok(records));

        let mut main_view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).expect("test terminal");
        terminal
            .draw(|frame| main_view.render(frame, frame.area(), &mut app))
            .expect("draw frame");

        let text = buffer_text(&terminal);
        assert!(text.contains("Issuer Codes"));
        assert!(text.contains("Code"));
        assert!(text.contains("ALK"));
        assert!(text.contains("Alkaloid"));
        assert!(text.contains("Page 1 of 1"));
    }

    #[test]
    fn renders_manual_fetch_placeholder_for_historical_route() {
        let mut app = App::new();
        app.route = Route::HistoricalData;

        let mut main_view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).expect("test terminal");
        terminal
            .draw(|frame| main_view.render(frame, frame.area(), &mut app))
            .expect("draw frame");

        let text = buffer_text(&terminal);
        assert!(text.contains("Press f to fetch data"));
    }
}
