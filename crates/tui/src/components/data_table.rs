//! Paginated table screen for one remote collection.

use crossterm::event::{KeyCode, KeyEvent};
use mse_types::{Effect, FetchState, PAGE_SIZE_OPTIONS, Route};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use super::{Component, PaginationBar};
use crate::app::App;

/// Table screen bound to one route's [`mse_view::TableView`].
///
/// The component owns no data; it renders whatever the view's rendering
/// contract yields and translates keys into page/size updates or fetch
/// requests.
#[derive(Debug)]
pub(crate) struct DataTableComponent {
    route: Route,
    title: &'static str,
}

impl DataTableComponent {
    pub(crate) fn new(route: Route, title: &'static str) -> Self {
        Self { route, title }
    }

    /// Step the page size through the option set.
    fn cycle_page_size(&self, app: &mut App, forward: bool) {
        let Some(view) = app.view_mut(self.route) else { return };
        let current = view.window().page_size;
        let index = PAGE_SIZE_OPTIONS.iter().position(|&s| s == current).unwrap_or(0);
        let next = if forward {
            (index + 1).min(PAGE_SIZE_OPTIONS.len() - 1)
        } else {
            index.saturating_sub(1)
        };
        view.set_page_size(PAGE_SIZE_OPTIONS[next]);
    }

    fn step_page(&self, app: &mut App, forward: bool) {
        let Some(view) = app.view_mut(self.route) else { return };
        let page = view.window().page;
        if forward {
            view.set_page(page + 1);
        } else if page > 0 {
            view.set_page(page - 1);
        }
    }

    fn placeholder(&self, app: &App) -> Option<(String, bool)> {
        let view = app.view(self.route)?;
        match view.state() {
            FetchState::Idle if view.auto_fetch_on_enter() => Some(("No results to display".into(), false)),
            FetchState::Idle => Some(("Press f to fetch data".into(), false)),
            FetchState::Loading => Some(("Fetching data...".into(), false)),
            FetchState::Error(reason) => Some((format!("Fetch failed: {reason}  (r to retry)"), true)),
            FetchState::Success(records) if records.is_empty() => Some(("No data found".into(), false)),
            FetchState::Success(_) => None,
        }
    }
}

impl Component for DataTableComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Left => {
                self.step_page(app, false);
                Vec::new()
            }
            KeyCode::Right => {
                self.step_page(app, true);
                Vec::new()
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.cycle_page_size(app, true);
                Vec::new()
            }
            KeyCode::Char('-') => {
                self.cycle_page_size(app, false);
                Vec::new()
            }
            KeyCode::Char('f') | KeyCode::Char('r') => vec![Effect::FetchRequested(self.route)],
            KeyCode::Esc => vec![Effect::SwitchTo(Route::Home)],
            KeyCode::Char('q') => vec![Effect::Quit],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = app.theme.clone();
        let placeholder = self.placeholder(app);
        let Some(view) = app.view(self.route) else { return };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let block = Block::default()
            .title(Line::styled(self.title, theme.title))
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        if let Some((text, is_error)) = placeholder {
            let style = if is_error { theme.error } else { theme.muted };
            frame.render_widget(Paragraph::new(Line::styled(text, style)), inner);
            return;
        }

        let table_desc = view.render();
        let widths: Vec<Constraint> = table_desc.headers.iter().map(|_| Constraint::Fill(1)).collect();
        let header = Row::new(
            table_desc
                .headers
                .iter()
                .map(|label| Cell::from(label.clone()))
                .collect::<Vec<_>>(),
        )
        .style(theme.table_header);
        let rows: Vec<Row> = table_desc
            .rows
            .iter()
            .map(|cells| Row::new(cells.iter().map(|cell| Cell::from(cell.clone())).collect::<Vec<_>>()))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .style(theme.text);
        frame.render_widget(table, inner);

        PaginationBar::render(frame, chunks[1], &table_desc.page_info, &theme);
    }
}
