//! Application state shared across components.

use mse_api::{HISTORICAL_DATA_PATH, ISSUERS_PATH};
use mse_types::{ColumnSchema, Effect, FetchState, Route};
use mse_view::{TableView, ViewConfig};

use crate::theme::Theme;

/// Top-level state: the active route, one table view per data screen, and
/// the notification line. Each view owns its fetch state and page window
/// exclusively; nothing is shared between them.
pub struct App {
    pub route: Route,
    pub theme: Theme,
    pub issuers: TableView,
    pub historical: TableView,
    /// Last user-visible notification, shown in the status line.
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            route: Route::Home,
            theme: Theme::default(),
            // The issuer list fetches as soon as the screen is entered; the
            // historical table waits for an explicit trigger.
            issuers: TableView::new(ViewConfig {
                endpoint: ISSUERS_PATH.into(),
                schema: ColumnSchema::issuers(),
                auto_fetch_on_enter: true,
            }),
            historical: TableView::new(ViewConfig {
                endpoint: HISTORICAL_DATA_PATH.into(),
                schema: ColumnSchema::historical_data(),
                auto_fetch_on_enter: false,
            }),
            notice: None,
            should_quit: false,
        }
    }

    /// The table view behind a route, if the route has one.
    pub fn view(&self, route: Route) -> Option<&TableView> {
        match route {
            Route::Home => None,
            Route::Issuers => Some(&self.issuers),
            Route::HistoricalData => Some(&self.historical),
        }
    }

    pub fn view_mut(&mut self, route: Route) -> Option<&mut TableView> {
        match route {
            Route::Home => None,
            Route::Issuers => Some(&mut self.issuers),
            Route::HistoricalData => Some(&mut self.historical),
        }
    }

    /// Switch routes, requesting a fetch when the target view wants one on
    /// entry.
    pub fn on_route_enter(&mut self, route: Route) -> Vec<Effect> {
        self.route = route;
        match self.view(route) {
            Some(view) if view.auto_fetch_on_enter() && !view.is_loading() => {
                vec![Effect::FetchRequested(route)]
            }
            _ => Vec::new(),
        }
    }

    /// Pull pending notices out of the views into the status line.
    ///
    /// A stale failure line is dropped once the active view has data
    /// again; fresh notices drained afterwards still take the line.
    pub fn collect_notices(&mut self) {
        if let Some(view) = self.view(self.route)
            && matches!(view.state(), FetchState::Success(_))
        {
            self.notice = None;
        }
        for route in [Route::Issuers, Route::HistoricalData] {
            if let Some(notice) = self.view_mut(route).and_then(TableView::take_notice) {
                self.notice = Some(notice);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
