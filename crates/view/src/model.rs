//! Fetch lifecycle and pagination for one remote table.

use mse_types::{ColumnSchema, FetchError, FetchState, PAGE_SIZE_OPTIONS, PageWindow, Record};

/// Immutable configuration of a table view, set once at construction.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// API-relative endpoint path, e.g. `/api/issuers`.
    pub endpoint: String,
    /// Which record fields to display, in order, with header labels.
    pub schema: ColumnSchema,
    /// Fetch immediately when the view is entered, instead of waiting for
    /// the user to trigger one.
    pub auto_fetch_on_enter: bool,
}

/// State of one paginated remote table.
///
/// Holds exactly one [`FetchState`] and one [`PageWindow`]; nothing is
/// shared between views. Fetch failures are contained here — they surface
/// as an error state plus a one-shot notice, never as a crash.
#[derive(Debug)]
pub struct TableView {
    config: ViewConfig,
    state: FetchState,
    window: PageWindow,
    notice: Option<String>,
}

impl TableView {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            state: FetchState::Idle,
            window: PageWindow::default(),
            notice: None,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn auto_fetch_on_enter(&self) -> bool {
        self.config.auto_fetch_on_enter
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Number of records in the current collection; 0 unless Success.
    pub fn record_count(&self) -> usize {
        match &self.state {
            FetchState::Success(records) => records.len(),
            _ => 0,
        }
    }

    /// Number of pages the current collection spans; 0 when empty.
    pub fn page_count(&self) -> usize {
        self.record_count().div_ceil(self.window.page_size)
    }

    /// Transition into Loading, unless a fetch is already in flight.
    ///
    /// Returns `true` when the caller should issue exactly one request;
    /// `false` drops the trigger entirely (it is not queued). This is the
    /// guard that keeps at most one fetch outstanding per view.
    pub fn begin_fetch(&mut self) -> bool {
        if self.state.is_loading() {
            return false;
        }
        self.state = FetchState::Loading;
        true
    }

    /// Apply the outcome of the in-flight fetch.
    ///
    /// A success replaces the record collection wholesale and resets the
    /// window to page 0. A failure records the reason and raises one
    /// user-visible notice, drained via [`TableView::take_notice`].
    /// Completions arriving while the view is not Loading (a response for
    /// a view that was torn down and re-entered) are discarded.
    pub fn complete_fetch(&mut self, result: Result<Vec<Record>, FetchError>) {
        if !self.state.is_loading() {
            return;
        }
        match result {
            Ok(records) => {
                self.window.page = 0;
                self.state = FetchState::Success(records);
            }
            Err(error) => {
                let reason = error.to_string();
                self.notice = Some(format!("Fetch failed: {reason}"));
                self.state = FetchState::Error(reason);
            }
        }
    }

    /// Take the pending notification, if any. Each failure raises exactly
    /// one; draining clears it.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Move to `page` if it is within bounds; out-of-bounds requests are
    /// rejected and leave the window untouched.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page > 0 && page >= self.page_count() {
            return false;
        }
        self.window.page = page;
        true
    }

    /// Change the page size; only members of [`PAGE_SIZE_OPTIONS`] are
    /// accepted. Accepting resets the window to page 0.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return false;
        }
        self.window.page_size = size;
        self.window.page = 0;
        true
    }

    /// The records visible through the current page window, in collection
    /// order. Empty unless the state is Success.
    pub fn visible_rows(&self) -> &[Record] {
        match &self.state {
            FetchState::Success(records) => {
                let start = (self.window.page * self.window.page_size).min(records.len());
                let end = (start + self.window.page_size).min(records.len());
                &records[start..end]
            }
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mse_types::Record;
    use serde_json::json;

    fn record(id: i64) -> Record {
        match json!({"id": id, "code": format!("C{id}"), "name": format!("Issuer {id}")}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn records(n: i64) -> Vec<Record> {
        (1..=n).map(record).collect()
    }

    fn issuers_view() -> TableView {
        TableView::new(ViewConfig {
            endpoint: "/api/issuers".into(),
            schema: ColumnSchema::issuers(),
            auto_fetch_on_enter: true,
        })
    }

    #[test]
    fn begin_fetch_guards_against_duplicate_requests() {
        let mut view = issuers_view();
        assert!(view.begin_fetch());
        // Second trigger while loading is dropped, not queued.
        assert!(!view.begin_fetch());
        view.complete_fetch(Ok(records(1)));
        // After completion a new fetch is permitted again.
        assert!(view.begin_fetch());
    }

    #[test]
    fn success_replaces_records_and_resets_page() {
        let mut view = issuers_view();
        view.begin_fetch();
        view.complete_fetch(Ok(records(25)));
        assert!(view.set_page(2));
        assert_eq!(view.window().page, 2);

        view.begin_fetch();
        view.complete_fetch(Ok(records(3)));
        assert_eq!(view.window().page, 0);
        assert_eq!(view.record_count(), 3);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut view = issuers_view();
        view.complete_fetch(Ok(records(5)));
        assert_eq!(*view.state(), FetchState::Idle);
    }

    #[test]
    fn failure_raises_exactly_one_notice_and_allows_retry() {
        let mut view = issuers_view();
        view.begin_fetch();
        view.complete_fetch(Err(FetchError::Network("connection refused".into())));

        assert!(matches!(view.state(), FetchState::Error(_)));
        let notice = view.take_notice().expect("one notice raised");
        assert!(notice.contains("connection refused"));
        assert!(view.take_notice().is_none());

        // The view stays interactive; a retry can succeed.
        assert!(view.begin_fetch());
        view.complete_fetch(Ok(records(2)));
        assert_eq!(view.record_count(), 2);
    }

    #[test]
    fn pages_partition_the_collection_in_order() {
        let mut view = issuers_view();
        view.begin_fetch();
        view.complete_fetch(Ok(records(25)));

        let mut seen: Vec<Record> = Vec::new();
        for page in 0..view.page_count() {
            assert!(view.set_page(page));
            let rows = view.visible_rows();
            assert!(rows.len() <= view.window().page_size);
            seen.extend(rows.iter().cloned());
        }
        assert_eq!(seen, records(25));
    }

    #[test]
    fn paging_through_25_records_with_size_10() {
        let mut view = issuers_view();
        view.begin_fetch();
        view.complete_fetch(Ok(records(25)));

        assert_eq!(view.visible_rows().len(), 10);
        assert_eq!(view.visible_rows()[0]["id"], 1);

        assert!(view.set_page(2));
        assert_eq!(view.visible_rows().len(), 5);
        assert_eq!(view.visible_rows()[0]["id"], 21);

        // Page 3 is out of bounds and rejected.
        assert!(!view.set_page(3));
        assert_eq!(view.window().page, 2);
    }

    #[test]
    fn empty_collection_has_no_rows_and_rejects_paging() {
        let mut view = issuers_view();
        view.begin_fetch();
        view.complete_fetch(Ok(Vec::new()));

        assert!(view.visible_rows().is_empty());
        assert!(!view.set_page(1));
        // Page 0 is always valid, even when empty.
        assert!(view.set_page(0));
    }

    #[test]
    fn set_page_size_resets_page_and_rejects_unknown_sizes() {
        let mut view = issuers_view();
        view.begin_fetch();
        view.complete_fetch(Ok(records(100)));
        assert!(view.set_page(5));

        assert!(view.set_page_size(25));
        assert_eq!(view.window().page, 0);
        assert_eq!(view.window().page_size, 25);

        assert!(!view.set_page_size(7));
        assert_eq!(view.window().page_size, 25);
    }

    #[test]
    fn visible_rows_empty_outside_success() {
        let mut view = issuers_view();
        assert!(view.visible_rows().is_empty());
        view.begin_fetch();
        assert!(view.visible_rows().is_empty());
        view.complete_fetch(Err(FetchError::Status(500)));
        assert!(view.visible_rows().is_empty());
    }
}
