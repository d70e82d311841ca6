//! Rendering contract exposed to the shell.
//!
//! `render()` flattens the view into plain strings so front ends never
//! touch JSON: ordered header labels, ordered rows of ordered cells, and
//! the pagination facts needed to draw navigation controls.

use mse_types::PAGE_SIZE_OPTIONS;
use serde_json::Value;

use crate::model::TableView;

/// Pagination facts for the current window, for the shell to render as
/// page navigation and a size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page, 0-based.
    pub page: usize,
    pub page_size: usize,
    /// Total records in the collection, across all pages.
    pub total: usize,
    pub size_options: &'static [usize],
}

impl PageInfo {
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    /// 1-based index of the first visible record; 0 when empty.
    pub fn first_row(&self) -> usize {
        if self.total == 0 { 0 } else { self.page * self.page_size + 1 }
    }

    /// 1-based index of the last visible record; 0 when empty.
    pub fn last_row(&self) -> usize {
        ((self.page + 1) * self.page_size).min(self.total)
    }
}

/// A fully rendered table: everything a front end needs, already stringly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescription {
    /// Header labels in schema order.
    pub headers: Vec<String>,
    /// Visible rows, each with one cell per schema column.
    pub rows: Vec<Vec<String>>,
    pub page_info: PageInfo,
}

impl TableView {
    /// Render the visible window of the table.
    ///
    /// Cells follow the schema's field order; fields missing from a record
    /// render as empty cells.
    pub fn render(&self) -> TableDescription {
        let schema = &self.config().schema;
        let headers = schema.columns().iter().map(|c| c.label.clone()).collect();
        let rows = self
            .visible_rows()
            .iter()
            .map(|record| {
                schema
                    .columns()
                    .iter()
                    .map(|column| cell_text(record.get(&column.field)))
                    .collect()
            })
            .collect();
        let window = self.window();

        TableDescription {
            headers,
            rows,
            page_info: PageInfo {
                page: window.page,
                page_size: window.page_size,
                total: self.record_count(),
                size_options: PAGE_SIZE_OPTIONS,
            },
        }
    }
}

/// Display text for one cell value. Strings render unquoted, numbers and
/// booleans via their JSON form, nulls and absent fields as empty.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ViewConfig;
    use mse_types::{ColumnSchema, Record};
    use serde_json::json;

    fn to_record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn fetched_issuers(records: Vec<Value>) -> TableView {
        let mut view = TableView::new(ViewConfig {
            endpoint: "/api/issuers".into(),
            schema: ColumnSchema::issuers(),
            auto_fetch_on_enter: true,
        });
        view.begin_fetch();
        view.complete_fetch(Ok(records.into_iter().map(to_record).collect()));
        view
    }

    #[test]
    fn renders_issuer_rows_in_schema_order() {
        let view = fetched_issuers(vec![
            json!({"id": 1, "code": "ALK", "name": "Alkaloid"}),
            json!({"id": 2, "code": "KMB", "name": "Komercijalna Banka"}),
        ]);

        let table = view.render();
        assert_eq!(table.headers, vec!["ID", "Code", "Name"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["1".to_string(), "ALK".to_string(), "Alkaloid".to_string()],
                vec!["2".to_string(), "KMB".to_string(), "Komercijalna Banka".to_string()],
            ]
        );
        assert_eq!(table.page_info.total, 2);
        assert_eq!(table.page_info.total_pages(), 1);
    }

    #[test]
    fn missing_fields_render_as_empty_cells() {
        let view = fetched_issuers(vec![json!({"id": 9, "name": "No Code"})]);
        let table = view.render();
        assert_eq!(table.rows[0], vec!["9".to_string(), String::new(), "No Code".to_string()]);
    }

    #[test]
    fn null_fields_render_as_empty_cells() {
        let view = fetched_issuers(vec![json!({"id": 1, "code": null, "name": "X"})]);
        assert_eq!(view.render().rows[0][1], "");
    }

    #[test]
    fn page_info_tracks_window_bounds() {
        let records: Vec<Value> = (1..=25)
            .map(|id| json!({"id": id, "code": format!("C{id}"), "name": "n"}))
            .collect();
        let mut view = fetched_issuers(records);
        assert!(view.set_page(2));

        let info = view.render().page_info;
        assert_eq!(info.page, 2);
        assert_eq!(info.total, 25);
        assert_eq!(info.total_pages(), 3);
        assert_eq!(info.first_row(), 21);
        assert_eq!(info.last_row(), 25);
        assert!(info.has_prev());
        assert!(!info.has_next());
    }

    #[test]
    fn empty_table_renders_headers_only() {
        let view = fetched_issuers(Vec::new());
        let table = view.render();
        assert_eq!(table.headers.len(), 3);
        assert!(table.rows.is_empty());
        assert_eq!(table.page_info.first_row(), 0);
        assert_eq!(table.page_info.last_row(), 0);
        assert!(!table.page_info.has_next());
    }

    #[test]
    fn cell_text_formats_scalars() {
        assert_eq!(cell_text(Some(&json!("ALK"))), "ALK");
        assert_eq!(cell_text(Some(&json!(21500))), "21500");
        assert_eq!(cell_text(Some(&json!(0.47))), "0.47");
        assert_eq!(cell_text(Some(&json!(true))), "true");
        assert_eq!(cell_text(None), "");
    }
}
