//! Shared type definitions for the mseview workspace.
//!
//! This crate holds the vocabulary the other crates speak: the record and
//! column-schema shapes that describe what a table displays, the fetch
//! lifecycle and page window that describe how it is displayed, and the
//! message/effect enums the TUI shell routes between components.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Page sizes the user can choose from.
pub const PAGE_SIZE_OPTIONS: &[usize] = &[10, 25, 50, 100];

/// Page size applied before the user picks one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A fetched record: one JSON object keyed by field name.
///
/// Tables are schema-agnostic; records stay as parsed JSON objects and the
/// column schema decides which fields are displayed and in what order.
pub type Record = serde_json::Map<String, Value>;

/// One displayed column: the record field it reads and the header label it
/// renders under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub field: String,
    pub label: String,
}

/// Ordered sequence of columns; fixed once a view is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Builds a schema from `(field, label)` pairs, preserving order.
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let columns = pairs
            .into_iter()
            .map(|(field, label)| Column {
                field: field.into(),
                label: label.into(),
            })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Schema for the issuer list endpoint.
    pub fn issuers() -> Self {
        Self::new([("id", "ID"), ("code", "Code"), ("name", "Name")])
    }

    /// Schema for the historical trading data endpoint.
    pub fn historical_data() -> Self {
        Self::new([
            ("id", "ID"),
            ("issuerCode", "Issuer Code"),
            ("date", "Date"),
            ("lastPrice", "Last Price"),
            ("maxPrice", "Max Price"),
            ("minPrice", "Min Price"),
            ("avgPrice", "Average Price"),
            ("percentChange", "Percent Change"),
            ("quantity", "Quantity"),
            ("turnoverBest", "Turnover Best"),
            ("totalTurnover", "Total Turnover"),
        ])
    }
}

/// Lifecycle of one remote collection fetch. The sole mutable entity of a
/// table view; exactly one value at any time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(Vec<Record>),
    Error(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Pagination cursor over the current record collection.
///
/// Reset to page 0 whenever the page size changes or a fetch completes
/// successfully; `page * page_size` never exceeds the record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Current page, 0-based.
    pub page: usize,
    /// Rows per page; always a member of [`PAGE_SIZE_OPTIONS`].
    pub page_size: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Why a fetch failed. All variants collapse to the same error state and
/// notification path; the kind only shapes the human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("parse failure: {0}")]
    Parse(String),
}

/// A traded entity on the exchange, as served by `/api/issuers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issuer {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// One daily trading summary, as served by `/api/historicaldata`.
///
/// The backend stores every figure as a string, so the fields stay strings
/// here; display needs no numeric interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalEntry {
    pub id: i64,
    pub issuer_code: String,
    pub date: String,
    pub last_price: String,
    pub max_price: String,
    pub min_price: String,
    pub avg_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<String>,
    pub quantity: String,
    pub turnover_best: String,
    pub total_turnover: String,
}

/// Screens the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Issuers,
    HistoricalData,
}

/// Messages fed back into the application state by background work.
#[derive(Debug)]
pub enum Msg {
    /// A spawned fetch finished, successfully or not.
    FetchCompleted {
        route: Route,
        result: Result<Vec<Record>, FetchError>,
    },
}

/// Side effects components request from the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Navigate to another screen.
    SwitchTo(Route),
    /// Start a fetch for the given route's view.
    FetchRequested(Route),
    /// Leave the TUI.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issuer_round_trips_wire_shape() {
        let json = r#"{"id":1,"code":"ALK","name":"Alkaloid"}"#;
        let issuer: Issuer = serde_json::from_str(json).expect("deserialize Issuer");
        assert_eq!(issuer.id, 1);
        assert_eq!(issuer.code, "ALK");
        assert_eq!(issuer.name, "Alkaloid");

        let back = serde_json::to_value(&issuer).expect("serialize Issuer");
        assert_eq!(back["code"], "ALK");
    }

    #[test]
    fn historical_entry_uses_camel_case_fields() {
        let json = r#"{
            "id": 7,
            "issuerCode": "KMB",
            "date": "2024-11-08",
            "lastPrice": "21500",
            "maxPrice": "21600",
            "minPrice": "21400",
            "avgPrice": "21480",
            "percentChange": "0.47",
            "quantity": "120",
            "turnoverBest": "2580000",
            "totalTurnover": "2600000"
        }"#;
        let entry: HistoricalEntry = serde_json::from_str(json).expect("deserialize HistoricalEntry");
        assert_eq!(entry.issuer_code, "KMB");
        assert_eq!(entry.percent_change.as_deref(), Some("0.47"));

        let back = serde_json::to_value(&entry).expect("serialize HistoricalEntry");
        assert_eq!(back["issuerCode"], "KMB");
        assert_eq!(back["totalTurnover"], "2600000");
    }

    #[test]
    fn percent_change_is_optional_on_the_wire() {
        let json = r#"{
            "id": 3,
            "issuerCode": "ALK",
            "date": "2024-11-08",
            "lastPrice": "100",
            "maxPrice": "101",
            "minPrice": "99",
            "avgPrice": "100",
            "quantity": "10",
            "turnoverBest": "1000",
            "totalTurnover": "1000"
        }"#;
        let entry: HistoricalEntry = serde_json::from_str(json).expect("deserialize without percentChange");
        assert!(entry.percent_change.is_none());
    }

    #[test]
    fn schema_preserves_column_order() {
        let schema = ColumnSchema::historical_data();
        let fields: Vec<&str> = schema.columns().iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields[0], "id");
        assert_eq!(fields[1], "issuerCode");
        assert_eq!(fields.last().copied(), Some("totalTurnover"));
        assert_eq!(fields.len(), 11);
    }

    #[test]
    fn fetch_error_messages_are_human_readable() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP 404");
        assert!(
            FetchError::Parse("expected an array".into())
                .to_string()
                .starts_with("parse failure")
        );
    }
}
