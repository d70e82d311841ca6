//! Tabular data view state.
//!
//! One [`TableView`] owns everything a paginated remote table needs: the
//! fetch lifecycle (Idle → Loading → Success/Error), the fetched record
//! collection, and the page window over it. It performs no I/O itself —
//! callers gate the actual request on [`TableView::begin_fetch`] and feed
//! the outcome back through [`TableView::complete_fetch`], which keeps the
//! whole lifecycle unit-testable without a network.
//!
//! Rendering is a pure query: [`TableView::render`] produces a
//! [`render::TableDescription`] (header labels, string cell rows, page
//! info) for whichever front end draws it, terminal table or stdout.

mod model;
mod render;

pub use model::{TableView, ViewConfig};
pub use render::{PageInfo, TableDescription, cell_text};
