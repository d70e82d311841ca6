//! UI components: self-contained screens and widgets that handle their own
//! key events and rendering, reporting side effects back to the runtime.

mod component;
mod data_table;
mod home;
mod main_view;
mod pagination;

pub(crate) use component::Component;
pub(crate) use data_table::DataTableComponent;
pub(crate) use home::HomeComponent;
pub(crate) use main_view::MainView;
pub(crate) use pagination::PaginationBar;
