//! Terminal user interface for mseview.
//!
//! The TUI is the "shell" around the tabular data views: it owns the
//! terminal lifecycle, routes key input to the active screen, and executes
//! fetch effects as background tasks whose completions feed back into the
//! views.
//!
//! ## Architecture
//!
//! Each screen (home, issuer codes, historical data) is a component that
//! handles its own key events and rendering, reporting side effects back to
//! the runtime as [`mse_types::Effect`]s. Application state lives in
//! [`app::App`]; components stay free of I/O.

mod app;
mod components;
mod runtime;
mod theme;

use anyhow::Result;
use mse_api::MseClient;

/// Runs the TUI event loop until the user quits.
///
/// Takes ownership of the terminal (raw mode, alternate screen) and
/// restores it on exit. Errors indicate terminal setup or runtime
/// failures; fetch failures never propagate here.
pub async fn run(client: MseClient) -> Result<()> {
    runtime::run_app(client).await
}
