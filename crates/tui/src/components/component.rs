//! Component trait shared by all screens.

use crossterm::event::KeyEvent;
use mse_types::Effect;
use ratatui::{Frame, layout::Rect};

use crate::app::App;

/// A UI element with its own behavior and rendering.
///
/// Components own only local UI state; application state stays in [`App`].
/// Key handlers report side effects instead of performing them, so the
/// runtime remains the single place that spawns work or switches routes.
pub(crate) trait Component {
    /// Handle a key event, returning effects for the runtime to execute.
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect>;

    /// Draw the component into `area`.
    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App);
}
