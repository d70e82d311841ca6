//! Pagination status bar under a data table.

use mse_view::PageInfo;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::theme::Theme;

/// Renders page navigation facts: current page, visible row range, and the
/// page-size selector. Display-only; the table component owns the keys.
pub(crate) struct PaginationBar;

impl PaginationBar {
    pub(crate) fn render(frame: &mut Frame, area: Rect, info: &PageInfo, theme: &Theme) {
        let total_pages = info.total_pages();
        let page_text = if total_pages == 0 {
            "No pages".to_string()
        } else {
            format!("Page {} of {}", info.page + 1, total_pages)
        };

        let mut spans = vec![
            Span::styled("◀ ", if info.has_prev() { theme.accent } else { theme.muted }),
            Span::styled(page_text, theme.text),
            Span::styled(" ▶", if info.has_next() { theme.accent } else { theme.muted }),
            Span::styled(
                format!("   {}-{} of {}", info.first_row(), info.last_row(), info.total),
                theme.muted,
            ),
        ];

        spans.push(Span::styled("   rows: ", theme.muted));
        for &option in info.size_options {
            let style = if option == info.page_size { theme.accent } else { theme.muted };
            spans.push(Span::styled(format!("{option} "), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
