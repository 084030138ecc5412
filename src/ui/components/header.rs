//! Header component renderer.
//!
//! This module renders the plugin title bar with the view title on the left,
//! the favorites count and session status on the right, and theme-aware
//! colors.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified row.
///
/// Pads the line to fill the entire terminal width. The status is dropped
/// when it does not fit next to the title.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Layout
///
/// ```text
/// TITLE [padding] ♥ 2  ann@example.com (since 2026-10-18 09:12)
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = display_width(&header.title);
    let status_len = display_width(&header.status) + 1;
    let status = if title_len + status_len <= cols { header.status.as_str() } else { "" };
    let used = title_len + if status.is_empty() { 0 } else { status_len };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    if !status.is_empty() {
        print!("{status} ");
    }

    print!("{}", Theme::reset());
    row + 1
}
