//! Search bar: a framed one-line query box.

use crate::ui::helpers::{clip, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Blank columns left and right of the frame.
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search box at `row` and returns the row after it.
///
/// The box takes three lines:
///
/// ```text
/// [margin] ┌─────────────────┐ [margin]
/// [margin] │ Search: fra█    │ [margin]
/// [margin] └─────────────────┘ [margin]
/// ```
///
/// The block cursor is drawn only while typing goes to the query; when the
/// results have focus the query is dimmed.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let inner_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2 + 2);
    let border = Theme::fg(&theme.colors.input_border);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let rule = "─".repeat(inner_width);

    let cursor = if search.focused { "█" } else { "" };
    let label = format!(" Search: {}{cursor}", search.query);
    let label = clip(&label, inner_width);
    let text_color = if search.focused {
        &theme.colors.text
    } else {
        &theme.colors.text_dim
    };

    position_cursor(row, 1);
    print!("{margin}{border}┌{rule}┐{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!(
        "{margin}{border}│{}{label}{}{border}│{}",
        Theme::fg(text_color),
        " ".repeat(inner_width.saturating_sub(display_width(label))),
        Theme::reset()
    );

    position_cursor(row + 2, 1);
    print!("{margin}{border}└{rule}┘{}", Theme::reset());

    row + 3
}
