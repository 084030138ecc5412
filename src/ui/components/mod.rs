//! Composable UI component renderers.
//!
//! Each component is responsible for rendering a specific part of the
//! interface and returns the next free row where that makes sense.
//!
//! # Components
//!
//! - [`header`]: Title bar with session status
//! - [`footer`]: Help text and keybinding hints
//! - [`search`]: Search input box (border, query text)
//! - [`criteria`]: Active criteria summary line
//! - [`table`]: Country list with columns (NAME, REGION, POPULATION, AREA)
//! - [`picker`]: Selector dropdown drawn over the table
//! - [`detail`]: Country detail page
//! - [`login`]: Login form
//! - [`empty`]: Centered message for empty lists and not-found pages
//!
//! # Layout
//!
//! Every view shares the same frame:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Body]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod criteria;
mod detail;
mod empty;
mod footer;
mod header;
mod login;
mod picker;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, TableInfo, UIViewModel};

use criteria::render_criteria_bar;
use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use login::render_login;
use picker::render_picker;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/body, body/footer).
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a full frame: header, body and footer.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    match &vm.body {
        Body::Table(table) => render_table_body(current_row, table, theme, cols),
        Body::Detail(detail) => render_detail(current_row + 1, border_row, detail, theme, cols),
        Body::Login(login) => render_login(current_row + 1, login, theme, cols),
        Body::Message(message) => render_empty_state(current_row + 3, message, theme, cols),
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Renders the list/favorites table with its optional chrome.
///
/// # Line Accounting
///
/// Criteria bar (1) and search bar (3) come before the column headers;
/// the view model already sized the row window for them.
fn render_table_body(row: usize, table: &TableInfo, theme: &Theme, cols: usize) {
    let mut current_row = row;

    if let Some(criteria) = &table.criteria {
        current_row = render_criteria_bar(current_row, criteria, theme, cols);
    }
    if let Some(search) = &table.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    let table_top = current_row;
    if let Some(empty) = &table.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, theme, cols);
        let _current_row = render_table_rows(current_row, &table.display_items, theme, cols);
    }

    if let Some(picker) = &table.picker {
        render_picker(table_top, 3, picker, theme, cols);
    }
}
