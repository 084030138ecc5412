//! Table component renderer.
//!
//! This module renders countries as a table with NAME, REGION, POPULATION
//! and AREA columns. It supports selection highlighting, search hit
//! highlighting and a favorite marker.

use crate::app::state::name_column_width;
use crate::ui::helpers::{self, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const MARKER_WIDTH: usize = 2;
const REGION_WIDTH: usize = 10;
const POPULATION_WIDTH: usize = 15;
const AREA_WIDTH: usize = 16;

/// Renders the table column headers at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let name_width = name_column_width(cols) + 2;
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{:MARKER_WIDTH$}{:<name_width$}{:<REGION_WIDTH$}{:>POPULATION_WIDTH$}{:>AREA_WIDTH$}",
        "", "NAME", "REGION", "POPULATION", "AREA (km²)"
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single table row at the specified row position.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Search hit highlights (unless selected)
/// 3. Normal text color
///
/// The row is padded to fill the entire terminal width to ensure consistent
/// selection background rendering.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let name_width = name_column_width(cols) + 2;
    let base_fg = if item.is_selected {
        &theme.colors.selection_fg
    } else {
        &theme.colors.text
    };

    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }

    if item.is_favorite {
        print!("{}", Theme::fg(&theme.colors.favorite_fg));
        print!("★ ");
    } else {
        print!("{}", " ".repeat(MARKER_WIDTH));
    }
    print!("{}", Theme::fg(base_fg));

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(name_width.saturating_sub(display_width(&item.name))));

    print!(
        "{:<REGION_WIDTH$}{:>POPULATION_WIDTH$}{:>AREA_WIDTH$}",
        item.region, item.population, item.area
    );

    let line_len = MARKER_WIDTH + name_width + REGION_WIDTH + POPULATION_WIDTH + AREA_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
