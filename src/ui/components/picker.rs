//! Selector dropdown renderer.
//!
//! Drawn as a bordered box over the table area: a filter line, then the
//! matching options with the highlighted one in selection colors.

use crate::ui::helpers::{clip, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PickerInfo;

const PICKER_WIDTH: usize = 44;

/// Renders the picker box with its top-left corner at (`row`, `col`).
pub fn render_picker(row: usize, col: usize, picker: &PickerInfo, theme: &Theme, cols: usize) {
    let width = PICKER_WIDTH.min(cols.saturating_sub(col + 1)).max(12);
    let inner = width - 2;

    let title = format!(" {} ({}) ", picker.title, picker.match_count);
    let title = clip(&title, inner);

    position_cursor(row, col);
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("┌{title}{}┐", "─".repeat(inner.saturating_sub(display_width(title))));

    let filter = format!(" Filter: {}█", picker.query);
    let filter = clip(&filter, inner);
    position_cursor(row + 1, col);
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text));
    print!("{filter}{}", " ".repeat(inner.saturating_sub(display_width(filter))));
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("│");

    let mut current_row = row + 2;
    if picker.options.is_empty() {
        let none = clip(" No matches", inner);
        position_cursor(current_row, col);
        print!("│{}{none}", Theme::fg(&theme.colors.text_dim));
        print!("{}", " ".repeat(inner.saturating_sub(display_width(none))));
        print!("{}│", Theme::fg(&theme.colors.input_border));
        current_row += 1;
    }
    for (label, is_selected) in &picker.options {
        let text = format!(" {label}");
        let text = clip(&text, inner);
        position_cursor(current_row, col);
        print!("│");
        if *is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text));
        }
        print!("{text}{}", " ".repeat(inner.saturating_sub(display_width(text))));
        print!("{}", Theme::reset());
        print!("{}│", Theme::fg(&theme.colors.input_border));
        current_row += 1;
    }

    position_cursor(current_row, col);
    print!("└{}┘", "─".repeat(inner));
    print!("{}", Theme::reset());
}
