//! Country detail page renderer.

use crate::ui::helpers::{clip, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const LABEL_WIDTH: usize = 16;

/// Renders the detail page from `row` down, stopping before `last_row`.
pub fn render_detail(row: usize, last_row: usize, detail: &DetailInfo, theme: &Theme, cols: usize) {
    let mut current_row = row;

    position_cursor(current_row, 1);
    print!("{}", Theme::bold());
    if detail.is_favorite {
        print!("{}★ ", Theme::fg(&theme.colors.favorite_fg));
    }
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{} ({})", detail.title, detail.code);
    print!("{}", Theme::reset());
    if detail.loading {
        print!("{}  loading details...{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }
    current_row += 2;

    let value_width = cols.saturating_sub(LABEL_WIDTH + 1);
    for (label, value) in &detail.fields {
        if current_row >= last_row {
            return;
        }
        position_cursor(current_row, 1);
        print!("{}{:<LABEL_WIDTH$}{}", Theme::fg(theme.colors.label()), label, Theme::reset());
        print!("{}{}{}", Theme::fg(&theme.colors.text), clip(value, value_width), Theme::reset());
        current_row += 1;
    }

    current_row += 1;
    if current_row >= last_row {
        return;
    }
    position_cursor(current_row, 1);
    print!("{}{}Border countries{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset());
    current_row += 1;

    if detail.borders.is_empty() {
        position_cursor(current_row, 1);
        let text = if detail.borders_loading { "  loading..." } else { "  None" };
        print!("{}{text}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        return;
    }

    let mut col = 1;
    for border in &detail.borders {
        let chip = format!(" {} ", border.name);
        let width = display_width(&chip) + 1;
        if col + width > cols {
            current_row += 1;
            col = 1;
        }
        if current_row >= last_row {
            return;
        }
        position_cursor(current_row, col);
        if border.is_selected {
            print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text));
        }
        print!("{chip}{}", Theme::reset());
        col += width;
    }
}
