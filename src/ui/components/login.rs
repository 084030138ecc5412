//! Login form renderer.

use crate::ui::helpers::{clip, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoginInfo;

const FORM_MARGIN: usize = 5;

pub fn render_login(row: usize, login: &LoginInfo, theme: &Theme, cols: usize) {
    position_cursor(row, FORM_MARGIN + 1);
    print!("{}", Theme::fg(&theme.colors.text));
    print!("Log in to keep favorites under your name. Any address with '@' works.");
    print!("{}", Theme::reset());

    let inner_width = cols.saturating_sub(FORM_MARGIN * 2 + 2);
    let field = format!(" Email: {}█", login.email);
    let field = clip(&field, inner_width);

    position_cursor(row + 2, FORM_MARGIN + 1);
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("┌{}┐", "─".repeat(inner_width));
    position_cursor(row + 3, FORM_MARGIN + 1);
    print!("│{}{field}", Theme::fg(&theme.colors.text));
    print!("{}", " ".repeat(inner_width.saturating_sub(display_width(field))));
    print!("{}│", Theme::fg(&theme.colors.input_border));
    position_cursor(row + 4, FORM_MARGIN + 1);
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    if let Some(error) = &login.error {
        position_cursor(row + 6, FORM_MARGIN + 1);
        print!("{}{}{}", Theme::fg(theme.colors.error()), clip(error, inner_width), Theme::reset());
    }
}
