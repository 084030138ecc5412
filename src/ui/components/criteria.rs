//! Criteria bar renderer.
//!
//! One line above the table summarizing what narrows the list, with the
//! match count on the right. Selectors that are in effect stand out in the
//! criterion color; the rest stay dim.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CriteriaInfo;

pub fn render_criteria_bar(row: usize, criteria: &CriteriaInfo, theme: &Theme, cols: usize) -> usize {
    let count = format!("{}/{} ", criteria.matched, criteria.total);
    let mut room = cols.saturating_sub(display_width(&count) + 1);

    let mut segments: Vec<(&str, String, bool)> = criteria
        .filters
        .iter()
        .map(|f| (f.name, f.value.clone(), f.active))
        .collect();
    if !criteria.search.is_empty() {
        segments.push(("Search", format!("\"{}\"", criteria.search), true));
    }
    if criteria.favorites_only {
        segments.push(("★", "only".to_string(), true));
    }

    position_cursor(row, 1);
    print!(" ");
    room = room.saturating_sub(1);
    for (name, value, active) in &segments {
        let label = format!("{name}: ");
        let width = display_width(&label) + display_width(value) + 2;
        if width > room {
            break;
        }
        let value_color = if *active {
            theme.colors.criterion()
        } else {
            &theme.colors.text_dim
        };
        print!(
            "{}{label}{}{value}{}  ",
            Theme::fg(theme.colors.label()),
            Theme::fg(value_color),
            Theme::reset()
        );
        room -= width;
    }

    print!("{}", " ".repeat(room));
    print!("{}{count}{}", Theme::fg(&theme.colors.text), Theme::reset());
    row + 1
}
