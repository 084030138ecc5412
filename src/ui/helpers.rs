//! Shared rendering utilities and helpers.
//!
//! Low-level rendering utilities used across multiple UI components: cursor
//! placement, search hit highlighting and width-aware padding.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` occupies, counting each char as one.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` chars.
#[must_use]
pub fn clip(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Renders text with highlighted byte ranges for search hits.
///
/// Highlighted sections use match highlight colors unless the item is
/// selected, in which case selection colors take precedence. Ranges that do
/// not fall on char boundaries are ignored.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let mut current_pos = 0;

    for &(start, end) in ranges {
        let end = end.min(text.len());
        if start < current_pos || start >= end {
            continue;
        }
        let (Some(before), Some(hit)) = (text.get(current_pos..start), text.get(start..end)) else {
            continue;
        };

        print!("{before}");
        print!("{}", Theme::fg(&theme.colors.match_fg));
        print!("{}", Theme::bg(&theme.colors.match_bg));
        print!("{hit}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text));

        current_pos = end;
    }

    if let Some(remaining) = text.get(current_pos..) {
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_respects_char_boundaries() {
        assert_eq!(clip("Åland Islands", 3), "Åla");
        assert_eq!(clip("Fiji", 10), "Fiji");
        assert_eq!(display_width("Côte d'Ivoire"), 13);
    }
}
