//! Colors for the country browser.
//!
//! A theme is a named set of hex colors, one per thing the plugin draws: the
//! header, the country table and its selection, search hits, the favorite
//! star, the criteria bar, input boxes (search, picker, login), detail-page
//! labels and error messages. Four Catppuccin flavors are compiled in; any
//! other palette can be loaded from a TOML file with the `theme_file` option.
//!
//! ```toml
//! name = "nord"
//!
//! [colors]
//! header_fg = "#eceff4"
//! text = "#d8dee9"
//! text_dim = "#4c566a"
//! border = "#3b4252"
//! input_border = "#88c0d0"
//! selection_fg = "#2e3440"
//! selection_bg = "#88c0d0"
//! match_fg = "#2e3440"
//! match_bg = "#ebcb8b"
//! message_fg = "#81a1c1"
//! favorite_fg = "#bf616a"
//!
//! # optional
//! header_bg = "#2e3440"
//! label_fg = "#81a1c1"
//! criterion_fg = "#a3be8c"
//! error_fg = "#bf616a"
//! ```
//!
//! The optional slots fall back to a related required one (see the
//! accessors on [`ThemeColors`]). Files written for the older slot names
//! (`text_normal`, `search_bar_border`, `match_highlight_*`,
//! `empty_state_fg`) still load.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::ZatlasError;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

const BUILTIN: [(&str, &str); 4] = [
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
    ("catppuccin-frappe", include_str!("../../themes/catppuccin-frappe.toml")),
    ("catppuccin-macchiato", include_str!("../../themes/catppuccin-macchiato.toml")),
];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every drawn element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Plugin title, table column titles, detail page title.
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Body text: table rows, detail values, typed input.
    #[serde(alias = "text_normal")]
    pub text: String,
    /// Secondary text: footer hints, placeholders, inactive criteria.
    pub text_dim: String,

    /// Horizontal rules around the table.
    pub border: String,
    /// Frames of the search box, the selector picker and the login field.
    #[serde(alias = "search_bar_border")]
    pub input_border: String,

    /// Highlighted table row, picker option and border chip.
    pub selection_fg: String,
    pub selection_bg: String,

    /// Search hits inside country names.
    #[serde(alias = "match_highlight_fg")]
    pub match_fg: String,
    #[serde(alias = "match_highlight_bg")]
    pub match_bg: String,

    /// Loading, no-results and empty-favorites messages.
    #[serde(alias = "empty_state_fg")]
    pub message_fg: String,

    /// The ★ marker on favorited countries.
    #[serde(default = "default_favorite_fg")]
    pub favorite_fg: String,

    /// Field names on the detail page and criteria names. Defaults to `text_dim`.
    #[serde(default)]
    pub label_fg: Option<String>,
    /// Criteria values that narrow the list. Defaults to `text`.
    #[serde(default)]
    pub criterion_fg: Option<String>,
    /// Load failures, not-found and login errors. Defaults to `favorite_fg`.
    #[serde(default)]
    pub error_fg: Option<String>,
}

fn default_favorite_fg() -> String {
    "#f38ba8".to_string()
}

impl ThemeColors {
    #[must_use]
    pub fn label(&self) -> &str {
        self.label_fg.as_deref().unwrap_or(&self.text_dim)
    }

    #[must_use]
    pub fn criterion(&self) -> &str {
        self.criterion_fg.as_deref().unwrap_or(&self.text)
    }

    #[must_use]
    pub fn error(&self) -> &str {
        self.error_fg.as_deref().unwrap_or(&self.favorite_fg)
    }
}

impl Theme {
    /// Looks up a built-in theme. `None` for unknown names.
    ///
    /// ```rust
    /// use zatlas::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-latte").unwrap().name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, source) = BUILTIN.iter().find(|(builtin, _)| *builtin == name)?;
        match toml::from_str(source) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(theme = name, error = %e, "built-in theme does not parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// [`ZatlasError::Theme`] when the file cannot be read or is not a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ZatlasError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ZatlasError::Theme(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| ZatlasError::Theme(format!("invalid theme {}: {e}", path.display())))
    }

    /// Foreground SGR sequence for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        sgr(38, hex)
    }

    /// Background SGR sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        sgr(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

/// 24-bit color escape; unparseable colors render white.
fn sgr(plane: u8, hex: &str) -> String {
    let (r, g, b) = rgb(hex).unwrap_or((255, 255, 255));
    format!("\u{001b}[{plane};2;{r};{g};{b}m")
}

fn rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    let packed = u32::from_str_radix(digits, 16).ok()?;
    let [_, r, g, b] = packed.to_be_bytes();
    Some((r, g, b))
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: "#cdd6f4".to_string(),
                header_bg: None,
                text: "#cdd6f4".to_string(),
                text_dim: "#6c7086".to_string(),
                border: "#45475a".to_string(),
                input_border: "#f5c2e7".to_string(),
                selection_fg: "#1e1e2e".to_string(),
                selection_bg: "#f5c2e7".to_string(),
                match_fg: "#1e1e2e".to_string(),
                match_bg: "#f9e2af".to_string(),
                message_fg: "#89b4fa".to_string(),
                favorite_fg: default_favorite_fg(),
                label_fg: None,
                criterion_fg: None,
                error_fg: None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn theme_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_builtin_themes_parse() {
        for (name, _) in BUILTIN {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
            assert!(theme.colors.label_fg.is_some(), "{name} sets label_fg");
            assert!(theme.colors.criterion_fg.is_some(), "{name} sets criterion_fg");
            assert!(theme.colors.error_fg.is_some(), "{name} sets error_fg");
        }
    }

    #[test]
    fn test_optional_slots_fall_back() {
        let file = theme_file(
            r##"name = "plain"
[colors]
header_fg = "#ffffff"
text = "#eeeeee"
text_dim = "#777777"
border = "#333333"
input_border = "#00ffff"
selection_fg = "#000000"
selection_bg = "#00ffff"
match_fg = "#000000"
match_bg = "#ffff00"
message_fg = "#0000ff"
"##,
        );
        let colors = Theme::from_file(file.path()).unwrap().colors;
        assert_eq!(colors.favorite_fg, "#f38ba8");
        assert_eq!(colors.label(), "#777777");
        assert_eq!(colors.criterion(), "#eeeeee");
        assert_eq!(colors.error(), "#f38ba8");
    }

    #[test]
    fn test_older_slot_names_load() {
        let file = theme_file(
            r##"name = "legacy"
[colors]
header_fg = "#cdd6f4"
selection_fg = "#1e1e2e"
selection_bg = "#f5c2e7"
text_normal = "#cdd6f4"
text_dim = "#6c7086"
border = "#45475a"
search_bar_border = "#f5c2e7"
match_highlight_fg = "#1e1e2e"
match_highlight_bg = "#f9e2af"
empty_state_fg = "#89b4fa"
"##,
        );
        let colors = Theme::from_file(file.path()).unwrap().colors;
        assert_eq!(colors.text, "#cdd6f4");
        assert_eq!(colors.input_border, "#f5c2e7");
        assert_eq!(colors.message_fg, "#89b4fa");
    }

    #[test]
    fn test_from_file_errors() {
        let missing = Theme::from_file("/nonexistent/theme.toml").unwrap_err();
        assert!(matches!(missing, ZatlasError::Theme(_)));

        let file = theme_file("name = 3");
        assert!(matches!(Theme::from_file(file.path()), Err(ZatlasError::Theme(_))));
    }

    #[test]
    fn test_color_sequences() {
        assert_eq!(rgb("#f38ba8"), Some((243, 139, 168)));
        assert_eq!(rgb("nope"), None);
        assert_eq!(rgb("#12345g"), None);
        assert_eq!(Theme::fg("#000000"), "\u{001b}[38;2;0;0;0m");
        assert_eq!(Theme::bg("oops"), "\u{001b}[48;2;255;255;255m");
    }
}
