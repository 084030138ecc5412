//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are optimized for rendering and contain pre-computed display
//! information like highlight ranges, formatted numbers and selection state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//! Header and footer are shared by every view; the [`Body`] varies.

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title, session status).
    pub header: HeaderInfo,

    /// Footer information (keybindings or a one-shot notice).
    pub footer: FooterInfo,

    /// The view-specific part of the screen.
    pub body: Body,
}

/// The part of the screen between header and footer.
#[derive(Debug, Clone)]
pub enum Body {
    /// Country table (list and favorites views).
    Table(TableInfo),
    /// Single-country detail page.
    Detail(DetailInfo),
    /// Login form.
    Login(LoginInfo),
    /// Centered message (not found, loading).
    Message(EmptyState),
}

/// A windowed country table with optional chrome.
#[derive(Debug, Clone)]
pub struct TableInfo {
    /// Active criteria summary; list view only.
    pub criteria: Option<CriteriaInfo>,

    /// Search bar, when search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Shown instead of the rows when set.
    pub empty_state: Option<EmptyState>,

    /// Open selector dropdown, drawn over the table.
    pub picker: Option<PickerInfo>,
}

/// Display information for a single country row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Common name, truncated to the NAME column.
    pub name: String,

    pub region: String,

    /// Population with thousands separators.
    pub population: String,

    /// Area in km² with thousands separators, or `N/A`.
    pub area: String,

    /// Whether this item is currently selected.
    pub is_selected: bool,

    /// Whether this country is a favorite.
    pub is_favorite: bool,

    /// Byte ranges of `name` to highlight (search hits).
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// Right-aligned status: favorites count and logged-in user.
    pub status: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text, or a notice replacing it.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No countries match").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,

    /// Drawn in the error color (load failure, not found).
    pub is_error: bool,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,

    /// Whether typed characters go to the query.
    pub focused: bool,
}

/// One-line summary of the list criteria.
#[derive(Debug, Clone)]
pub struct CriteriaInfo {
    pub search: String,
    /// Region, language, currency and sort, in that order.
    pub filters: Vec<CriteriaField>,
    pub favorites_only: bool,
    pub matched: usize,
    pub total: usize,
}

/// One selector in the criteria bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaField {
    pub name: &'static str,
    pub value: String,
    /// Whether the selector narrows or orders the list.
    pub active: bool,
}

/// A selector dropdown.
#[derive(Debug, Clone)]
pub struct PickerInfo {
    pub title: String,
    pub query: String,
    /// Visible option labels, with the highlighted one flagged.
    pub options: Vec<(String, bool)>,
    pub match_count: usize,
}

/// A country's detail page.
#[derive(Debug, Clone)]
pub struct DetailInfo {
    pub title: String,
    pub code: String,
    pub is_favorite: bool,
    /// Whether the full record is still being read.
    pub loading: bool,
    /// Label/value pairs in display order.
    pub fields: Vec<(&'static str, String)>,
    pub borders: Vec<BorderItem>,
    pub borders_loading: bool,
}

#[derive(Debug, Clone)]
pub struct BorderItem {
    pub name: String,
    pub is_selected: bool,
}

/// The login form.
#[derive(Debug, Clone)]
pub struct LoginInfo {
    pub email: String,
    pub error: Option<String>,
}
