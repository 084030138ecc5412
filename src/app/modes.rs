//! View and input mode state types for the application.
//!
//! These types determine which screen is shown, which keybindings are
//! active and where typed characters go.
//!
//! # State Machine
//!
//! The plugin shows one [`View`] at a time. Within the list view the user is
//! in one of three input modes:
//! - **Normal**: navigation and commands
//! - **Search**: editing the search string, or navigating the results of it
//! - **Picker**: choosing a region, language, currency or sort from a
//!   searchable dropdown
//!
//! The login view always takes text input.

/// The screen currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Filterable country list.
    List,
    /// Detail page of the country with this identifier.
    Detail(String),
    /// Favorited countries, in the order they were added.
    Favorites,
    /// Mock login form.
    Login,
    /// Shown when a country read comes back empty or fails.
    NotFound,
}

impl View {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail(_) => "detail",
            Self::Favorites => "favorites",
            Self::Login => "login",
            Self::NotFound => "not_found",
        }
    }
}

/// Focus state within search mode.
///
/// Determines whether search input is being typed or search results are being
/// navigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Typed characters edit the search string.
    Typing,

    /// j/k move through the results; `/` returns to typing.
    Navigating,
}

/// Which criterion a picker edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Region,
    Language,
    Currency,
    Sort,
}

impl PickerKind {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Region => "Region",
            Self::Language => "Language",
            Self::Currency => "Currency",
            Self::Sort => "Sort by",
        }
    }
}

/// Current input handling mode of the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),

    /// A selector dropdown is open.
    Picker(PickerKind),
}
