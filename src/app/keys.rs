//! Keyboard mapping.
//!
//! Translates Zellij key presses into [`Event`]s. Which event a key produces
//! depends on the current view and input mode: text inputs (search, picker
//! filter, login email) swallow printable characters, everything else treats
//! them as commands.
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//!
//! Normal mode:
//! - `j`/`k`: Move down/up
//! - `Enter`: Open the highlighted country
//! - `Space`: Toggle favorite
//! - `/`: Search
//! - `r`/`l`/`c`/`o`: Region, language, currency and sort pickers
//! - `f`: Favorites-only on the list, favorites view elsewhere
//! - `F`: Favorites view
//! - `L`: Log in or out
//! - `x`: Clear criteria
//! - `b`: Back
//! - `Esc`: Close on the list, back elsewhere
//! - `q`: Close plugin

use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

use crate::app::handler::Event;
use crate::app::modes::{InputMode, PickerKind, SearchFocus, View};
use crate::app::AppState;

/// Maps a key press to an application event, or `None` to ignore it.
#[must_use]
pub fn map_key(state: &AppState, key: &KeyWithModifier) -> Option<Event> {
    tracing::debug!(bare_key = ?key.bare_key, mode = ?state.input_mode, "key event");

    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char('n') => Some(Event::KeyDown),
            BareKey::Char('p') => Some(Event::KeyUp),
            _ => None,
        };
    }

    match key.bare_key {
        BareKey::Down => return Some(Event::KeyDown),
        BareKey::Up => return Some(Event::KeyUp),
        BareKey::Backspace => return Some(Event::Backspace),
        _ => {}
    }

    if state.view == View::Login {
        return Some(match key.bare_key {
            BareKey::Enter => Event::Select,
            BareKey::Esc => Event::Escape,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        });
    }

    match state.input_mode {
        InputMode::Picker(_) => Some(match key.bare_key {
            BareKey::Enter => Event::Select,
            BareKey::Esc => Event::Escape,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        }),
        InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
            BareKey::Enter => Event::FocusResults,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        }),
        InputMode::Search(SearchFocus::Navigating) => Some(match key.bare_key {
            BareKey::Char('j') => Event::KeyDown,
            BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('/') => Event::FocusSearchBar,
            BareKey::Char(' ') => Event::ToggleFavorite,
            BareKey::Enter => Event::Select,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        }),
        InputMode::Normal => map_normal(key.bare_key),
    }
}

fn map_normal(key: BareKey) -> Option<Event> {
    Some(match key {
        BareKey::Char('j') => Event::KeyDown,
        BareKey::Char('k') => Event::KeyUp,
        BareKey::Enter => Event::Select,
        BareKey::Esc => Event::Escape,
        BareKey::Char(' ') => Event::ToggleFavorite,
        BareKey::Char('/') => Event::SearchMode,
        BareKey::Char('r') => Event::OpenPicker(PickerKind::Region),
        BareKey::Char('l') => Event::OpenPicker(PickerKind::Language),
        BareKey::Char('c') => Event::OpenPicker(PickerKind::Currency),
        BareKey::Char('o') => Event::OpenPicker(PickerKind::Sort),
        BareKey::Char('f') => Event::FavoritesControl,
        BareKey::Char('F') => Event::ShowFavorites,
        BareKey::Char('L') => Event::LoginLogout,
        BareKey::Char('x') => Event::ClearCriteria,
        BareKey::Char('b') => Event::Back,
        BareKey::Char('q') => Event::CloseFocus,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support as fixtures;

    fn key(c: char) -> KeyWithModifier {
        KeyWithModifier::new(BareKey::Char(c))
    }

    #[test]
    fn test_normal_mode_commands() {
        let state = fixtures::loaded_state();
        assert_eq!(map_key(&state, &key('j')), Some(Event::KeyDown));
        assert_eq!(map_key(&state, &key('r')), Some(Event::OpenPicker(PickerKind::Region)));
        assert_eq!(map_key(&state, &key('q')), Some(Event::CloseFocus));
        assert_eq!(map_key(&state, &key('z')), None);
    }

    #[test]
    fn test_ctrl_navigation_everywhere() {
        let mut state = fixtures::loaded_state();
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        let ctrl_n = KeyWithModifier::new(BareKey::Char('n')).with_ctrl_modifier();
        assert_eq!(map_key(&state, &ctrl_n), Some(Event::KeyDown));
    }

    #[test]
    fn test_text_inputs_take_characters() {
        let mut state = fixtures::loaded_state();
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        assert_eq!(map_key(&state, &key('q')), Some(Event::Char('q')));
        assert_eq!(
            map_key(&state, &KeyWithModifier::new(BareKey::Enter)),
            Some(Event::FocusResults)
        );

        state.input_mode = InputMode::Normal;
        state.view = View::Login;
        assert_eq!(map_key(&state, &key('j')), Some(Event::Char('j')));
    }
}
