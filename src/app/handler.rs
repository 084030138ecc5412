//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input and
//! host events, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (key presses, web responses,
//!    permission results)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Select`, `Back`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Mode Switching**: `SearchMode`, `OpenPicker`, `ShowFavorites`
//! - **Commands**: `ToggleFavorite`, `FavoritesControl`, `LoginLogout`, `ClearCriteria`
//! - **System**: `PermissionsResult`, `FetchCompleted`

use crate::app::modes::{InputMode, PickerKind, SearchFocus, View};
use crate::app::{Action, AppState};
use crate::domain::Result;
use crate::source::FetchKind;

/// Events triggered by user input or host responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor of the current view down (wraps to top).
    KeyDown,
    /// Moves the cursor of the current view up (wraps to bottom).
    KeyUp,
    /// Opens the highlighted country, picks the highlighted option, or
    /// submits the login form.
    Select,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results list (from typing mode).
    FocusResults,
    /// Leaves search mode, keeping the query.
    ExitSearch,
    /// Appends a character to whatever text input has focus.
    Char(char),
    /// Removes the last character from the focused text input.
    Backspace,
    /// Cancels the current mode, or goes back a view.
    Escape,
    /// Returns to the previous view.
    Back,
    /// Hides the plugin pane.
    CloseFocus,

    /// Adds or removes the selected country from favorites.
    ToggleFavorite,
    /// Opens a selector dropdown on the list view.
    OpenPicker(PickerKind),
    /// Flips favorites-only on the list view; elsewhere requests it for the
    /// next list visit and shows the favorites view.
    FavoritesControl,
    /// Shows the favorites view.
    ShowFavorites,
    /// Logs out, or opens the login view when logged out.
    LoginLogout,
    /// Resets every list criterion.
    ClearCriteria,

    /// Reports whether web access was granted.
    PermissionsResult {
        granted: bool,
    },

    /// A web request issued through [`Action::Fetch`] has answered.
    FetchCompleted {
        kind: FetchKind,
        status: u16,
        body: Vec<u8>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag tells the runtime whether a re-render is needed.
///
/// # Errors
///
/// Reserved for failures the plugin cannot recover from; every failure the
/// user can act on is turned into visible state instead.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event",
        event_type = ?event_name(event),
        view = state.view.name()
    )
    .entered();

    if !matches!(event, Event::FetchCompleted { .. } | Event::PermissionsResult { .. }) {
        state.notice = None;
    }

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Select => {
            if matches!(state.input_mode, InputMode::Picker(_)) {
                state.confirm_picker();
                return Ok((true, vec![]));
            }
            match &state.view {
                View::Login => Ok((true, state.submit_login())),
                View::Detail(_) => {
                    let border = state
                        .detail
                        .as_ref()
                        .and_then(|d| d.borders.get(d.selected_border))
                        .map(|b| b.id.clone());
                    let Some(code) = border else {
                        return Ok((false, vec![]));
                    };
                    tracing::debug!(code = %code, "opening border");
                    Ok((true, state.open_detail(&code)))
                }
                View::List | View::Favorites => {
                    let Some(code) = state.selected_country().map(|c| c.id().to_string()) else {
                        tracing::debug!("no country selected");
                        if state.input_mode == InputMode::Search(SearchFocus::Typing) {
                            state.input_mode = InputMode::Normal;
                            return Ok((true, vec![]));
                        }
                        return Ok((false, vec![]));
                    };
                    tracing::debug!(code = %code, "country selected");
                    Ok((true, state.open_detail(&code)))
                }
                View::NotFound => Ok((false, vec![])),
            }
        }
        Event::SearchMode => {
            if state.view != View::List {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.criteria.search.is_empty() {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.criteria.search, "exiting search mode");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.view == View::Login {
                state.login.email.push(*c);
                state.login.error = None;
                return Ok((true, vec![]));
            }
            match state.input_mode {
                InputMode::Picker(_) => {
                    state.picker_input(*c);
                    Ok((true, vec![]))
                }
                InputMode::Search(_) => {
                    state.criteria.search.push(*c);
                    tracing::trace!(query = %state.criteria.search, char = %c, "search query updated");
                    state.apply_criteria();
                    Ok((true, vec![]))
                }
                InputMode::Normal => Ok((false, vec![])),
            }
        }
        Event::Backspace => {
            if state.view == View::Login {
                state.login.email.pop();
                state.login.error = None;
                return Ok((true, vec![]));
            }
            match state.input_mode {
                InputMode::Picker(_) => {
                    state.picker_backspace();
                    Ok((true, vec![]))
                }
                InputMode::Search(_) => {
                    state.criteria.search.pop();
                    state.apply_criteria();
                    Ok((true, vec![]))
                }
                InputMode::Normal => Ok((false, vec![])),
            }
        }
        Event::Escape => match state.input_mode {
            InputMode::Picker(_) => {
                state.cancel_picker();
                Ok((true, vec![]))
            }
            InputMode::Search(_) => {
                state.input_mode = InputMode::Normal;
                Ok((true, vec![]))
            }
            InputMode::Normal if state.view == View::List => Ok((false, vec![Action::CloseFocus])),
            InputMode::Normal => Ok((true, state.back())),
        },
        Event::Back => {
            if state.view == View::List {
                return Ok((false, vec![]));
            }
            Ok((true, state.back()))
        }
        Event::ToggleFavorite => {
            let outcome = state.toggle_selected_favorite();
            tracing::debug!(outcome = ?outcome, "favorite toggled");
            Ok((outcome.is_some(), vec![]))
        }
        Event::OpenPicker(kind) => {
            if state.view != View::List {
                return Ok((false, vec![]));
            }
            state.open_picker(*kind);
            Ok((true, vec![]))
        }
        Event::FavoritesControl => {
            state.favorites_control();
            Ok((true, vec![]))
        }
        Event::ShowFavorites => {
            state.navigate(View::Favorites);
            Ok((true, vec![]))
        }
        Event::LoginLogout => {
            state.login_or_logout();
            Ok((true, vec![]))
        }
        Event::ClearCriteria => {
            if state.criteria.is_empty() {
                return Ok((false, vec![]));
            }
            tracing::debug!("clearing criteria");
            state.criteria.clear();
            state.input_mode = InputMode::Normal;
            state.apply_criteria();
            Ok((true, vec![]))
        }
        Event::PermissionsResult { granted } => {
            tracing::debug!(granted = granted, "permission result");
            if *granted {
                Ok((true, state.start_loading()))
            } else {
                state.permission_denied();
                Ok((true, vec![]))
            }
        }
        Event::FetchCompleted { kind, status, body } => Ok(state.apply_fetch(kind, *status, body)),
    }
}

/// Event name without payloads, for spans.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "key_down",
        Event::KeyUp => "key_up",
        Event::Select => "select",
        Event::SearchMode => "search_mode",
        Event::FocusSearchBar => "focus_search_bar",
        Event::FocusResults => "focus_results",
        Event::ExitSearch => "exit_search",
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::Escape => "escape",
        Event::Back => "back",
        Event::CloseFocus => "close_focus",
        Event::ToggleFavorite => "toggle_favorite",
        Event::OpenPicker(_) => "open_picker",
        Event::FavoritesControl => "favorites_control",
        Event::ShowFavorites => "show_favorites",
        Event::LoginLogout => "login_logout",
        Event::ClearCriteria => "clear_criteria",
        Event::PermissionsResult { .. } => "permissions_result",
        Event::FetchCompleted { .. } => "fetch_completed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FavoritesPolicy;
    use crate::test_support as fixtures;

    fn press(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    #[test]
    fn test_permission_grant_starts_loading_once() {
        let mut state = fixtures::state();
        let actions = press(&mut state, Event::PermissionsResult { granted: true });
        assert!(matches!(&actions[..], [Action::Fetch(r)] if r.kind == FetchKind::All));

        let again = press(&mut state, Event::PermissionsResult { granted: true });
        assert!(again.is_empty());
    }

    #[test]
    fn test_permission_denied_fails_load() {
        let mut state = fixtures::state();
        press(&mut state, Event::PermissionsResult { granted: false });
        assert!(matches!(state.load_status, crate::app::state::LoadStatus::Failed(_)));
    }

    #[test]
    fn test_catalog_failure_is_reported() {
        let mut state = fixtures::state();
        press(&mut state, Event::PermissionsResult { granted: true });
        press(
            &mut state,
            Event::FetchCompleted { kind: FetchKind::All, status: 500, body: vec![] },
        );
        assert!(matches!(state.load_status, crate::app::state::LoadStatus::Failed(_)));
        assert!(state.visible.is_empty());
    }

    #[test]
    fn test_search_narrows_and_escape_keeps_query() {
        let mut state = fixtures::loaded_state();
        press(&mut state, Event::SearchMode);
        for c in "fra".chars() {
            press(&mut state, Event::Char(c));
        }
        assert_eq!(state.visible.len(), 1);
        assert_eq!(state.visible[0].id(), "FRA");

        press(&mut state, Event::Escape);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.criteria.search, "fra");
        assert_eq!(state.visible.len(), 1);
    }

    #[test]
    fn test_chars_ignored_in_normal_mode() {
        let mut state = fixtures::loaded_state();
        let (render, _) = handle_event(&mut state, &Event::Char('z')).unwrap();
        assert!(!render);
        assert!(state.criteria.search.is_empty());
    }

    #[test]
    fn test_select_opens_detail_and_fetches() {
        let mut state = fixtures::loaded_state();
        let actions = press(&mut state, Event::Select);
        assert_eq!(state.view, View::Detail("FRA".to_string()));
        assert!(matches!(&actions[..], [Action::Fetch(r)] if r.url.ends_with("/alpha/FRA")));
        assert!(state.detail.as_ref().unwrap().loading);
    }

    #[test]
    fn test_detail_response_requests_border_names() {
        let mut state = fixtures::loaded_state();
        press(&mut state, Event::Select);
        let body = fixtures::country_json("FRA");
        let actions = press(
            &mut state,
            Event::FetchCompleted { kind: FetchKind::Detail("FRA".to_string()), status: 200, body },
        );
        let detail = state.detail.as_ref().unwrap();
        assert!(!detail.loading);
        assert_eq!(detail.borders.len(), 3);
        assert!(matches!(&actions[..], [Action::Fetch(r)] if r.kind == FetchKind::Borders("FRA".to_string())));
    }

    #[test]
    fn test_stale_detail_response_is_dropped() {
        let mut state = fixtures::loaded_state();
        press(&mut state, Event::Select);
        let (render, actions) = handle_event(
            &mut state,
            &Event::FetchCompleted {
                kind: FetchKind::Detail("DEU".to_string()),
                status: 404,
                body: vec![],
            },
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.view, View::Detail("FRA".to_string()));
    }

    #[test]
    fn test_missing_country_shows_not_found_and_back_returns() {
        let mut state = fixtures::loaded_state();
        press(&mut state, Event::Select);
        press(
            &mut state,
            Event::FetchCompleted {
                kind: FetchKind::Detail("FRA".to_string()),
                status: 404,
                body: br#"{"status":404,"message":"Not Found"}"#.to_vec(),
            },
        );
        assert_eq!(state.view, View::NotFound);

        press(&mut state, Event::Back);
        assert_eq!(state.view, View::List);
    }

    #[test]
    fn test_toggle_requires_login_under_policy() {
        let mut state = fixtures::loaded_state_with(FavoritesPolicy::RequireLogin);
        press(&mut state, Event::ToggleFavorite);
        assert_eq!(state.view, View::Login);
        assert_eq!(state.favorites.count(), 0);

        for c in "ann@example.com".chars() {
            press(&mut state, Event::Char(c));
        }
        press(&mut state, Event::Select);
        assert_eq!(state.view, View::List);
        assert!(state.sessions.cached().is_some());

        press(&mut state, Event::ToggleFavorite);
        assert!(state.favorites.is_favorite("FRA"));
    }

    #[test]
    fn test_invalid_email_stays_on_login() {
        let mut state = fixtures::loaded_state();
        press(&mut state, Event::LoginLogout);
        for c in "nobody".chars() {
            press(&mut state, Event::Char(c));
        }
        press(&mut state, Event::Select);
        assert_eq!(state.view, View::Login);
        assert!(state.login.error.is_some());
        assert!(state.sessions.cached().is_none());
    }

    #[test]
    fn test_favorites_control_hands_off_to_list() {
        let mut state = fixtures::loaded_state();
        state.selected_index = 6;
        press(&mut state, Event::ToggleFavorite);
        assert!(state.favorites.is_favorite("JPN"));

        press(&mut state, Event::Select);
        press(&mut state, Event::FavoritesControl);
        assert_eq!(state.view, View::Favorites);
        assert_eq!(state.favorite_rows.len(), 1);

        press(&mut state, Event::Escape);
        press(&mut state, Event::Escape);
        assert_eq!(state.view, View::List);
        assert!(state.criteria.favorites_only);
        assert_eq!(state.visible.len(), 1);

        press(&mut state, Event::FavoritesControl);
        assert!(!state.criteria.favorites_only);
        assert_eq!(state.visible.len(), 9);
    }

    #[test]
    fn test_picker_flow_filters_region() {
        let mut state = fixtures::loaded_state();
        press(&mut state, Event::OpenPicker(PickerKind::Region));
        for c in "euro".chars() {
            press(&mut state, Event::Char(c));
        }
        press(&mut state, Event::Select);
        assert_eq!(state.criteria.region.as_deref(), Some("Europe"));
        assert_eq!(state.visible.len(), 4);

        press(&mut state, Event::ClearCriteria);
        assert!(state.criteria.is_empty());
        assert_eq!(state.visible.len(), 9);
    }

    #[test]
    fn test_escape_on_list_closes() {
        let mut state = fixtures::loaded_state();
        assert_eq!(press(&mut state, Event::Escape), vec![Action::CloseFocus]);
    }
}
