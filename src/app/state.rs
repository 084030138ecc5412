//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with methods for navigation, selection management, criteria handling
//! and UI view model generation. It is the single owner of the catalog, the
//! stores and all transient UI state.
//!
//! # Architecture
//!
//! `AppState` separates core data (the catalog held by the data source, the
//! favorites and session stores) from derived state (the visible list, the
//! favorites rows, selection indices). Derived state is recomputed by
//! [`AppState::apply_criteria`] and [`AppState::refresh_favorites`] whenever
//! an input changes. View models are computed on demand from state snapshots.
//!
//! # Navigation
//!
//! Views form a simple back stack: [`AppState::navigate`] pushes the current
//! view, [`AppState::back`] pops it. Arriving at the list view consumes the
//! durable "show favorites only" flag.

use std::collections::HashMap;

use crate::app::modes::{InputMode, PickerKind, SearchFocus, View};
use crate::app::Action;
use crate::domain::{Country, SortDirective, ZatlasError};
use crate::pipeline::{self, SelectOption};
use crate::source::{CountrySource, FetchKind};
use crate::store::{FavoritesStore, SessionStore, ToggleOutcome};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, BorderItem, CriteriaField, CriteriaInfo, DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo,
    LoginInfo, PickerInfo, SearchBarInfo, TableInfo, UIViewModel,
};

/// Progress of the initial catalog read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Waiting for the web access permission.
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// A bordering country on the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderEntry {
    pub id: String,
    pub name: String,
}

/// State of the open detail page.
#[derive(Debug, Clone)]
pub struct DetailState {
    /// Identifier the page was opened for; responses for other codes are stale.
    pub code: String,
    /// Catalog record at first, replaced by the full record once it arrives.
    pub country: Option<Country>,
    pub loading: bool,
    pub borders: Vec<BorderEntry>,
    pub borders_loading: bool,
    pub selected_border: usize,
}

/// An open selector dropdown.
#[derive(Debug, Clone)]
pub struct PickerState {
    pub kind: PickerKind,
    pub options: Vec<SelectOption>,
    pub query: String,
    /// Indices into `options` matching `query`.
    pub matches: Vec<usize>,
    /// Index into `matches`.
    pub selected: usize,
}

impl PickerState {
    fn new(kind: PickerKind, options: Vec<SelectOption>, current: Option<&str>) -> Self {
        let matches: Vec<usize> = (0..options.len()).collect();
        let selected = options
            .iter()
            .position(|o| o.value.as_deref() == current)
            .unwrap_or(0);
        Self {
            kind,
            options,
            query: String::new(),
            matches,
            selected,
        }
    }

    fn refilter(&mut self) {
        self.matches = pipeline::filter_options(&self.options, &self.query);
        // Typing highlights the first real match rather than the "any" entry.
        self.selected = if self.query.trim().is_empty() {
            0
        } else {
            self.matches
                .iter()
                .position(|&idx| self.options.get(idx).is_some_and(|o| o.value.is_some()))
                .unwrap_or(0)
        };
    }

    /// The highlighted option, if any.
    #[must_use]
    pub fn current(&self) -> Option<&SelectOption> {
        self.matches.get(self.selected).and_then(|&idx| self.options.get(idx))
    }
}

/// The login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub error: Option<String>,
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input and host events.
#[derive(Debug)]
pub struct AppState {
    /// Data source adapter; owns the catalog.
    pub source: CountrySource,

    pub favorites: FavoritesStore,

    pub sessions: SessionStore,

    /// Criteria of the list view.
    pub criteria: crate::domain::FilterCriteria,

    /// Countries matching `criteria`, in display order.
    pub visible: Vec<Country>,

    /// Zero-based index of the selected row within `visible`.
    pub selected_index: usize,

    /// Favorites resolved against the catalog, for the favorites view.
    pub favorite_rows: Vec<Country>,

    pub favorites_index: usize,

    pub view: View,

    /// Views to return to, most recent last.
    pub history: Vec<View>,

    /// Current input handling mode of the list view.
    pub input_mode: InputMode,

    pub picker: Option<PickerState>,

    pub detail: Option<DetailState>,

    /// Detail pages left for another page, by code. Restored by
    /// [`AppState::back`], since catalog records lack the detail fields.
    pub visited_details: HashMap<String, DetailState>,

    pub login: LoginForm,

    pub load_status: LoadStatus,

    /// One-shot message shown in the footer until the next key press.
    pub notice: Option<String>,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates the application state from its injected parts.
    ///
    /// Rehydrates the session right away so the favorites store knows its
    /// owner before the first toggle.
    #[must_use]
    pub fn new(
        source: CountrySource,
        mut favorites: FavoritesStore,
        mut sessions: SessionStore,
        theme: Theme,
    ) -> Self {
        let owner = sessions.current().map(|s| s.email.clone());
        favorites.bind_owner(owner.as_deref());

        let mut state = Self {
            source,
            favorites,
            sessions,
            criteria: crate::domain::FilterCriteria::default(),
            visible: vec![],
            selected_index: 0,
            favorite_rows: vec![],
            favorites_index: 0,
            view: View::List,
            history: vec![],
            input_mode: InputMode::Normal,
            picker: None,
            detail: None,
            visited_details: HashMap::new(),
            login: LoginForm::default(),
            load_status: LoadStatus::Idle,
            notice: None,
            theme,
        };
        state.activate_list();
        state
    }

    /// Re-runs the pipeline over the catalog and clamps the selection.
    pub fn apply_criteria(&mut self) {
        let _span = tracing::debug_span!("apply_criteria",
            total = self.source.catalog().len(),
            favorites = self.favorites.count()
        )
        .entered();

        self.visible = pipeline::derive(self.source.catalog(), &self.criteria, &self.favorites);
        self.selected_index = clamp(self.selected_index, self.visible.len());
    }

    /// Re-resolves the favorites rows and clamps their selection.
    pub fn refresh_favorites(&mut self) {
        self.favorite_rows = self.favorites.list(self.source.catalog());
        self.favorites_index = clamp(self.favorites_index, self.favorite_rows.len());
    }

    /// Moves the cursor of the current view down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if let (InputMode::Picker(_), Some(picker)) = (self.input_mode, self.picker.as_mut()) {
            picker.selected = wrap_down(picker.selected, picker.matches.len());
            return;
        }
        match self.view {
            View::List => self.selected_index = wrap_down(self.selected_index, self.visible.len()),
            View::Favorites => {
                self.favorites_index = wrap_down(self.favorites_index, self.favorite_rows.len());
            }
            View::Detail(_) => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.selected_border = wrap_down(detail.selected_border, detail.borders.len());
                }
            }
            View::Login | View::NotFound => {}
        }
    }

    /// Moves the cursor of the current view up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if let (InputMode::Picker(_), Some(picker)) = (self.input_mode, self.picker.as_mut()) {
            picker.selected = wrap_up(picker.selected, picker.matches.len());
            return;
        }
        match self.view {
            View::List => self.selected_index = wrap_up(self.selected_index, self.visible.len()),
            View::Favorites => {
                self.favorites_index = wrap_up(self.favorites_index, self.favorite_rows.len());
            }
            View::Detail(_) => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.selected_border = wrap_up(detail.selected_border, detail.borders.len());
                }
            }
            View::Login | View::NotFound => {}
        }
    }

    /// The country under the cursor in the list or favorites view, or the
    /// country of the detail page.
    #[must_use]
    pub fn selected_country(&self) -> Option<&Country> {
        match self.view {
            View::List => self.visible.get(self.selected_index),
            View::Favorites => self.favorite_rows.get(self.favorites_index),
            View::Detail(_) => self.detail.as_ref().and_then(|d| d.country.as_ref()),
            View::Login | View::NotFound => None,
        }
    }

    /// Shows `view`, remembering the current one for [`AppState::back`].
    pub fn navigate(&mut self, view: View) {
        if self.view == view {
            return;
        }
        tracing::debug!(from = self.view.name(), to = view.name(), "navigate");
        let previous = std::mem::replace(&mut self.view, view);
        self.history.push(previous);
        self.input_mode = InputMode::Normal;
        self.picker = None;
        self.on_enter();
    }

    /// Returns to the previous view, or the list when there is none.
    ///
    /// Going back to an earlier detail page restores it as it was left and
    /// re-issues whatever read was still outstanding then.
    pub fn back(&mut self) -> Vec<Action> {
        let previous = self.history.pop().unwrap_or(View::List);
        tracing::debug!(from = self.view.name(), to = previous.name(), "back");
        if self.view != previous {
            if let View::Detail(_) = self.view {
                self.stash_detail();
            }
        }
        self.view = previous;
        self.input_mode = InputMode::Normal;
        self.picker = None;
        if let View::Detail(code) = &self.view {
            let code = code.clone();
            return self.restore_detail(&code);
        }
        self.on_enter();
        vec![]
    }

    /// Remembers the open detail page if its full record has arrived.
    fn stash_detail(&mut self) {
        if let Some(detail) = self.detail.take() {
            if detail.loading {
                return;
            }
            self.visited_details.insert(detail.code.clone(), detail);
        }
    }

    fn restore_detail(&mut self, code: &str) -> Vec<Action> {
        if self.detail.as_ref().is_some_and(|d| d.code == code) {
            return vec![];
        }
        if let Some(mut detail) = self.visited_details.remove(code) {
            tracing::debug!(code = %code, "restoring detail page");
            let follow_up = if detail.borders_loading {
                let ids: Vec<String> = detail.borders.iter().map(|b| b.id.clone()).collect();
                self.source.request_by_ids(code, &ids)
            } else {
                None
            };
            detail.borders_loading = follow_up.is_some();
            self.detail = Some(detail);
            return follow_up.map(Action::Fetch).into_iter().collect();
        }

        tracing::debug!(code = %code, "detail page not remembered, reading it again");
        let mut detail = self.new_detail(code.to_string());
        match self.source.request_by_code(code) {
            Ok(request) => {
                detail.loading = true;
                self.detail = Some(detail);
                vec![Action::Fetch(request)]
            }
            Err(e) => {
                tracing::debug!(error = %e, "cannot re-read detail");
                self.detail = Some(detail);
                vec![]
            }
        }
    }

    fn on_enter(&mut self) {
        match &self.view {
            View::List => self.activate_list(),
            View::Favorites => self.refresh_favorites(),
            View::Detail(_) => {}
            View::Login => {
                self.login = LoginForm::default();
            }
            View::NotFound => {}
        }
    }

    fn activate_list(&mut self) {
        if self.sessions.take_favorites_only() {
            tracing::debug!("applying favorites-only hand-off");
            self.criteria.favorites_only = true;
        }
        self.apply_criteria();
    }

    fn new_detail(&self, code: String) -> DetailState {
        let country = self.source.find(&code).cloned();
        let borders = country
            .as_ref()
            .map(|c| c.borders.iter().map(|id| self.border_entry(id)).collect())
            .unwrap_or_default();
        DetailState {
            code,
            country,
            loading: false,
            borders,
            borders_loading: false,
            selected_border: 0,
        }
    }

    fn border_entry(&self, id: &str) -> BorderEntry {
        BorderEntry {
            id: id.to_string(),
            name: self
                .source
                .find(id)
                .map_or_else(|| id.to_string(), |c| c.common_name().to_string()),
        }
    }

    /// Opens the detail page for `code` and returns the read for its full record.
    pub fn open_detail(&mut self, code: &str) -> Vec<Action> {
        let request = match self.source.request_by_code(code) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "cannot open detail");
                self.navigate(View::NotFound);
                return vec![];
            }
        };
        let Some(code) = request.kind.code().map(str::to_string) else {
            return vec![];
        };

        if self.view != View::Detail(code.clone()) {
            self.stash_detail();
        }
        self.visited_details.remove(&code);
        let mut detail = self.new_detail(code.clone());
        detail.loading = true;
        self.detail = Some(detail);
        self.navigate(View::Detail(code));
        vec![Action::Fetch(request)]
    }

    /// Toggles the favorite flag of the selected country.
    ///
    /// Routes to the login view when the store refuses.
    pub fn toggle_selected_favorite(&mut self) -> Option<ToggleOutcome> {
        let id = self.selected_country()?.id().to_string();
        let outcome = self.favorites.toggle(&id);
        match outcome {
            ToggleOutcome::LoginRequired => {
                self.navigate(View::Login);
                self.notice = Some("Log in to save favorites".to_string());
            }
            ToggleOutcome::Added | ToggleOutcome::Removed => {
                self.apply_criteria();
                self.refresh_favorites();
            }
        }
        Some(outcome)
    }

    /// The favorites control.
    ///
    /// On the list view it flips the favorites-only criterion. Anywhere else
    /// it leaves the flag for the next list activation and shows the
    /// favorites view.
    pub fn favorites_control(&mut self) {
        if self.view == View::List {
            self.criteria.favorites_only = !self.criteria.favorites_only;
            self.apply_criteria();
        } else {
            self.sessions.request_favorites_only();
            self.navigate(View::Favorites);
        }
    }

    /// Logs out when logged in, otherwise opens the login view.
    pub fn login_or_logout(&mut self) {
        if self.sessions.cached().is_some() {
            if let Err(e) = self.sessions.logout() {
                tracing::warn!(error = %e, "failed to clear stored session");
            }
            self.favorites.bind_owner(None);
            self.apply_criteria();
            self.refresh_favorites();
            self.notice = Some("Logged out".to_string());
        } else {
            self.navigate(View::Login);
        }
    }

    /// Submits the login form, returning to the previous view on success.
    pub fn submit_login(&mut self) -> Vec<Action> {
        match self.sessions.login(&self.login.email) {
            Ok(record) => {
                self.favorites.bind_owner(Some(&record.email));
                let actions = self.back();
                self.notice = Some(format!("Logged in as {}", record.email));
                actions
            }
            Err(ZatlasError::Validation(_)) => {
                self.login.error = Some("Enter an email address containing '@'".to_string());
                vec![]
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                self.login.error = Some(format!("Login failed: {e}"));
                vec![]
            }
        }
    }

    /// Opens the picker for `kind`, preselecting the current value.
    pub fn open_picker(&mut self, kind: PickerKind) {
        let catalog = self.source.catalog();
        let (options, current) = match kind {
            PickerKind::Region => (pipeline::region_options(), self.criteria.region.clone()),
            PickerKind::Language => (pipeline::language_options(catalog), self.criteria.language.clone()),
            PickerKind::Currency => (pipeline::currency_options(catalog), self.criteria.currency.clone()),
            PickerKind::Sort => (
                pipeline::sort_options(),
                (self.criteria.sort != SortDirective::None).then(|| self.criteria.sort.as_str().to_string()),
            ),
        };
        tracing::debug!(kind = ?kind, options = options.len(), "picker opened");
        self.picker = Some(PickerState::new(kind, options, current.as_deref()));
        self.input_mode = InputMode::Picker(kind);
    }

    pub fn picker_input(&mut self, c: char) {
        if let Some(picker) = self.picker.as_mut() {
            picker.query.push(c);
            picker.refilter();
        }
    }

    pub fn picker_backspace(&mut self) {
        if let Some(picker) = self.picker.as_mut() {
            picker.query.pop();
            picker.refilter();
        }
    }

    /// Applies the highlighted option and closes the picker.
    pub fn confirm_picker(&mut self) {
        let Some(picker) = self.picker.take() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        self.input_mode = InputMode::Normal;
        let Some(choice) = picker.current() else {
            return;
        };
        let value = choice.value.clone();
        tracing::debug!(kind = ?picker.kind, value = ?value, "picker confirmed");
        match picker.kind {
            PickerKind::Region => self.criteria.region = value,
            PickerKind::Language => self.criteria.language = value,
            PickerKind::Currency => self.criteria.currency = value,
            PickerKind::Sort => {
                self.criteria.sort = value.as_deref().map_or(SortDirective::None, SortDirective::parse);
            }
        }
        self.apply_criteria();
    }

    pub fn cancel_picker(&mut self) {
        self.picker = None;
        self.input_mode = InputMode::Normal;
    }

    /// Starts the catalog read.
    pub fn start_loading(&mut self) -> Vec<Action> {
        if self.load_status == LoadStatus::Loading || self.load_status == LoadStatus::Loaded {
            return vec![];
        }
        self.load_status = LoadStatus::Loading;
        vec![Action::Fetch(self.source.request_all())]
    }

    /// Applies a completed read. Returns the follow-up actions and whether
    /// anything visible changed.
    pub fn apply_fetch(&mut self, kind: &FetchKind, status: u16, body: &[u8]) -> (bool, Vec<Action>) {
        if let Some(code) = kind.code() {
            let current = self.detail.as_ref().map(|d| d.code.as_str());
            if current != Some(code) {
                tracing::debug!(code = %code, current = ?current, "dropping stale response");
                return (false, vec![]);
            }
        }

        let result = self.source.complete(kind, status, body);
        match kind {
            FetchKind::All => {
                match result {
                    Ok(_) => {
                        self.load_status = LoadStatus::Loaded;
                        self.apply_criteria();
                        self.refresh_favorites();
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "catalog read failed");
                        self.load_status = LoadStatus::Failed(e.to_string());
                    }
                }
                (true, vec![])
            }
            FetchKind::Detail(code) => match result {
                Ok(mut countries) => {
                    let country = countries.swap_remove(0);
                    let borders: Vec<BorderEntry> =
                        country.borders.iter().map(|id| self.border_entry(id)).collect();
                    let follow_up = self.source.request_by_ids(code, &country.borders);
                    if let Some(detail) = self.detail.as_mut() {
                        detail.loading = false;
                        detail.borders = borders;
                        detail.borders_loading = follow_up.is_some();
                        detail.selected_border = 0;
                        detail.country = Some(country);
                    }
                    (true, follow_up.map(Action::Fetch).into_iter().collect())
                }
                Err(e) => {
                    tracing::debug!(error = %e, "detail read failed");
                    self.detail = None;
                    self.replace_view(View::NotFound);
                    (true, vec![])
                }
            },
            FetchKind::Borders(_) => {
                let Some(detail) = self.detail.as_mut() else {
                    return (false, vec![]);
                };
                detail.borders_loading = false;
                match result {
                    Ok(countries) => {
                        for entry in &mut detail.borders {
                            if let Some(found) = countries.iter().find(|c| c.id() == entry.id) {
                                entry.name = found.common_name().to_string();
                            }
                        }
                    }
                    Err(e) => tracing::debug!(error = %e, "border read failed, keeping codes"),
                }
                (true, vec![])
            }
        }
    }

    fn replace_view(&mut self, view: View) {
        self.view = view;
        self.input_mode = InputMode::Normal;
        self.picker = None;
    }

    /// Records that web access was refused.
    pub fn permission_denied(&mut self) {
        let error = ZatlasError::Fetch("web access permission denied".to_string());
        tracing::warn!(error = %error, "cannot load countries");
        self.load_status = LoadStatus::Failed(error.to_string());
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome
    /// 2. Center window around selected index
    /// 3. Adjust window if near start/end to maximize visible items
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match &self.view {
            View::List => self.compute_list_body(rows, cols),
            View::Favorites => self.compute_favorites_body(rows, cols),
            View::Detail(_) => self.compute_detail_body(),
            View::Login => Body::Login(LoginInfo {
                email: self.login.email.clone(),
                error: self.login.error.clone(),
            }),
            View::NotFound => Body::Message(EmptyState {
                is_error: true,
                message: "404 · Country not found".to_string(),
                subtitle: "The country you're looking for doesn't exist. Press Esc to go back.".to_string(),
            }),
        };

        UIViewModel {
            header: self.compute_header(),
            footer: self.compute_footer(),
            body,
        }
    }

    fn compute_list_body(&self, rows: usize, cols: usize) -> Body {
        let empty_state = match &self.load_status {
            LoadStatus::Idle => Some(EmptyState {
                is_error: false,
                message: "Waiting for web access".to_string(),
                subtitle: "Grant the permission to load countries".to_string(),
            }),
            LoadStatus::Loading => Some(EmptyState {
                is_error: false,
                message: "Loading countries...".to_string(),
                subtitle: String::new(),
            }),
            LoadStatus::Failed(reason) => Some(EmptyState {
                is_error: true,
                message: "Failed to load countries".to_string(),
                subtitle: reason.clone(),
            }),
            LoadStatus::Loaded if self.visible.is_empty() => Some(EmptyState {
                is_error: false,
                message: "No countries match".to_string(),
                subtitle: if self.criteria.favorites_only && self.favorites.count() == 0 {
                    "No favorites yet. Press f to show all countries".to_string()
                } else {
                    "Press x to clear all criteria".to_string()
                },
            }),
            LoadStatus::Loaded => None,
        };

        let search_active = matches!(self.input_mode, InputMode::Search(_));
        let chrome = if search_active { 10 } else { 7 };
        let (display_items, selected_index) = if empty_state.is_some() {
            (vec![], 0)
        } else {
            self.window(&self.visible, self.selected_index, rows.saturating_sub(chrome), cols, &self.criteria.search)
        };

        Body::Table(TableInfo {
            criteria: Some(self.compute_criteria()),
            search_bar: search_active.then(|| SearchBarInfo {
                query: self.criteria.search.clone(),
                focused: self.input_mode == InputMode::Search(SearchFocus::Typing),
            }),
            display_items,
            selected_index,
            empty_state,
            picker: self.picker.as_ref().map(|p| self.compute_picker(p, rows)),
        })
    }

    fn compute_favorites_body(&self, rows: usize, cols: usize) -> Body {
        let empty_state = self.favorite_rows.is_empty().then(|| EmptyState {
            is_error: false,
            message: "You haven't added any favorites yet".to_string(),
            subtitle: "Press Space on a country to add it. Esc: browse countries".to_string(),
        });
        let (display_items, selected_index) =
            self.window(&self.favorite_rows, self.favorites_index, rows.saturating_sub(6), cols, "");
        Body::Table(TableInfo {
            criteria: None,
            search_bar: None,
            display_items,
            selected_index,
            empty_state,
            picker: None,
        })
    }

    fn compute_detail_body(&self) -> Body {
        let Some(detail) = &self.detail else {
            return Body::Message(EmptyState {
                is_error: false,
                message: "Loading...".to_string(),
                subtitle: String::new(),
            });
        };
        let Some(country) = &detail.country else {
            return Body::Message(EmptyState {
                is_error: false,
                message: format!("Loading {}...", detail.code),
                subtitle: String::new(),
            });
        };

        let mut fields = vec![
            ("Official name", country.name.official.clone()),
            ("Capital", country.capital_display().to_string()),
            ("Region", country.region_display().to_string()),
            ("Subregion", country.subregion_display().to_string()),
            ("Population", country.population_display()),
            ("Area", country.area_display()),
            ("Languages", country.language_list()),
            ("Currencies", country.currency_list()),
        ];
        if !detail.loading {
            fields.push(("Timezones", country.timezone_list()));
        }
        if let Some(map) = &country.maps.google_maps {
            fields.push(("Map", map.clone()));
        }
        if let Some(flag) = country.flag_url() {
            fields.push(("Flag", flag.to_string()));
        }

        Body::Detail(DetailInfo {
            title: country.common_name().to_string(),
            code: country.id().to_string(),
            is_favorite: self.favorites.is_favorite(country.id()),
            loading: detail.loading,
            fields,
            borders: detail
                .borders
                .iter()
                .enumerate()
                .map(|(idx, b)| BorderItem {
                    name: b.name.clone(),
                    is_selected: idx == detail.selected_border,
                })
                .collect(),
            borders_loading: detail.borders_loading,
        })
    }

    /// Slices `rows_src` to the visible window around `selected`.
    fn window(
        &self,
        rows_src: &[Country],
        selected: usize,
        available_rows: usize,
        cols: usize,
        query: &str,
    ) -> (Vec<DisplayItem>, usize) {
        if rows_src.is_empty() || available_rows == 0 {
            return (vec![], 0);
        }

        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(rows_src.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && rows_src.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let name_width = name_column_width(cols);
        let items = rows_src[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, country)| {
                let name = truncate(country.common_name(), name_width);
                DisplayItem {
                    highlight_ranges: pipeline::match_ranges(&name, query),
                    name,
                    region: country.region_display().to_string(),
                    population: country.population_display(),
                    area: country.area_display(),
                    is_selected: visible_start + relative_idx == selected,
                    is_favorite: self.favorites.is_favorite(country.id()),
                }
            })
            .collect();

        (items, selected.saturating_sub(visible_start))
    }

    fn compute_criteria(&self) -> CriteriaInfo {
        type Options = fn(&[Country]) -> Vec<SelectOption>;
        let field = |name: &'static str, value: &Option<String>, options: Option<Options>| {
            let shown = value.as_deref().map_or_else(
                || "any".to_string(),
                |code| {
                    options
                        .and_then(|options| {
                            options(self.source.catalog())
                                .into_iter()
                                .find(|o| o.value.as_deref() == Some(code))
                        })
                        .map_or_else(|| code.to_string(), |o| o.label)
                },
            );
            CriteriaField { name, value: shown, active: value.is_some() }
        };
        let filters = vec![
            field("Region", &self.criteria.region, None),
            field("Language", &self.criteria.language, Some(pipeline::language_options)),
            field("Currency", &self.criteria.currency, Some(pipeline::currency_options)),
            CriteriaField {
                name: "Sort",
                value: self.criteria.sort.label().to_string(),
                active: self.criteria.sort != SortDirective::None,
            },
        ];
        CriteriaInfo {
            search: self.criteria.search.clone(),
            filters,
            favorites_only: self.criteria.favorites_only,
            matched: self.visible.len(),
            total: self.source.catalog().len(),
        }
    }

    fn compute_picker(&self, picker: &PickerState, rows: usize) -> PickerInfo {
        let height = rows.saturating_sub(10).max(3);
        let start = picker.selected.saturating_sub(height / 2);
        let start = start.min(picker.matches.len().saturating_sub(height));
        let options = picker
            .matches
            .iter()
            .enumerate()
            .skip(start)
            .take(height)
            .filter_map(|(pos, &idx)| {
                picker.options.get(idx).map(|o| (o.label.clone(), pos == picker.selected))
            })
            .collect();
        PickerInfo {
            title: picker.kind.title().to_string(),
            query: picker.query.clone(),
            options,
            match_count: picker.matches.len(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.view {
            View::List => " Countries ".to_string(),
            View::Detail(code) => format!(" Country · {code} "),
            View::Favorites => format!(" Favorite Countries ({}) ", self.favorite_rows.len()),
            View::Login => " Log in ".to_string(),
            View::NotFound => " Not found ".to_string(),
        };
        let user = self.sessions.cached().map_or_else(
            || "not logged in".to_string(),
            |s| {
                chrono::DateTime::from_timestamp(s.logged_in_at, 0).map_or_else(
                    || s.email.clone(),
                    |at| format!("{} (since {})", s.email, at.format("%Y-%m-%d %H:%M")),
                )
            },
        );
        HeaderInfo {
            title,
            status: format!("♥ {}  {user}", self.favorites.count()),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        if let Some(notice) = &self.notice {
            return FooterInfo { keybindings: notice.clone() };
        }
        let login = if self.sessions.cached().is_some() { "L: logout" } else { "L: login" };
        let keybindings = match (&self.view, self.input_mode) {
            (_, InputMode::Picker(_)) => {
                "Type to filter  Ctrl+n/p: navigate  Enter: choose  ESC: cancel".to_string()
            }
            (View::List, InputMode::Search(SearchFocus::Typing)) => {
                "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter".to_string()
            }
            (View::List, InputMode::Search(SearchFocus::Navigating)) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: open  Space: favorite".to_string()
            }
            (View::List, InputMode::Normal) => format!(
                "j/k: navigate  /: search  r/l/c: filter  o: sort  f: favorites only  x: clear  Enter: open  Space: favorite  F: favorites  {login}  q: quit"
            ),
            (View::Detail(_), _) => format!(
                "j/k: borders  Enter: open border  Space: favorite  f: favorites  {login}  b/ESC: back  q: quit"
            ),
            (View::Favorites, _) => format!(
                "j/k: navigate  Enter: open  Space: unfavorite  {login}  b/ESC: back  q: quit"
            ),
            (View::Login, _) => "Type your email  Enter: log in  ESC: cancel".to_string(),
            (View::NotFound, _) => "b/ESC: back  q: quit".to_string(),
        };
        FooterInfo { keybindings }
    }
}

fn clamp(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

const fn wrap_down(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}

const fn wrap_up(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

/// Width of the NAME column for a pane `cols` wide.
#[must_use]
pub const fn name_column_width(cols: usize) -> usize {
    let width = cols.saturating_sub(50);
    if width < 16 {
        16
    } else if width > 40 {
        40
    } else {
        width
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
