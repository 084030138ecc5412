//! Shared fixtures for unit tests.

use crate::app::AppState;
use crate::source::{CountrySource, FetchKind};
use crate::storage::MemoryStorage;
use crate::store::{FavoritesPolicy, FavoritesStore, SessionStore};
use crate::ui::Theme;

/// Nine countries spanning every region, with borders among the European ones.
pub const COUNTRIES: &str = include_str!("../tests/fixtures/countries.json");

/// A fresh state on in-memory storage, before any read.
pub fn state() -> AppState {
    state_with(FavoritesPolicy::Open)
}

fn state_with(policy: FavoritesPolicy) -> AppState {
    AppState::new(
        CountrySource::new("http://countries.test/v3.1"),
        FavoritesStore::new(policy, false),
        SessionStore::new(Box::new(MemoryStorage::new())),
        Theme::default(),
    )
}

/// A state whose catalog read has completed with [`COUNTRIES`].
pub fn loaded_state() -> AppState {
    loaded_state_with(FavoritesPolicy::Open)
}

pub fn loaded_state_with(policy: FavoritesPolicy) -> AppState {
    let mut state = state_with(policy);
    state.start_loading();
    state.apply_fetch(&FetchKind::All, 200, COUNTRIES.as_bytes());
    state
}

/// One fixture country as a `/alpha/{code}` response body.
pub fn country_json(code: &str) -> Vec<u8> {
    let all: Vec<serde_json::Value> = serde_json::from_str(COUNTRIES).unwrap();
    let one = all
        .into_iter()
        .find(|c| c["cca3"] == code)
        .unwrap();
    serde_json::to_vec(&vec![one]).unwrap()
}
