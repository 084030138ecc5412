//! Owned, injectable stores for favorites and the mock login session.
//!
//! Both live inside [`crate::app::AppState`]; nothing here is global.

pub mod favorites;
pub mod session;

pub use favorites::{FavoritesPolicy, FavoritesStore, ToggleOutcome};
pub use session::SessionStore;
