//! Favorites store.
//!
//! Holds the set of favorited country identifiers for the running plugin
//! instance. Membership is keyed on the `cca3` identifier only; insertion
//! order is kept for the favorites view.
//!
//! Whether favoriting needs a login is configuration ([`FavoritesPolicy`]).
//! The store learns about the session through [`FavoritesStore::bind_owner`],
//! which the presentation layer calls on startup and after every login or
//! logout.

use crate::domain::Country;
use crate::pipeline::FavoriteSet;

/// Whether toggling a favorite requires a logged-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoritesPolicy {
    #[default]
    Open,
    RequireLogin,
}

/// What a [`FavoritesStore::toggle`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Nothing changed; the caller should route the user to the login view.
    LoginRequired,
}

#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    ids: Vec<String>,
    policy: FavoritesPolicy,
    /// When set, the set belongs to `owner` and is dropped when it changes.
    identity_scoped: bool,
    owner: Option<String>,
}

impl FavoritesStore {
    #[must_use]
    pub fn new(policy: FavoritesPolicy, identity_scoped: bool) -> Self {
        Self {
            ids: Vec::new(),
            policy,
            identity_scoped,
            owner: None,
        }
    }

    /// Records the current session owner (`None` when logged out).
    ///
    /// In identity-scoped mode a change of owner, including logout, clears
    /// the set.
    pub fn bind_owner(&mut self, owner: Option<&str>) {
        if self.owner.as_deref() == owner {
            return;
        }
        if self.identity_scoped && !self.ids.is_empty() {
            tracing::debug!(
                previous = ?self.owner,
                next = ?owner,
                cleared = self.ids.len(),
                "favorites owner changed, clearing"
            );
            self.ids.clear();
        }
        self.owner = owner.map(str::to_string);
    }

    /// Flips membership of `id` exactly once.
    ///
    /// Under [`FavoritesPolicy::RequireLogin`] with no bound owner this is a
    /// no-op returning [`ToggleOutcome::LoginRequired`].
    ///
    /// # Examples
    ///
    /// ```
    /// use zatlas::store::{FavoritesPolicy, FavoritesStore, ToggleOutcome};
    ///
    /// let mut favorites = FavoritesStore::new(FavoritesPolicy::Open, false);
    /// assert_eq!(favorites.toggle("FRA"), ToggleOutcome::Added);
    /// assert!(favorites.is_favorite("FRA"));
    /// assert_eq!(favorites.toggle("FRA"), ToggleOutcome::Removed);
    /// assert_eq!(favorites.count(), 0);
    /// ```
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        let _span = tracing::debug_span!("favorites_toggle", id = %id).entered();

        if self.policy == FavoritesPolicy::RequireLogin && self.owner.is_none() {
            tracing::debug!("toggle refused, login required");
            return ToggleOutcome::LoginRequired;
        }

        if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
            tracing::debug!(count = self.ids.len(), "favorite removed");
            ToggleOutcome::Removed
        } else {
            self.ids.push(id.to_string());
            tracing::debug!(count = self.ids.len(), "favorite added");
            ToggleOutcome::Added
        }
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub const fn policy(&self) -> FavoritesPolicy {
        self.policy
    }

    /// Favorited ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Resolves the favorites against the catalog, in insertion order.
    /// Ids the catalog does not know are skipped.
    #[must_use]
    pub fn list(&self, all: &[Country]) -> Vec<Country> {
        self.ids
            .iter()
            .filter_map(|id| all.iter().find(|c| c.id() == id))
            .cloned()
            .collect()
    }
}

impl FavoriteSet for FavoritesStore {
    fn is_favorite(&self, id: &str) -> bool {
        Self::is_favorite(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Country> {
        serde_json::from_str(
            r#"[
                {"cca3":"FRA","name":{"common":"France"}},
                {"cca3":"DEU","name":{"common":"Germany"}},
                {"cca3":"JPN","name":{"common":"Japan"}}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut favorites = FavoritesStore::new(FavoritesPolicy::Open, false);
        favorites.toggle("DEU");
        let before = favorites.ids().to_vec();

        assert_eq!(favorites.toggle("FRA"), ToggleOutcome::Added);
        assert_eq!(favorites.toggle("FRA"), ToggleOutcome::Removed);
        assert_eq!(favorites.ids(), before.as_slice());
    }

    #[test]
    fn test_list_keeps_insertion_order_and_skips_unknown() {
        let mut favorites = FavoritesStore::new(FavoritesPolicy::Open, false);
        favorites.toggle("JPN");
        favorites.toggle("XXX");
        favorites.toggle("FRA");

        let names: Vec<_> = favorites
            .list(&catalog())
            .iter()
            .map(|c| c.common_name().to_string())
            .collect();
        assert_eq!(names, ["Japan", "France"]);
        assert_eq!(favorites.count(), 3);
    }

    #[test]
    fn test_gated_toggle_requires_owner() {
        let mut favorites = FavoritesStore::new(FavoritesPolicy::RequireLogin, false);
        assert_eq!(favorites.toggle("FRA"), ToggleOutcome::LoginRequired);
        assert_eq!(favorites.count(), 0);

        favorites.bind_owner(Some("a@b.com"));
        assert_eq!(favorites.toggle("FRA"), ToggleOutcome::Added);
    }

    #[test]
    fn test_identity_scoped_clears_on_owner_change() {
        let mut favorites = FavoritesStore::new(FavoritesPolicy::RequireLogin, true);
        favorites.bind_owner(Some("a@b.com"));
        favorites.toggle("FRA");

        favorites.bind_owner(Some("a@b.com"));
        assert!(favorites.is_favorite("FRA"));

        favorites.bind_owner(None);
        assert_eq!(favorites.count(), 0);
    }

    #[test]
    fn test_unscoped_survives_logout() {
        let mut favorites = FavoritesStore::new(FavoritesPolicy::Open, false);
        favorites.bind_owner(Some("a@b.com"));
        favorites.toggle("FRA");
        favorites.bind_owner(None);
        assert!(favorites.is_favorite("FRA"));
    }
}
