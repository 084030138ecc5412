//! Session store.
//!
//! Holds the optional mock login and fronts the durable storage backend. The
//! record is read from storage lazily, on the first call to
//! [`SessionStore::current`]; a failed read is logged and counts as logged
//! out. The same backend carries the "show favorites only" hand-off flag,
//! exposed here as [`SessionStore::request_favorites_only`] and
//! [`SessionStore::take_favorites_only`].

use std::fmt;

use crate::domain::{Result, SessionRecord};
use crate::storage::Storage;

pub struct SessionStore {
    storage: Box<dyn Storage>,
    current: Option<SessionRecord>,
    hydrated: bool,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &self.current)
            .field("hydrated", &self.hydrated)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            current: None,
            hydrated: false,
        }
    }

    /// Returns the logged-in session, reading durable storage on first use.
    pub fn current(&mut self) -> Option<&SessionRecord> {
        if !self.hydrated {
            self.hydrated = true;
            match self.storage.load_session() {
                Ok(session) => {
                    tracing::debug!(found = session.is_some(), "session rehydrated");
                    self.current = session;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read session, treating as logged out");
                    self.current = None;
                }
            }
        }
        self.current.as_ref()
    }

    /// Returns the in-memory session without touching storage.
    ///
    /// `None` before the first [`SessionStore::current`] call.
    #[must_use]
    pub const fn cached(&self) -> Option<&SessionRecord> {
        self.current.as_ref()
    }

    /// Logs in as `email`.
    ///
    /// Only the presence of `@` is checked. On success the record is written
    /// to durable storage before memory is updated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ZatlasError::Validation`] for a malformed address
    /// (state is unchanged) or a storage error if the write fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use zatlas::storage::MemoryStorage;
    /// use zatlas::store::SessionStore;
    ///
    /// let mut sessions = SessionStore::new(Box::new(MemoryStorage::new()));
    /// assert!(sessions.login("not-an-email").is_err());
    /// assert!(sessions.current().is_none());
    ///
    /// sessions.login("a@b.com").unwrap();
    /// assert_eq!(sessions.current().map(|s| s.email.as_str()), Some("a@b.com"));
    /// ```
    pub fn login(&mut self, email: &str) -> Result<SessionRecord> {
        let _span = tracing::debug_span!("session_login").entered();

        let record = SessionRecord::new(email)?;
        self.storage.save_session(&record)?;
        self.current = Some(record.clone());
        self.hydrated = true;

        tracing::info!(email = %record.email, "logged in");
        Ok(record)
    }

    /// Logs out, clearing durable storage and memory.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the record cannot be removed; memory is
    /// cleared regardless.
    pub fn logout(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("session_logout").entered();

        self.current = None;
        self.hydrated = true;
        self.storage.clear_session()?;

        tracing::info!("logged out");
        Ok(())
    }

    /// Asks the next list-view activation to start with favorites only.
    pub fn request_favorites_only(&mut self) {
        if let Err(e) = self.storage.set_favorites_only_flag(true) {
            tracing::warn!(error = %e, "failed to store favorites-only flag");
        }
    }

    /// Consumes the favorites-only hand-off flag. Read errors count as unset.
    pub fn take_favorites_only(&mut self) -> bool {
        self.storage.take_favorites_only_flag().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read favorites-only flag");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZatlasError;
    use crate::storage::{JsonStorage, MemoryStorage};
    use tempfile::TempDir;

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn load_session(&mut self) -> Result<Option<SessionRecord>> {
            Err(ZatlasError::Storage("disk on fire".to_string()))
        }
        fn save_session(&mut self, _: &SessionRecord) -> Result<()> {
            Err(ZatlasError::Storage("disk on fire".to_string()))
        }
        fn clear_session(&mut self) -> Result<()> {
            Ok(())
        }
        fn favorites_only_flag(&mut self) -> Result<bool> {
            Err(ZatlasError::Storage("disk on fire".to_string()))
        }
        fn set_favorites_only_flag(&mut self, _: bool) -> Result<()> {
            Err(ZatlasError::Storage("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_invalid_email_leaves_state_untouched() {
        let mut sessions = SessionStore::new(Box::new(MemoryStorage::new()));
        sessions.login("a@b.com").unwrap();

        let err = sessions.login("not-an-email").unwrap_err();
        assert!(matches!(err, ZatlasError::Validation(_)));
        assert_eq!(sessions.current().unwrap().email, "a@b.com");
    }

    #[test]
    fn test_login_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zatlas.json");

        let mut first = SessionStore::new(Box::new(JsonStorage::new(path.clone()).unwrap()));
        first.login("a@b.com").unwrap();
        drop(first);

        let mut second = SessionStore::new(Box::new(JsonStorage::new(path.clone()).unwrap()));
        assert!(second.cached().is_none());
        assert_eq!(second.current().unwrap().email, "a@b.com");

        second.logout().unwrap();
        let mut third = SessionStore::new(Box::new(JsonStorage::new(path).unwrap()));
        assert!(third.current().is_none());
    }

    #[test]
    fn test_read_failure_is_logged_out() {
        let mut sessions = SessionStore::new(Box::new(BrokenStorage));
        assert!(sessions.current().is_none());
        assert!(!sessions.take_favorites_only());
    }

    #[test]
    fn test_failed_write_does_not_log_in() {
        let mut sessions = SessionStore::new(Box::new(BrokenStorage));
        assert!(matches!(sessions.login("a@b.com"), Err(ZatlasError::Storage(_))));
        assert!(sessions.cached().is_none());
    }

    #[test]
    fn test_favorites_only_hand_off() {
        let mut sessions = SessionStore::new(Box::new(MemoryStorage::new()));
        assert!(!sessions.take_favorites_only());
        sessions.request_favorites_only();
        assert!(sessions.take_favorites_only());
        assert!(!sessions.take_favorites_only());
    }
}
