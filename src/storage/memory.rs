//! In-memory storage backend.
//!
//! Used when the plugin data directory is unavailable, and by tests that do
//! not care about files. Nothing survives a plugin reload.

use crate::domain::error::Result;
use crate::domain::SessionRecord;
use crate::storage::backend::Storage;

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    session: Option<SessionRecord>,
    show_favorites_only: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load_session(&mut self) -> Result<Option<SessionRecord>> {
        Ok(self.session.clone())
    }

    fn save_session(&mut self, session: &SessionRecord) -> Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn clear_session(&mut self) -> Result<()> {
        self.session = None;
        Ok(())
    }

    fn favorites_only_flag(&mut self) -> Result<bool> {
        Ok(self.show_favorites_only)
    }

    fn set_favorites_only_flag(&mut self, value: bool) -> Result<()> {
        self.show_favorites_only = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_flag_default_method() {
        let mut storage = MemoryStorage::new();
        assert!(!storage.take_favorites_only_flag().unwrap());

        storage.set_favorites_only_flag(true).unwrap();
        assert!(storage.take_favorites_only_flag().unwrap());
        assert!(!storage.favorites_only_flag().unwrap());
    }
}
