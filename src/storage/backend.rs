//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait that abstracts over the durable
//! key-value storage the plugin needs. The stores above it only ever see this
//! trait, so tests and the no-data-directory fallback swap in
//! [`crate::storage::MemoryStorage`] without touching business logic.
//!
//! # Design Philosophy
//!
//! The trait is minimal and maps one method to one use case: the session
//! store persists the mock login, and the presentation layer hands the
//! "show favorites only" flag from one view to the next.

use crate::domain::error::Result;
use crate::domain::SessionRecord;

/// Abstraction over persistent storage backends.
///
/// Methods take `&mut self` because backends load lazily: the first access
/// reads the backing file, and a read failure surfaces from that call rather
/// than from construction.
///
/// # Implementations
///
/// - [`crate::storage::JsonStorage`]: JSON file with atomic writes (default)
/// - [`crate::storage::MemoryStorage`]: in-memory, nothing survives a reload
///
/// # Examples
///
/// ```no_run
/// use zatlas::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/zatlas.json"))?;
/// let session = storage.load_session()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Reads the persisted session record, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or parsed.
    fn load_session(&mut self) -> Result<Option<SessionRecord>>;

    /// Persists `session`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_session(&mut self, session: &SessionRecord) -> Result<()>;

    /// Removes the persisted session record. A no-op if none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn clear_session(&mut self) -> Result<()>;

    /// Reads the "show favorites only" flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read or parsed.
    fn favorites_only_flag(&mut self) -> Result<bool>;

    /// Sets the "show favorites only" flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set_favorites_only_flag(&mut self, value: bool) -> Result<()>;

    /// Reads the "show favorites only" flag and resets it, so that one
    /// activation of the list view consumes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or the reset fails.
    fn take_favorites_only_flag(&mut self) -> Result<bool> {
        let value = self.favorites_only_flag()?;
        if value {
            self.set_favorites_only_flag(false)?;
        }
        Ok(value)
    }
}
