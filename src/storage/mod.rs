//! Storage layer for durable plugin data.
//!
//! This module provides the storage abstraction for persisting the mock
//! login session and the cross-view "show favorites only" flag. The default
//! backend is a JSON file in the plugin data directory.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `memory`: In-memory fallback

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::Storage;
pub use json::JsonStorage;
pub use memory::MemoryStorage;
