//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the
//! domain/pipeline/store/source layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Key/Host Event → Events → Event Handler → State Mutations → Actions → Side Effects
//!                              ↑                                  ↓
//!                              └──────── Web Responses ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`keys`]: Key press to event mapping
//! - [`modes`]: View and input mode types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, PickerKind, SearchFocus, View};
pub use state::{AppState, LoadStatus};
