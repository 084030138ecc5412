//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or host events.
//! Actions bridge pure state transformations and effectful operations that only
//! the host can perform.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! these actions in sequence.
//!
//! # Example
//!
//! ```rust
//! use zatlas::app::Action;
//! use zatlas::source::CountrySource;
//!
//! let source = CountrySource::default();
//! let actions = vec![Action::Fetch(source.request_all())];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::source::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit the plugin (e.g., pressing 'q').
    CloseFocus,

    /// Issues an HTTP GET through the host.
    ///
    /// The request's [`crate::source::FetchKind`] travels in the request
    /// context and comes back with the response.
    Fetch(FetchRequest),
}
