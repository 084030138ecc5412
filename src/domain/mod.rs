//! Domain layer for the zatlas plugin.
//!
//! Core types independent of Zellij-specific APIs: the country record, the
//! list criteria, the mock session record and the error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`country`]: Country record and display helpers
//! - [`criteria`]: Search/filter/sort criteria
//! - [`session`]: Mock login record

pub mod country;
pub mod criteria;
pub mod error;
pub mod session;

pub use country::{Country, CountryName, Currency, Flags, Maps};
pub use criteria::{FilterCriteria, SortDirective, REGIONS};
pub use error::{Result, ZatlasError};
pub use session::SessionRecord;
