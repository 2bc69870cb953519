//! Registry crate holding the static city/state reference table.
//!
//! The table is embedded at compile time, validated for the
//! `(city, state_code)` uniqueness key on first load, and queried through a
//! deterministic ranked substring search.

pub mod models;
pub mod search;

pub use models::{LocationRegistry, RegistryError};
pub use search::{DEFAULT_RESULT_LIMIT, search_locations};
pub use visadesk_types::Location;
