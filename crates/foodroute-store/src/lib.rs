//! # foodroute store
//!
//! [`KeyValueStore`](foodroute_protocols::KeyValueStore) implementations.
//!
//! - [`JsonFileStore`] - one JSON object file, replaced atomically on upsert
//! - [`MemoryStore`] - in-process map, for tests and dry runs

mod file_store;
mod memory_store;

pub use file_store::{JsonFileStore, StoredEntry};
pub use memory_store::MemoryStore;

/// Scraped restaurant names, in page order.
pub const KEY_RESTAURANT_NAMES: &str = "restaurant_names";
/// Resolved places keyed by place_id.
pub const KEY_PLACES: &str = "places";
/// Places kept by the area filter.
pub const KEY_AREA_PLACES: &str = "area_places";
