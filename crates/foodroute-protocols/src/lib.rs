//! # foodroute protocols
//!
//! Shared data types and the traits that sit at the external boundaries of
//! the pipeline.
//!
//! ## Core Traits
//!
//! - [`PlaceResolver`] - Resolves a free-text name to a geocoded place
//! - [`MatrixBackend`] - Answers one tiled distance-matrix request
//! - [`KeyValueStore`] - Persists pipeline outputs by key
//! - [`RatePolicy`] - Paces sequential calls to rate-limited services

pub mod error;
pub mod pacing;
pub mod place;
pub mod routing;
pub mod store;

pub use error::{MatrixError, PlaceError, StoreError};
pub use pacing::{FixedPause, NoPause, RatePolicy};
pub use place::{PlaceEntry, PlaceMap, PlaceRecord, PlaceResolver};
pub use routing::{Location, MatrixBackend, MatrixRequest, MatrixResponse};
pub use store::{load_typed, save_typed, KeyValueStore};
