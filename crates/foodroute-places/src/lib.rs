//! # foodroute places
//!
//! Turns scraped restaurant names into geocoded places.
//!
//! - [`GooglePlacesResolver`] - [`PlaceResolver`] over the Places API (New)
//! - [`resolve_places`] - sequential, paced batch resolution
//! - [`format_places`] / [`filter_places_in_area`] - keyed export and area filter
//!
//! [`PlaceResolver`]: foodroute_protocols::PlaceResolver

mod api;
mod format;
mod google;
mod resolve;

pub use format::{filter_places_in_area, format_places, haversine_km, AreaFilter};
pub use google::{GooglePlacesResolver, SearchSettings};
pub use resolve::resolve_places;
