//! Place records and the resolver boundary.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::PlaceError;

/// Core trait for place resolution services.
#[async_trait]
pub trait PlaceResolver: Send + Sync {
    /// Returns the resolver ID.
    fn id(&self) -> &str;

    /// Resolve one trimmed name to a geocoded place.
    async fn resolve(&self, name: &str) -> Result<PlaceRecord, PlaceError>;
}

/// A resolved (or unresolved) place, one per input name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub place_id: Option<String>,
    pub formatted_address: Option<String>,
}

impl PlaceRecord {
    /// Record for a name the resolver could not place.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lat: None,
            lng: None,
            place_id: None,
            formatted_address: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.place_id.is_some()
    }
}

/// Per-place value stored under its `place_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceEntry {
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

/// Insertion-ordered mapping from `place_id` to [`PlaceEntry`].
///
/// Serializes as a JSON object whose key order is the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceMap {
    entries: IndexMap<String, PlaceEntry>,
}

impl PlaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, place_id: impl Into<String>, entry: PlaceEntry) {
        self.entries.insert(place_id.into(), entry);
    }

    pub fn get(&self, place_id: &str) -> Option<&PlaceEntry> {
        self.entries.get(place_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlaceEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}

impl FromIterator<(String, PlaceEntry)> for PlaceMap {
    fn from_iter<I: IntoIterator<Item = (String, PlaceEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "place_tests.rs"]
mod tests;
