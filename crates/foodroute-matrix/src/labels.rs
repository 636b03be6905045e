//! Ids, labels and coordinates from a keyed place map.

use foodroute_protocols::{Location, PlaceMap};

/// Index-aligned view over a place map, in map order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledLocationSet {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    /// Longitude first.
    pub locations: Vec<Location>,
}

impl LabeledLocationSet {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Split a place map into ids, names and `[lng, lat]` pairs.
///
/// Nothing is filtered: places without coordinates keep their empty axes.
pub fn build_labels_and_locations(places: &PlaceMap) -> LabeledLocationSet {
    let mut set = LabeledLocationSet::default();
    for (id, entry) in places.iter() {
        set.ids.push(id.to_string());
        set.labels.push(entry.name.clone());
        set.locations.push(Location {
            lng: entry.lng,
            lat: entry.lat,
        });
    }
    set
}
