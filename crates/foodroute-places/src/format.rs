//! Keyed place export and the area filter.

use foodroute_config::AreaConfig;
use foodroute_protocols::{PlaceEntry, PlaceMap, PlaceRecord};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Re-key records by `place_id`.
///
/// Records without a `place_id` are dropped. A repeated id overwrites the
/// earlier entry but keeps its position.
pub fn format_places(records: &[PlaceRecord]) -> PlaceMap {
    let mut places = PlaceMap::new();
    for record in records {
        if let Some(place_id) = &record.place_id {
            places.insert(
                place_id.clone(),
                PlaceEntry {
                    name: record.name.clone(),
                    lat: record.lat,
                    lng: record.lng,
                    formatted_address: record.formatted_address.clone(),
                },
            );
        }
    }
    places
}

/// Great-circle distance in kilometres between two (lat, lng) points.
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let d_lat = (b.0 - a.0).to_radians();
    let d_lng = (b.1 - a.1).to_radians();
    let lat1 = a.0.to_radians();
    let lat2 = b.0.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Which places count as "in the area".
#[derive(Debug, Clone)]
pub struct AreaFilter {
    /// (lat, lng)
    pub center: (f64, f64),
    pub max_distance_km: f64,
    /// Matched case-insensitively against the formatted address.
    pub address_keyword: String,
}

impl From<&AreaConfig> for AreaFilter {
    fn from(config: &AreaConfig) -> Self {
        Self {
            center: (config.center.lat, config.center.lng),
            max_distance_km: config.max_distance_km,
            address_keyword: config.address_keyword.clone(),
        }
    }
}

impl AreaFilter {
    pub fn contains(&self, entry: &PlaceEntry) -> bool {
        let Some(address) = entry.formatted_address.as_deref().filter(|a| !a.is_empty()) else {
            return false;
        };

        let keyword = self.address_keyword.to_lowercase();
        if !keyword.is_empty() && address.to_lowercase().contains(&keyword) {
            return true;
        }

        match (entry.lat, entry.lng) {
            (Some(lat), Some(lng)) => haversine_km(self.center, (lat, lng)) <= self.max_distance_km,
            _ => false,
        }
    }
}

/// Keep the places with an address that mention the keyword or lie within
/// range of the centre. Order is preserved.
pub fn filter_places_in_area(places: &PlaceMap, filter: &AreaFilter) -> PlaceMap {
    places
        .iter()
        .filter(|(_, entry)| filter.contains(entry))
        .map(|(id, entry)| (id.to_string(), entry.clone()))
        .collect()
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
