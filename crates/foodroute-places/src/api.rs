//! Places API (New) wire types.

use serde::{Deserialize, Serialize};

/// Field mask for `places:searchText`.
pub(crate) const SEARCH_FIELD_MASK: &str = "places.id,places.formattedAddress,places.location";
/// Field mask for place details.
pub(crate) const DETAILS_FIELD_MASK: &str = "id,formattedAddress,location";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchTextRequest<'a> {
    pub text_query: &'a str,
    pub language_code: &'a str,
    pub region_code: &'a str,
    pub included_type: &'a str,
    pub location_bias: LocationBias,
}

#[derive(Debug, Serialize)]
pub(crate) struct LocationBias {
    pub circle: Circle,
}

#[derive(Debug, Serialize)]
pub(crate) struct Circle {
    pub center: LatLngLiteral,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct LatLngLiteral {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<ApiPlace>,
}

/// A place as returned by search or details; every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiPlace {
    pub id: Option<String>,
    pub formatted_address: Option<String>,
    pub location: Option<ApiLocation>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct ApiLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_shape() {
        let request = SearchTextRequest {
            text_query: "Bunsen Wexford Street",
            language_code: "en",
            region_code: "IE",
            included_type: "restaurant",
            location_bias: LocationBias {
                circle: Circle {
                    center: LatLngLiteral {
                        latitude: 53.3478,
                        longitude: -6.2597,
                    },
                    radius: 5000.0,
                },
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "textQuery": "Bunsen Wexford Street",
                "languageCode": "en",
                "regionCode": "IE",
                "includedType": "restaurant",
                "locationBias": {
                    "circle": {
                        "center": {"latitude": 53.3478, "longitude": -6.2597},
                        "radius": 5000.0
                    }
                }
            })
        );
    }

    #[test]
    fn test_empty_search_response() {
        let response: SearchTextResponse = serde_json::from_str("{}").unwrap();
        assert!(response.places.is_empty());
    }

    #[test]
    fn test_partial_place() {
        let place: ApiPlace = serde_json::from_value(json!({
            "id": "ChIJ123",
            "location": {"latitude": 53.34}
        }))
        .unwrap();
        assert_eq!(place.id.as_deref(), Some("ChIJ123"));
        assert!(place.formatted_address.is_none());
        let location = place.location.unwrap();
        assert_eq!(location.latitude, Some(53.34));
        assert!(location.longitude.is_none());
    }
}
