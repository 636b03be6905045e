//! Google Places API (New) resolver.

use async_trait::async_trait;
use foodroute_config::PlacesConfig;
use foodroute_protocols::{PlaceError, PlaceRecord, PlaceResolver};
use tracing::{debug, warn};
use url::Url;

use crate::api::{
    ApiPlace, Circle, LatLngLiteral, LocationBias, SearchTextRequest, SearchTextResponse,
    DETAILS_FIELD_MASK, SEARCH_FIELD_MASK,
};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";

/// Text search parameters shared by every lookup.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub language_code: String,
    pub region_code: String,
    pub included_type: String,
    /// Centre of the circular location bias, as (lat, lng).
    pub bias_center: (f64, f64),
    pub bias_radius_m: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from(&PlacesConfig::default())
    }
}

impl From<&PlacesConfig> for SearchSettings {
    fn from(config: &PlacesConfig) -> Self {
        Self {
            language_code: config.language_code.clone(),
            region_code: config.region_code.clone(),
            included_type: config.included_type.clone(),
            bias_center: (config.bias_center.lat, config.bias_center.lng),
            bias_radius_m: config.bias_radius_m,
        }
    }
}

/// Resolves names with a biased text search, then confirms the first
/// candidate through place details.
pub struct GooglePlacesResolver {
    api_key: String,
    base_url: String,
    settings: SearchSettings,
    client: reqwest::Client,
}

impl GooglePlacesResolver {
    /// Fails with [`PlaceError::MissingApiKey`] when the key is blank.
    pub fn new(api_key: impl Into<String>, settings: SearchSettings) -> Result<Self, PlaceError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, settings)
    }

    /// Resolver against a custom API root, e.g. a mock server.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        settings: SearchSettings,
    ) -> Result<Self, PlaceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PlaceError::MissingApiKey);
        }
        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            settings,
            client: reqwest::Client::new(),
        })
    }

    fn search_request<'a>(&'a self, name: &'a str) -> SearchTextRequest<'a> {
        let (latitude, longitude) = self.settings.bias_center;
        SearchTextRequest {
            text_query: name,
            language_code: &self.settings.language_code,
            region_code: &self.settings.region_code,
            included_type: &self.settings.included_type,
            location_bias: LocationBias {
                circle: Circle {
                    center: LatLngLiteral {
                        latitude,
                        longitude,
                    },
                    radius: self.settings.bias_radius_m,
                },
            },
        }
    }

    pub(crate) fn details_url(&self, place_id: &str) -> Result<Url, PlaceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| PlaceError::InvalidResponse(format!("Bad base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| PlaceError::InvalidResponse("Base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["v1", "places", place_id]);
        url.query_pairs_mut()
            .append_pair("languageCode", &self.settings.language_code);
        Ok(url)
    }

    /// First text-search candidate for `name`.
    async fn search(&self, name: &str) -> Result<ApiPlace, PlaceError> {
        let response = self
            .client
            .post(format!("{}/v1/places:searchText", self.base_url))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .json(&self.search_request(name))
            .send()
            .await
            .map_err(|e| PlaceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(PlaceError::ApiError { status, message });
        }

        let body: SearchTextResponse = response
            .json()
            .await
            .map_err(|e| PlaceError::InvalidResponse(e.to_string()))?;

        body.places
            .into_iter()
            .next()
            .ok_or_else(|| PlaceError::NoCandidate(name.to_string()))
    }

    async fn details(&self, place_id: &str) -> Result<ApiPlace, PlaceError> {
        let response = self
            .client
            .get(self.details_url(place_id)?)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", DETAILS_FIELD_MASK)
            .send()
            .await
            .map_err(|e| PlaceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(PlaceError::ApiError { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| PlaceError::InvalidResponse(e.to_string()))
    }
}

/// Combine details with the search candidate, field by field.
pub(crate) fn merge_place(name: &str, candidate: &ApiPlace, details: Option<&ApiPlace>) -> PlaceRecord {
    let detail_location = details.and_then(|d| d.location);
    let candidate_location = candidate.location;

    PlaceRecord {
        name: name.to_string(),
        lat: detail_location
            .and_then(|l| l.latitude)
            .or_else(|| candidate_location.and_then(|l| l.latitude)),
        lng: detail_location
            .and_then(|l| l.longitude)
            .or_else(|| candidate_location.and_then(|l| l.longitude)),
        place_id: details
            .and_then(|d| d.id.clone())
            .or_else(|| candidate.id.clone()),
        formatted_address: details
            .and_then(|d| d.formatted_address.clone())
            .or_else(|| candidate.formatted_address.clone()),
    }
}

#[async_trait]
impl PlaceResolver for GooglePlacesResolver {
    fn id(&self) -> &str {
        "google-places"
    }

    async fn resolve(&self, name: &str) -> Result<PlaceRecord, PlaceError> {
        let candidate = self.search(name).await?;

        let details = match candidate.id.as_deref() {
            Some(id) => match self.details(id).await {
                Ok(details) => Some(details),
                Err(e) => {
                    warn!("Place details failed for {}: {}", name, e);
                    None
                }
            },
            None => None,
        };

        let record = merge_place(name, &candidate, details.as_ref());
        debug!("Resolved {} -> {:?}", name, record.place_id);
        Ok(record)
    }
}

#[cfg(test)]
#[path = "google_tests.rs"]
mod tests;
