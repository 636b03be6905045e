//! Routing-matrix boundary types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// Core trait for routing backends that answer distance-matrix requests.
#[async_trait]
pub trait MatrixBackend: Send + Sync {
    /// Returns the backend ID.
    fn id(&self) -> &str;

    /// Issue one matrix request.
    async fn matrix(&self, request: &MatrixRequest) -> Result<MatrixResponse, MatrixError>;
}

/// A coordinate pair, longitude first.
///
/// Serialized as `[lng, lat]`; absent axes serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Option<f64>, Option<f64>)", into = "(Option<f64>, Option<f64>)")]
pub struct Location {
    pub lng: Option<f64>,
    pub lat: Option<f64>,
}

impl Location {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            lng: Some(lng),
            lat: Some(lat),
        }
    }

    /// The `[lng, lat]` pair when both axes are finite.
    pub fn lng_lat(&self) -> Option<[f64; 2]> {
        match (self.lng, self.lat) {
            (Some(lng), Some(lat)) if lng.is_finite() && lat.is_finite() => Some([lng, lat]),
            _ => None,
        }
    }
}

impl From<(Option<f64>, Option<f64>)> for Location {
    fn from((lng, lat): (Option<f64>, Option<f64>)) -> Self {
        Self { lng, lat }
    }
}

impl From<Location> for (Option<f64>, Option<f64>) {
    fn from(location: Location) -> Self {
        (location.lng, location.lat)
    }
}

/// One tile request: the full location list plus the index slices to route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRequest {
    pub locations: Vec<[f64; 2]>,
    pub sources: Vec<usize>,
    pub destinations: Vec<usize>,
    pub metrics: Vec<String>,
}

impl MatrixRequest {
    /// Distance-only request.
    pub fn distances(locations: Vec<[f64; 2]>, sources: Vec<usize>, destinations: Vec<usize>) -> Self {
        Self {
            locations,
            sources,
            destinations,
            metrics: vec!["distance".to_string()],
        }
    }
}

/// Tile response; `distances` is shaped `[sources][destinations]` in meters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatrixResponse {
    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}
