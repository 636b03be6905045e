//! Place resolution errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaceError {
    #[error("Places API key is required")]
    MissingApiKey,

    #[error("Expected a non-empty list of restaurant names")]
    EmptyInput,

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No candidate found for '{0}'")]
    NoCandidate(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
