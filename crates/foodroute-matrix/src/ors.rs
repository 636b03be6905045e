//! OpenRouteService client.

use std::time::Duration;

use async_trait::async_trait;
use foodroute_config::RoutingConfig;
use foodroute_protocols::{MatrixBackend, MatrixError, MatrixRequest, MatrixResponse};
use serde_json::Value;
use tracing::{debug, error};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for an ORS v2 instance.
///
/// `base_url` is the API root including the version segment, e.g.
/// `http://localhost:8080/ors/v2`.
pub struct OrsClient {
    base_url: String,
    api_key: Option<String>,
    profile: String,
    client: reqwest::Client,
}

impl OrsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        profile: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MatrixError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MatrixError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            profile: profile.into(),
            client,
        })
    }

    pub fn from_config(config: &RoutingConfig) -> Result<Self, MatrixError> {
        Self::new(
            config.base_url.clone(),
            config.resolved_api_key(),
            config.profile.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(reqwest::header::AUTHORIZATION, key),
            None => request,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, MatrixError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("ORS HTTP {}: {}", status.as_u16(), message);
            return Err(MatrixError::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|e| MatrixError::InvalidResponse(e.to_string()))
    }

    async fn get(&self, path: &str, timeout: Option<Duration>) -> Result<Value, MatrixError> {
        let mut request = self.authorized(self.client.get(format!("{}{}", self.base_url, path)));
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| MatrixError::Network(e.to_string()))?;
        self.read_json(response).await
    }

    /// `GET /health`, with a short timeout.
    pub async fn health(&self) -> Result<Value, MatrixError> {
        self.get("/health", Some(HEALTH_TIMEOUT)).await
    }

    /// `GET /status`.
    pub async fn status(&self) -> Result<Value, MatrixError> {
        self.get("/status", None).await
    }
}

#[async_trait]
impl MatrixBackend for OrsClient {
    fn id(&self) -> &str {
        "openrouteservice"
    }

    async fn matrix(&self, request: &MatrixRequest) -> Result<MatrixResponse, MatrixError> {
        let url = format!("{}/matrix/{}", self.base_url, self.profile);
        debug!(
            "POST {} ({} sources x {} destinations)",
            url,
            request.sources.len(),
            request.destinations.len()
        );

        let response = self
            .authorized(self.client.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| MatrixError::Network(e.to_string()))?;
        self.read_json(response).await
    }
}

#[cfg(test)]
#[path = "ors_tests.rs"]
mod tests;
