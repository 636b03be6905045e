//! Pacing of sequential calls to rate-limited services.

use std::time::Duration;

use async_trait::async_trait;

/// Policy applied between two consecutive remote calls.
#[async_trait]
pub trait RatePolicy: Send + Sync {
    /// Wait before the next call.
    async fn pause(&self);
}

/// Sleeps a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedPause(pub Duration);

impl FixedPause {
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

#[async_trait]
impl RatePolicy for FixedPause {
    async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Yields without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

#[async_trait]
impl RatePolicy for NoPause {
    async fn pause(&self) {
        tokio::task::yield_now().await;
    }
}
