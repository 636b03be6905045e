//! Locator-based page interface.

use std::time::Duration;

use async_trait::async_trait;

use crate::locator::Locator;
use crate::manager::BrowserError;

/// Options for [`BrowserPage::click`].
#[derive(Debug, Clone, Copy)]
pub struct ClickOptions {
    /// Check that the element would receive the click without clicking it.
    pub trial: bool,
    /// How long to wait for the element to become clickable.
    pub timeout: Duration,
}

impl ClickOptions {
    pub fn new(timeout: Duration) -> Self {
        Self {
            trial: false,
            timeout,
        }
    }

    pub fn trial(timeout: Duration) -> Self {
        Self {
            trial: true,
            timeout,
        }
    }
}

/// A browser page the scraper can drive.
///
/// Element operations act on the first element the locator resolves to.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// Scroll the window down by `fraction` of the viewport height.
    async fn scroll_by_viewport(&self, fraction: f64) -> Result<(), BrowserError>;

    /// Number of elements the locator currently resolves to.
    async fn count(&self, locator: &Locator) -> Result<usize, BrowserError>;

    /// Whether the first match becomes visible within `timeout`.
    async fn is_visible(&self, locator: &Locator, timeout: Duration) -> Result<bool, BrowserError>;

    /// Rendered text of the first match.
    async fn inner_text(&self, locator: &Locator) -> Result<String, BrowserError>;

    /// Raw text content of the first match, waiting up to `timeout` for it to exist.
    async fn text_content(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Option<String>, BrowserError>;

    async fn scroll_into_view(&self, locator: &Locator) -> Result<(), BrowserError>;

    async fn click(&self, locator: &Locator, options: ClickOptions) -> Result<(), BrowserError>;

    /// Wait until no request has been in flight for a short quiet window.
    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), BrowserError>;
}
