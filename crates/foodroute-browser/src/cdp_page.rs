//! [`BrowserPage`] over a CDP page session.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::cdp::PageSession;
use crate::locator::Locator;
use crate::manager::BrowserError;
use crate::page::{BrowserPage, ClickOptions};
use crate::resolver_script::{build_query, Query};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Deserialize)]
struct ClickPoint {
    x: f64,
    y: f64,
    hit: bool,
    visible: bool,
}

/// A live Chrome page.
pub struct CdpPage {
    session: Arc<PageSession>,
}

impl CdpPage {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    async fn query(&self, locator: &Locator, query: Query) -> Result<Value, BrowserError> {
        let expression = build_query(locator, query)?;
        Ok(self.session.evaluate(&expression).await?)
    }

    /// Poll `check` until it yields a value or `timeout` elapses.
    async fn poll<T, F, Fut>(&self, timeout: Duration, mut check: F) -> Result<Option<T>, BrowserError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<Option<T>, BrowserError>>,
    {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(value) = check().await? {
                return Ok(Some(value));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn click_point(&self, locator: &Locator) -> Result<Option<ClickPoint>, BrowserError> {
        let value = self.query(locator, Query::ClickPoint).await?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }
}

fn describe(locator: &Locator) -> String {
    serde_json::to_string(locator).unwrap_or_else(|_| format!("{:?}", locator))
}

#[async_trait]
impl BrowserPage for CdpPage {
    async fn scroll_by_viewport(&self, fraction: f64) -> Result<(), BrowserError> {
        self.session
            .evaluate(&format!(
                "window.scrollBy(0, Math.floor(window.innerHeight * {}))",
                fraction
            ))
            .await?;
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> Result<usize, BrowserError> {
        let value = self.query(locator, Query::Count).await?;
        value
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| BrowserError::ActionFailed(format!("Unexpected count result: {}", value)))
    }

    async fn is_visible(&self, locator: &Locator, timeout: Duration) -> Result<bool, BrowserError> {
        let visible = self
            .poll(timeout, move || async move {
                let value = self.query(locator, Query::Visible).await?;
                Ok::<_, BrowserError>(value.as_bool().unwrap_or(false).then_some(()))
            })
            .await?;
        Ok(visible.is_some())
    }

    async fn inner_text(&self, locator: &Locator) -> Result<String, BrowserError> {
        match self.query(locator, Query::InnerText).await? {
            Value::String(text) => Ok(text),
            _ => Err(BrowserError::ElementNotFound(describe(locator))),
        }
    }

    async fn text_content(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Option<String>, BrowserError> {
        // Outer Option: element found. Inner: textContent may be null.
        let found = self
            .poll(timeout, move || async move {
                let count = self.query(locator, Query::Count).await?;
                if count.as_u64().unwrap_or(0) == 0 {
                    return Ok(None);
                }
                let value = self.query(locator, Query::TextContent).await?;
                Ok::<_, BrowserError>(Some(value.as_str().map(str::to_string)))
            })
            .await?;

        found.ok_or_else(|| {
            BrowserError::Timeout(format!("No element for {} after {:?}", describe(locator), timeout))
        })
    }

    async fn scroll_into_view(&self, locator: &Locator) -> Result<(), BrowserError> {
        let value = self.query(locator, Query::ScrollIntoView).await?;
        if value.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound(describe(locator)))
        }
    }

    async fn click(&self, locator: &Locator, options: ClickOptions) -> Result<(), BrowserError> {
        let point = self
            .poll(options.timeout, move || async move {
                let point = self.click_point(locator).await?;
                Ok::<_, BrowserError>(point.filter(|p| p.visible && p.hit))
            })
            .await?
            .ok_or_else(|| {
                BrowserError::NotClickable(format!(
                    "{} not clickable within {:?}",
                    describe(locator),
                    options.timeout
                ))
            })?;

        if options.trial {
            debug!("Trial click ok at ({}, {})", point.x, point.y);
            return Ok(());
        }

        self.session.click(point.x, point.y).await?;
        Ok(())
    }

    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), BrowserError> {
        Ok(self.session.wait_for_network_idle(timeout).await?)
    }
}
