//! Interaction candidates.
//!
//! Overlays and the "view all" control are both found by trying an ordered
//! list of locators. Each entry is a [`CandidateMatcher`]: it first decides
//! whether it applies to the page as it is now, then performs its interaction.

use std::time::Duration;

use async_trait::async_trait;
use foodroute_browser::{BrowserError, BrowserPage, ClickOptions, Locator, TextPattern};
use tracing::debug;

/// One strategy for finding and clicking a control.
#[async_trait]
pub trait CandidateMatcher: Send + Sync {
    /// Short label for logs.
    fn describe(&self) -> &str;

    /// Whether the control is on the page and worth interacting with.
    ///
    /// Lookup failures count as "not applicable".
    async fn is_applicable(&self, page: &dyn BrowserPage) -> bool;

    /// Interact with the control.
    async fn attempt_interact(&self, page: &dyn BrowserPage) -> Result<(), BrowserError>;
}

/// Click a locator when it becomes visible, then let the layout settle.
pub struct LocatorCandidate {
    label: String,
    locator: Locator,
    visible_timeout: Duration,
    click_timeout: Duration,
    settle: Duration,
}

impl LocatorCandidate {
    pub fn new(label: impl Into<String>, locator: Locator) -> Self {
        Self {
            label: label.into(),
            locator,
            visible_timeout: Duration::from_millis(1500),
            click_timeout: Duration::from_millis(3000),
            settle: Duration::from_millis(250),
        }
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }
}

#[async_trait]
impl CandidateMatcher for LocatorCandidate {
    fn describe(&self) -> &str {
        &self.label
    }

    async fn is_applicable(&self, page: &dyn BrowserPage) -> bool {
        page.is_visible(&self.locator, self.visible_timeout)
            .await
            .unwrap_or(false)
    }

    async fn attempt_interact(&self, page: &dyn BrowserPage) -> Result<(), BrowserError> {
        page.click(&self.locator, ClickOptions::new(self.click_timeout))
            .await?;
        tokio::time::sleep(self.settle).await;
        Ok(())
    }
}

/// A candidate for the listing's "view all ... restaurants" control.
///
/// Applies only when its first match is visible and its text mentions both
/// "view all" and "restaurant". The generic fallbacks (such as the last
/// button on the page) go through the same text check.
pub struct ViewAllCandidate {
    label: String,
    locator: Locator,
}

impl ViewAllCandidate {
    const VISIBLE_TIMEOUT: Duration = Duration::from_millis(1200);
    const TRIAL_TIMEOUT: Duration = Duration::from_millis(2000);
    const CLICK_TIMEOUT: Duration = Duration::from_millis(4000);

    pub fn new(label: impl Into<String>, locator: Locator) -> Self {
        Self {
            label: label.into(),
            locator: locator.first(),
        }
    }

    /// Ordered candidates, most specific first.
    pub fn defaults() -> Vec<Box<dyn CandidateMatcher>> {
        use foodroute_browser::Role;

        let candidates = vec![
            ViewAllCandidate::new(
                "button: view all N available restaurants",
                Locator::named(Role::Button, r"view all\s+\d+\s+available restaurants"),
            ),
            ViewAllCandidate::new(
                "button: view all restaurants",
                Locator::named(Role::Button, "view all.*restaurants"),
            ),
            ViewAllCandidate::new(
                "link: view all restaurants",
                Locator::named(Role::Link, "view all.*restaurants"),
            ),
            ViewAllCandidate::new(
                "button containing view all restaurants",
                Locator::css("button").has_text("view all.*restaurants"),
            ),
            ViewAllCandidate::new(
                "text: view all restaurants",
                Locator::text(r"^\s*view all\b.*restaurants\s*$"),
            ),
            ViewAllCandidate::new("last button", Locator::css("button").last()),
        ];

        candidates
            .into_iter()
            .map(|c| Box::new(c) as Box<dyn CandidateMatcher>)
            .collect()
    }

    pub(crate) fn text_qualifies(text: &str) -> bool {
        TextPattern::new("view all").is_match(text) && TextPattern::new("restaurant").is_match(text)
    }
}

#[async_trait]
impl CandidateMatcher for ViewAllCandidate {
    fn describe(&self) -> &str {
        &self.label
    }

    async fn is_applicable(&self, page: &dyn BrowserPage) -> bool {
        let visible = page
            .is_visible(&self.locator, Self::VISIBLE_TIMEOUT)
            .await
            .unwrap_or(false);
        if !visible {
            return false;
        }

        let text = page.inner_text(&self.locator).await.unwrap_or_default();
        let qualifies = Self::text_qualifies(&text);
        if !qualifies {
            debug!("Skipping '{}': text {:?} is not a view-all control", self.label, text);
        }
        qualifies
    }

    async fn attempt_interact(&self, page: &dyn BrowserPage) -> Result<(), BrowserError> {
        let _ = page.scroll_into_view(&self.locator).await;
        // A failed trial only means the real click has to wait for the element.
        let _ = page
            .click(&self.locator, ClickOptions::trial(Self::TRIAL_TIMEOUT))
            .await;
        page.click(&self.locator, ClickOptions::new(Self::CLICK_TIMEOUT))
            .await
    }
}

#[cfg(test)]
#[path = "candidate_tests.rs"]
mod tests;
