//! Scroll-and-collect listing scraper.

use std::time::Duration;

use foodroute_browser::{BrowserError, BrowserPage, Locator};
use foodroute_config::ScraperConfig;
use tracing::{debug, info, warn};

use crate::candidate::{CandidateMatcher, ViewAllCandidate};
use crate::overlay::{default_overlay_candidates, dismiss_overlays};

/// Tunables for [`scrape_restaurant_names`].
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// CSS selector of the nodes holding restaurant names.
    pub name_selector: String,
    /// Scrolls made to reveal the "view all" control.
    pub reveal_scrolls: u32,
    /// Scrolls made after clicking "view all" to trigger rendering.
    pub post_click_scrolls: u32,
    /// Upper bound on stabilization scrolls.
    pub max_scrolls: u32,
    /// Consecutive unchanged counts that end stabilization.
    pub stable_cycles: u32,
    /// Fraction of the viewport height advanced per scroll.
    pub scroll_fraction: f64,
    pub reveal_settle: Duration,
    pub scroll_settle: Duration,
    pub network_idle_timeout: Duration,
    pub click_settle: Duration,
    pub node_read_timeout: Duration,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self::from(&ScraperConfig::default())
    }
}

impl From<&ScraperConfig> for ScrapeSettings {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            name_selector: config.name_selector.clone(),
            reveal_scrolls: config.reveal_scrolls,
            post_click_scrolls: config.post_click_scrolls,
            max_scrolls: config.max_scrolls,
            stable_cycles: config.stable_cycles,
            scroll_fraction: config.scroll_fraction,
            reveal_settle: Duration::from_millis(config.reveal_settle_ms),
            scroll_settle: Duration::from_millis(config.scroll_settle_ms),
            network_idle_timeout: Duration::from_millis(config.network_idle_timeout_ms),
            click_settle: Duration::from_millis(config.click_settle_ms),
            node_read_timeout: Duration::from_millis(config.node_read_timeout_ms),
        }
    }
}

impl ScrapeSettings {
    fn names(&self) -> Locator {
        Locator::css(self.name_selector.clone())
    }

    /// Same settings with every delay set to zero.
    pub fn without_delays(mut self) -> Self {
        self.reveal_settle = Duration::ZERO;
        self.scroll_settle = Duration::ZERO;
        self.click_settle = Duration::ZERO;
        self
    }
}

/// Scrape restaurant names from a page showing a delivery listing.
///
/// Returns trimmed, non-empty names in page order. Overlay, expansion and
/// per-node failures are absorbed; only a failure to count the name nodes
/// for the final pass is returned.
pub async fn scrape_restaurant_names(
    page: &dyn BrowserPage,
    settings: &ScrapeSettings,
) -> Result<Vec<String>, BrowserError> {
    dismiss_overlays(page, &default_overlay_candidates()).await;

    let expanded = expand_listing(page, settings, &ViewAllCandidate::defaults()).await;
    debug!("Listing expanded: {}", expanded);

    let scrolls = load_until_stable(page, settings).await;
    debug!("Stabilized after {} scrolls", scrolls);

    let names = collect_names(page, settings).await?;
    info!("Scraped {} restaurant names", names.len());
    Ok(names)
}

async fn scroll_times(page: &dyn BrowserPage, settings: &ScrapeSettings, times: u32, settle: Duration) {
    for _ in 0..times {
        if let Err(e) = page.scroll_by_viewport(settings.scroll_fraction).await {
            debug!("Scroll failed: {}", e);
        }
        tokio::time::sleep(settle).await;
    }
}

/// Try each "view all" candidate until one grows the listing.
///
/// Returns whether the number of name nodes increased.
pub(crate) async fn expand_listing(
    page: &dyn BrowserPage,
    settings: &ScrapeSettings,
    candidates: &[Box<dyn CandidateMatcher>],
) -> bool {
    scroll_times(page, settings, settings.reveal_scrolls, settings.reveal_settle).await;

    let names = settings.names();
    let before = page.count(&names).await.unwrap_or(0);

    for candidate in candidates {
        if !candidate.is_applicable(page).await {
            continue;
        }

        if let Err(e) = candidate.attempt_interact(page).await {
            debug!("View-all candidate {} failed: {}", candidate.describe(), e);
            continue;
        }

        if let Err(e) = page.wait_for_network_idle(settings.network_idle_timeout).await {
            debug!("Network did not go idle: {}", e);
        }
        tokio::time::sleep(settings.click_settle).await;

        scroll_times(page, settings, settings.post_click_scrolls, settings.reveal_settle).await;

        let after = page.count(&names).await.unwrap_or(0);
        if after > before {
            info!(
                "Expanded listing via {} ({} -> {} names)",
                candidate.describe(),
                before,
                after
            );
            return true;
        }
        debug!("Clicked {} but listing did not grow", candidate.describe());
    }

    false
}

/// Scroll until the name count is unchanged for `stable_cycles` scrolls.
///
/// Returns the number of scrolls made. A failed count reads as unchanged.
pub(crate) async fn load_until_stable(page: &dyn BrowserPage, settings: &ScrapeSettings) -> u32 {
    let names = settings.names();
    let mut last_count: Option<usize> = None;
    let mut stable = 0;

    for scroll in 1..=settings.max_scrolls {
        if let Err(e) = page.scroll_by_viewport(settings.scroll_fraction).await {
            debug!("Scroll failed: {}", e);
        }
        tokio::time::sleep(settings.scroll_settle).await;

        let count = match page.count(&names).await {
            Ok(count) => Some(count),
            Err(e) => {
                debug!("Count failed, treating as unchanged: {}", e);
                last_count
            }
        };

        if count == last_count {
            stable += 1;
            if stable >= settings.stable_cycles {
                return scroll;
            }
        } else {
            stable = 0;
            last_count = count;
        }
    }

    warn!("Listing still growing after {} scrolls", settings.max_scrolls);
    settings.max_scrolls
}

/// Read every name node by index.
async fn collect_names(
    page: &dyn BrowserPage,
    settings: &ScrapeSettings,
) -> Result<Vec<String>, BrowserError> {
    let names = settings.names();
    let total = page.count(&names).await?;
    let mut collected = Vec::with_capacity(total);

    for index in 0..total {
        let node = names.clone().nth(index);
        let _ = page.scroll_into_view(&node).await;

        match page.text_content(&node, settings.node_read_timeout).await {
            Ok(Some(text)) => {
                let name = text.trim();
                if !name.is_empty() {
                    collected.push(name.to_string());
                }
            }
            Ok(None) => {}
            Err(e) => debug!("Skipping name node {}: {}", index, e),
        }
    }

    Ok(collected)
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
