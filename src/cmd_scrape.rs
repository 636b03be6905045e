//! Listing scrape command.

use tracing::{info, warn};

use foodroute_browser::{BrowserManager, BrowserManagerConfig};
use foodroute_config::{BrowserConfig, Config, ConfigError};
use foodroute_protocols::{save_typed, KeyValueStore};
use foodroute_scraper::{scrape_restaurant_names, ScrapeSettings};
use foodroute_store::KEY_RESTAURANT_NAMES;

pub(crate) fn manager_config(config: &BrowserConfig) -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: config.debug_port,
        viewport_width: config.viewport_width,
        viewport_height: config.viewport_height,
        profile_dir: config.profile_dir.clone(),
        headless: config.headless,
    }
}

/// Open the listing, scrape names and store them under `restaurant_names`.
pub(crate) async fn scrape(
    config: &Config,
    store: &dyn KeyValueStore,
    url: Option<String>,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let url = url
        .filter(|u| !u.trim().is_empty())
        .or_else(|| config.scraper.resolved_listing_url())
        .ok_or_else(|| ConfigError::MissingField("scraper.listing_url".to_string()))?;

    let manager = BrowserManager::new(manager_config(&config.browser));
    info!("Opening listing: {}", url);

    let page = match manager.open_page(&url).await {
        Ok(page) => page,
        Err(e) => {
            if let Err(shutdown_err) = manager.shutdown().await {
                warn!("Browser shutdown failed: {}", shutdown_err);
            }
            return Err(e.into());
        }
    };

    let result = scrape_restaurant_names(&page, &ScrapeSettings::from(&config.scraper)).await;

    if let Err(e) = manager.close_page(&page).await {
        warn!("Failed to close page: {}", e);
    }
    if let Err(e) = manager.shutdown().await {
        warn!("Browser shutdown failed: {}", e);
    }

    let names = result?;
    save_typed(store, KEY_RESTAURANT_NAMES, &names).await?;
    info!("Stored {} names under {}", names.len(), KEY_RESTAURANT_NAMES);
    Ok(names)
}
