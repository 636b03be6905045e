//! BrowserManager page lifecycle.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use super::{BrowserError, BrowserManager};
use crate::cdp::PageSession;
use crate::cdp_page::CdpPage;

impl BrowserManager {
    /// Open a tab, size its viewport and navigate it to `url`.
    ///
    /// The tab is closed again when sizing or navigation fails.
    pub async fn open_page(&self, url: &str) -> Result<CdpPage, BrowserError> {
        self.connect().await?;
        let client = self.client().await?;

        let session = client.new_page(None).await?;
        if let Err(e) = self.prepare_page(&session, url).await {
            if let Err(close_err) = client.close_page(&session).await {
                warn!("Failed to close page {}: {}", session.target_id(), close_err);
            }
            return Err(e);
        }

        debug!("Opened page {} at {}", session.target_id(), url);
        Ok(CdpPage::new(Arc::new(session)))
    }

    async fn prepare_page(&self, session: &PageSession, url: &str) -> Result<(), BrowserError> {
        session
            .call(
                "Emulation.setDeviceMetricsOverride",
                Some(json!({
                    "width": self.config.viewport_width,
                    "height": self.config.viewport_height,
                    "deviceScaleFactor": 1,
                    "mobile": false,
                })),
            )
            .await?;
        session.navigate(url).await?;
        Ok(())
    }

    /// Close a page opened with [`BrowserManager::open_page`].
    pub async fn close_page(&self, page: &CdpPage) -> Result<(), BrowserError> {
        let client = self.client().await?;
        client.close_page(page.session()).await?;
        debug!("Closed page {}", page.session().target_id());
        Ok(())
    }
}
