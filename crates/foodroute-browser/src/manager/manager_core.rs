//! Connection setup and the Chrome child process.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{BrowserError, BrowserManagerConfig};
use crate::cdp::CdpClient;

/// Overrides the executable search.
pub const CHROME_PATH_ENV: &str = "FOODROUTE_CHROME";

/// How long a freshly launched Chrome gets to open its debug port.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(6);
const STARTUP_POLL: Duration = Duration::from_millis(200);

#[cfg(target_os = "macos")]
const KNOWN_CHROME_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
];

#[cfg(target_os = "linux")]
const KNOWN_CHROME_PATHS: &[&str] = &[
    "/usr/bin/google-chrome-stable",
    "/usr/bin/google-chrome",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
];

#[cfg(target_os = "windows")]
const KNOWN_CHROME_PATHS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const KNOWN_CHROME_PATHS: &[&str] = &[];

/// Owns the CDP connection and, when it started one, the Chrome process.
pub struct BrowserManager {
    pub(super) config: BrowserManagerConfig,
    pub(super) client: RwLock<Option<Arc<CdpClient>>>,
    launched: RwLock<Option<Child>>,
}

impl BrowserManager {
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            launched: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// `$FOODROUTE_CHROME` if set, else the first installed Chrome or Chromium.
    pub fn find_chrome() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CHROME_PATH_ENV).map(PathBuf::from) {
            return Some(path);
        }
        KNOWN_CHROME_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    async fn endpoint_alive(&self) -> bool {
        reqwest::get(format!("{}/json/version", self.config.endpoint()))
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    pub(super) fn launch_args(&self) -> Vec<String> {
        let config = &self.config;
        let mut args = vec![
            format!("--remote-debugging-port={}", config.debug_port),
            format!("--user-data-dir={}", config.get_profile_dir().display()),
            format!("--window-size={},{}", config.viewport_width, config.viewport_height),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
        ];
        if config.headless {
            args.push("--headless=new".to_string());
        }
        args
    }

    async fn spawn_chrome(&self) -> Result<Child, BrowserError> {
        let executable = Self::find_chrome().ok_or(BrowserError::ChromeNotFound)?;
        let profile_dir = self.config.get_profile_dir();
        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Cannot create profile dir {}: {}", profile_dir.display(), e);
        }

        let child = Command::new(&executable)
            .args(self.launch_args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", executable.display(), e)))?;

        info!(
            "Launched {} (pid {:?}, profile {})",
            executable.display(),
            child.id(),
            profile_dir.display()
        );
        Ok(child)
    }

    async fn wait_for_endpoint(&self) -> Result<(), BrowserError> {
        let deadline = tokio::time::Instant::now() + STARTUP_TIMEOUT;
        while tokio::time::Instant::now() < deadline {
            tokio::time::sleep(STARTUP_POLL).await;
            if self.endpoint_alive().await {
                return Ok(());
            }
        }
        Err(BrowserError::LaunchFailed(format!(
            "no DevTools endpoint on port {} after {:?}",
            self.config.debug_port, STARTUP_TIMEOUT
        )))
    }

    /// Connect to Chrome on the debug port, launching it first when nothing
    /// is listening. Reuses an existing connection.
    pub async fn connect(&self) -> Result<(), BrowserError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        if self.endpoint_alive().await {
            debug!("Reusing Chrome on port {}", self.config.debug_port);
        } else {
            let child = self.spawn_chrome().await?;
            *self.launched.write().await = Some(child);
            self.wait_for_endpoint().await?;
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        info!("Connected to {}", client.browser_ws_url());
        *self.client.write().await = Some(Arc::new(client));
        Ok(())
    }

    pub(super) async fn client(&self) -> Result<Arc<CdpClient>, BrowserError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)
    }

    /// Drop the CDP connection, leaving Chrome running.
    pub async fn close(&self) -> Result<(), BrowserError> {
        if self.client.write().await.take().is_some() {
            debug!("Disconnected from Chrome");
        }
        Ok(())
    }

    /// Disconnect, then kill Chrome if this manager launched it.
    pub async fn shutdown(&self) -> Result<(), BrowserError> {
        self.close().await?;
        if let Some(mut child) = self.launched.write().await.take() {
            info!("Stopping Chrome (pid {:?})", child.id());
            if let Err(e) = child.kill().await {
                warn!("Failed to stop Chrome: {}", e);
            }
        }
        Ok(())
    }
}
