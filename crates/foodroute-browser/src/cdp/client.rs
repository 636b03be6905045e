//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::SplitStream;
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpResponse, PageInfo};
use super::session::{NetworkTracker, PageSession};
use super::transport::{Transport, WsStream};

type WsSource = SplitStream<WsStream>;
type EventHandlers = Arc<RwLock<HashMap<String, Arc<NetworkTracker>>>>;

/// Browser-level CDP connection.
///
/// Owns the WebSocket, dispatches responses to waiting callers and feeds
/// each page's network events to that page's tracker.
pub struct CdpClient {
    http_endpoint: String,
    browser_ws_url: String,
    transport: Arc<Transport>,
    event_handlers: EventHandlers,
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at a debugging endpoint such as `http://localhost:9222`.
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();
        url::Url::parse(&http_endpoint)?;

        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);

        let version: BrowserVersion = reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?;

        debug!("Found {}", version.browser);

        let browser_ws_url = version.web_socket_debugger_url;
        let (ws_stream, _) = tokio_tungstenite::connect_async(browser_ws_url.as_str())
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let transport = Arc::new(Transport::new(ws_sink));
        let event_handlers: EventHandlers = Arc::new(RwLock::new(HashMap::new()));

        let recv_task = {
            let transport = transport.clone();
            let event_handlers = event_handlers.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, transport, event_handlers).await;
            })
        };

        debug!("CDP client connected to {}", browser_ws_url);

        Ok(Self {
            http_endpoint,
            browser_ws_url,
            transport,
            event_handlers,
            recv_task,
        })
    }

    async fn receive_loop(mut ws_source: WsSource, transport: Arc<Transport>, event_handlers: EventHandlers) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    let resp = match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => resp,
                        Err(e) => {
                            warn!("Failed to parse CDP message: {}", e);
                            continue;
                        }
                    };

                    if let Some(id) = resp.id {
                        let result = match resp.error {
                            Some(error) => Err(CdpError::Protocol {
                                code: error.code,
                                message: error.message,
                            }),
                            None => Ok(resp.result.unwrap_or(Value::Null)),
                        };
                        transport.resolve(id, result);
                    } else if let (Some(method), Some(session_id)) = (&resp.method, &resp.session_id) {
                        let handlers = event_handlers.read().await;
                        if let Some(tracker) = handlers.get(session_id) {
                            tracker.observe(method, resp.params.as_ref());
                        }
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        transport.fail_all();
        for tracker in event_handlers.read().await.values() {
            tracker.close();
        }
    }

    /// Send a browser-level CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// Browser WebSocket URL.
    pub fn browser_ws_url(&self) -> &str {
        &self.browser_ws_url
    }

    /// Open a new tab and attach a flattened session to it.
    pub async fn new_page(&self, url: Option<&str>) -> Result<PageSession, CdpError> {
        // Chrome only accepts PUT on /json/new.
        let create_url = match url {
            Some(u) => format!("{}/json/new?{}", self.http_endpoint, u),
            None => format!("{}/json/new", self.http_endpoint),
        };

        let page_info: PageInfo = reqwest::Client::new()
            .put(&create_url)
            .send()
            .await?
            .json()
            .await?;
        debug!("Created target {} ({})", page_info.id, page_info.url);

        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": page_info.id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let tracker = Arc::new(NetworkTracker::new());
        self.event_handlers
            .write()
            .await
            .insert(session_id.clone(), tracker.clone());

        let session = PageSession::new(page_info.id, session_id, self.transport.clone(), tracker);
        if let Err(e) = session.enable_domains().await {
            if let Err(close_err) = self.close_page(&session).await {
                warn!("Failed to close page {}: {}", session.target_id(), close_err);
            }
            return Err(e);
        }

        Ok(session)
    }

    /// Close a page and stop routing its events.
    pub async fn close_page(&self, session: &PageSession) -> Result<(), CdpError> {
        if let Some(tracker) = self.event_handlers.write().await.remove(session.session_id()) {
            tracker.close();
        }
        self.call(
            "Target.closeTarget",
            Some(json!({"targetId": session.target_id()})),
        )
        .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}
