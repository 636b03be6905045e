//! DevTools JSON-RPC wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing command. `session_id` targets an attached page; `None` talks to
/// the browser target.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Incoming frame: a reply when `id` is set, otherwise an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
    pub method: Option<String>,
    pub params: Option<Value>,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Target created by `PUT /json/new`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    pub id: String,
    #[serde(default)]
    pub url: String,
}

/// `GET /json/version`. Chrome mixes key casing here.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    None,
    Left,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseEventType {
    MouseMoved,
    MousePressed,
    MouseReleased,
}

/// A change to the set of in-flight requests.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkEvent {
    Started(String),
    Finished(String),
}

impl NetworkEvent {
    /// `None` for events that neither start nor end a request.
    pub fn from_cdp(method: &str, params: Option<&Value>) -> Option<Self> {
        let request_id = params?.get("requestId")?.as_str()?.to_string();
        match method {
            "Network.requestWillBeSent" => Some(Self::Started(request_id)),
            "Network.loadingFinished" | "Network.loadingFailed" => Some(Self::Finished(request_id)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
