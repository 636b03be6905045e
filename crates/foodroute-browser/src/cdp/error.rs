//! DevTools connection errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Nothing answered `/json/version` on the debug endpoint.
    #[error("No DevTools endpoint at {0}; is Chrome running with --remote-debugging-port?")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// An `error` object in a JSON-RPC reply.
    #[error("CDP error {code}: {message}")]
    Protocol { code: i64, message: String },

    #[error("Malformed CDP message: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Endpoint discovery failed: {0}")]
    Http(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// An exception thrown by evaluated page script.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    /// The socket closed before a reply arrived.
    #[error("DevTools session closed")]
    SessionClosed,

    #[error("Unexpected CDP reply: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        Self::ConnectionFailed(format!("bad endpoint URL: {}", e))
    }
}
