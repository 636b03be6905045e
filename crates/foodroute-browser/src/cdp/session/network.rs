//! Network-idle tracking for CDP page session.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Notify;
use tracing::trace;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::NetworkEvent;

use super::core::PageSession;

/// How long the page must stay without in-flight requests to count as idle.
pub const NETWORK_QUIET: Duration = Duration::from_millis(500);

/// Set of request ids that have started but not finished.
#[derive(Debug, Default)]
pub(crate) struct InFlightRequests {
    ids: HashSet<String>,
}

impl InFlightRequests {
    pub(crate) fn apply(&mut self, event: NetworkEvent) {
        match event {
            NetworkEvent::Started(id) => {
                self.ids.insert(id);
            }
            NetworkEvent::Finished(id) => {
                self.ids.remove(&id);
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }
}

struct Activity {
    in_flight: InFlightRequests,
    last_change: Instant,
}

/// In-flight requests of one page, fed by the client's receive loop.
///
/// Events are applied as they arrive; anything that is not a request
/// start or end is discarded, so nothing accumulates between waits.
pub(crate) struct NetworkTracker {
    activity: Mutex<Activity>,
    changed: Notify,
    closed: AtomicBool,
    waiters: tokio::sync::Mutex<()>,
}

impl NetworkTracker {
    pub(crate) fn new() -> Self {
        Self {
            activity: Mutex::new(Activity {
                in_flight: InFlightRequests::default(),
                last_change: Instant::now(),
            }),
            changed: Notify::new(),
            closed: AtomicBool::new(false),
            waiters: tokio::sync::Mutex::new(()),
        }
    }

    /// Apply one CDP event. Returns whether it touched the in-flight set.
    pub(crate) fn observe(&self, method: &str, params: Option<&Value>) -> bool {
        let Some(event) = NetworkEvent::from_cdp(method, params) else {
            return false;
        };
        trace!("Network event: {:?}", event);
        {
            let mut activity = self.activity.lock();
            activity.in_flight.apply(event);
            activity.last_change = Instant::now();
        }
        self.changed.notify_one();
        true
    }

    /// Mark the session gone; pending waits fail with `SessionClosed`.
    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.changed.notify_one();
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.activity.lock().in_flight.len()
    }

    /// Wait until no request has been in flight for [`NETWORK_QUIET`].
    pub(crate) async fn wait_for_idle(&self, timeout: Duration) -> Result<(), CdpError> {
        let _turn = self.waiters.lock().await;
        let deadline = Instant::now() + timeout;

        loop {
            if self.closed.load(Ordering::SeqCst) {
                return Err(CdpError::SessionClosed);
            }

            let (pending, last_change) = {
                let activity = self.activity.lock();
                (activity.in_flight.len(), activity.last_change)
            };
            let now = Instant::now();
            if pending == 0 && now.duration_since(last_change) >= NETWORK_QUIET {
                return Ok(());
            }
            if now >= deadline {
                return Err(CdpError::Timeout(format!(
                    "network idle ({} requests still in flight after {:?})",
                    pending, timeout
                )));
            }

            let wake = if pending == 0 {
                (last_change + NETWORK_QUIET).min(deadline)
            } else {
                deadline
            };

            tokio::select! {
                _ = self.changed.notified() => {}
                _ = tokio::time::sleep_until(wake.into()) => {}
            }
        }
    }
}

impl PageSession {
    /// Wait until no request has been in flight for [`NETWORK_QUIET`].
    pub async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), CdpError> {
        self.network.wait_for_idle(timeout).await
    }
}
