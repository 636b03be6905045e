//! Consent and modal overlay dismissal.

use foodroute_browser::{BrowserPage, Locator, Role};
use tracing::{debug, info};

use crate::candidate::{CandidateMatcher, LocatorCandidate};

/// Overlay candidates in the order they are tried.
pub fn default_overlay_candidates() -> Vec<Box<dyn CandidateMatcher>> {
    let candidates = vec![
        LocatorCandidate::new(
            "accept button",
            Locator::named(Role::Button, "accept all|accept|agree|allow"),
        ),
        LocatorCandidate::new(
            "dialog ok/close button",
            Locator::role(Role::Dialog).within(Locator::named(Role::Button, "ok|close|got it")),
        ),
        LocatorCandidate::new(
            "accept-cookies attribute",
            Locator::css(r#"[aria-label*="accept cookies" i], [id*="accept"]"#),
        ),
        LocatorCandidate::new("OK button", Locator::css("button").has_text("OK")),
        LocatorCandidate::new(
            "consent iframe button",
            Locator::css(r#"iframe[title*="consent" i], iframe[id*="sp_message_iframe" i]"#)
                .in_frame(Locator::css(r#"button, [role="button"]"#).has_text("accept|agree|ok"))
                .first(),
        ),
    ];

    candidates
        .into_iter()
        .map(|c| Box::new(c) as Box<dyn CandidateMatcher>)
        .collect()
}

/// Click through every applicable overlay candidate, in order.
///
/// Never fails: candidates that are absent or refuse the click are skipped.
pub async fn dismiss_overlays(page: &dyn BrowserPage, candidates: &[Box<dyn CandidateMatcher>]) {
    for candidate in candidates {
        if !candidate.is_applicable(page).await {
            continue;
        }
        match candidate.attempt_interact(page).await {
            Ok(()) => info!("Dismissed overlay via {}", candidate.describe()),
            Err(e) => debug!("Overlay candidate {} not clickable: {}", candidate.describe(), e),
        }
    }
}
