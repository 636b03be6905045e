//! # foodroute scraper
//!
//! Collects restaurant names from a lazily rendered delivery listing.
//!
//! The scrape runs in four steps against any [`BrowserPage`]:
//!
//! 1. dismiss consent overlays ([`dismiss_overlays`])
//! 2. try to expand the listing through its "view all" control
//! 3. scroll until the number of name nodes stops growing
//! 4. read every name node in page order
//!
//! Only the final count of name nodes is allowed to fail the scrape; every
//! other step degrades to "nothing happened".
//!
//! [`BrowserPage`]: foodroute_browser::BrowserPage

mod candidate;
mod listing;
mod overlay;

pub use candidate::{CandidateMatcher, LocatorCandidate, ViewAllCandidate};
pub use listing::{scrape_restaurant_names, ScrapeSettings};
pub use overlay::{default_overlay_candidates, dismiss_overlays};

#[cfg(test)]
mod fake_page;
