//! Page automation over the Chrome DevTools Protocol.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  foodroute      │ ◄──────────────► │   Chrome/Edge    │
//! │  (this crate)   │       CDP        │                  │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! [`BrowserManager`] connects to (or launches) Chrome with remote debugging
//! enabled and opens pages. A [`CdpPage`] wraps one page session and
//! implements [`BrowserPage`], the locator-based interface the scraper is
//! written against. Tests substitute in-memory pages for [`BrowserPage`].
//!
//! ## Setup
//!
//! Either let the manager launch Chrome, or start it yourself:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```

pub mod cdp;
mod cdp_page;
mod locator;
pub mod manager;
mod page;
mod resolver_script;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use cdp_page::CdpPage;
pub use locator::{Locator, Role, TextPattern};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
pub use page::{BrowserPage, ClickOptions};
