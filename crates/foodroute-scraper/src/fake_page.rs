//! In-memory [`BrowserPage`] for scraper tests.

use std::time::Duration;

use async_trait::async_trait;
use foodroute_browser::{BrowserError, BrowserPage, ClickOptions, Locator};
use parking_lot::Mutex;

pub(crate) const NAME_SELECTOR: &str = ".css-11vv3pc";

/// A clickable control the fake knows about, matched by exact locator.
#[derive(Debug, Clone)]
pub(crate) struct FakeControl {
    pub locator: Locator,
    pub text: String,
    pub visible: bool,
    pub clickable: bool,
    /// Name nodes rendered by a real click.
    pub reveals: usize,
}

impl FakeControl {
    pub fn new(locator: Locator, text: &str) -> Self {
        Self {
            locator,
            text: text.to_string(),
            visible: true,
            clickable: true,
            reveals: 0,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeState {
    /// Every name the listing could show, in page order.
    pub names: Vec<String>,
    /// How many of `names` are currently rendered.
    pub rendered: usize,
    /// Nodes rendered by the n-th scroll; scrolls past the end add nothing.
    pub growth_per_scroll: Vec<usize>,
    pub scrolls: usize,
    pub controls: Vec<FakeControl>,
    /// `(locator, trial)` for every click that went through.
    pub clicks: Vec<(Locator, bool)>,
    /// Number of upcoming `count` calls that fail.
    pub count_failures: usize,
    /// Name node indices whose text cannot be read.
    pub unreadable: Vec<usize>,
    /// Fail every lookup that is not a name node.
    pub broken_lookups: bool,
    pub network_idle_calls: usize,
}

pub(crate) struct FakePage {
    pub state: Mutex<FakeState>,
}

impl FakePage {
    pub fn new(state: FakeState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn with_names(names: &[&str], rendered: usize) -> Self {
        Self::new(FakeState {
            names: names.iter().map(|n| n.to_string()).collect(),
            rendered,
            ..Default::default()
        })
    }

    pub fn scrolls(&self) -> usize {
        self.state.lock().scrolls
    }

    pub fn clicks(&self) -> Vec<(Locator, bool)> {
        self.state.lock().clicks.clone()
    }
}

fn is_names(locator: &Locator) -> bool {
    matches!(locator, Locator::Css { selector } if selector == NAME_SELECTOR)
}

fn name_index(locator: &Locator) -> Option<usize> {
    match locator {
        Locator::Nth { inner, index } if is_names(inner) => Some(*index),
        _ => None,
    }
}

fn not_found(locator: &Locator) -> BrowserError {
    BrowserError::ElementNotFound(format!("{:?}", locator))
}

#[async_trait]
impl BrowserPage for FakePage {
    async fn scroll_by_viewport(&self, _fraction: f64) -> Result<(), BrowserError> {
        let mut state = self.state.lock();
        let grow = state.growth_per_scroll.get(state.scrolls).copied().unwrap_or(0);
        state.scrolls += 1;
        state.rendered = (state.rendered + grow).min(state.names.len());
        Ok(())
    }

    async fn count(&self, locator: &Locator) -> Result<usize, BrowserError> {
        let mut state = self.state.lock();
        if is_names(locator) {
            if state.count_failures > 0 {
                state.count_failures -= 1;
                return Err(BrowserError::ActionFailed("detached".to_string()));
            }
            return Ok(state.rendered);
        }
        Ok(state.controls.iter().filter(|c| &c.locator == locator).count())
    }

    async fn is_visible(&self, locator: &Locator, _timeout: Duration) -> Result<bool, BrowserError> {
        let state = self.state.lock();
        if let Some(index) = name_index(locator) {
            return Ok(index < state.rendered);
        }
        if state.broken_lookups {
            return Err(BrowserError::Timeout(format!("{:?}", locator)));
        }
        Ok(state
            .controls
            .iter()
            .any(|c| &c.locator == locator && c.visible))
    }

    async fn inner_text(&self, locator: &Locator) -> Result<String, BrowserError> {
        let state = self.state.lock();
        if state.broken_lookups {
            return Err(not_found(locator));
        }
        state
            .controls
            .iter()
            .find(|c| &c.locator == locator)
            .map(|c| c.text.clone())
            .ok_or_else(|| not_found(locator))
    }

    async fn text_content(
        &self,
        locator: &Locator,
        _timeout: Duration,
    ) -> Result<Option<String>, BrowserError> {
        let state = self.state.lock();
        match name_index(locator) {
            Some(index) if index < state.rendered && !state.unreadable.contains(&index) => {
                Ok(Some(state.names[index].clone()))
            }
            _ => Err(BrowserError::Timeout(format!("{:?}", locator))),
        }
    }

    async fn scroll_into_view(&self, locator: &Locator) -> Result<(), BrowserError> {
        let state = self.state.lock();
        let exists = match name_index(locator) {
            Some(index) => index < state.rendered,
            None => state.controls.iter().any(|c| &c.locator == locator),
        };
        if exists { Ok(()) } else { Err(not_found(locator)) }
    }

    async fn click(&self, locator: &Locator, options: ClickOptions) -> Result<(), BrowserError> {
        let mut state = self.state.lock();
        if state.broken_lookups {
            return Err(not_found(locator));
        }
        let control = state
            .controls
            .iter()
            .find(|c| &c.locator == locator && c.visible && c.clickable)
            .cloned()
            .ok_or_else(|| BrowserError::NotClickable(format!("{:?}", locator)))?;

        state.clicks.push((locator.clone(), options.trial));
        if !options.trial {
            state.rendered = (state.rendered + control.reveals).min(state.names.len());
        }
        Ok(())
    }

    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), BrowserError> {
        let mut state = self.state.lock();
        state.network_idle_calls += 1;
        Err(BrowserError::Timeout(format!("network busy after {:?}", timeout)))
    }
}
