//! Element locators.
//!
//! A [`Locator`] is a small query tree. It serializes to JSON so the CDP page
//! can hand it to the in-page resolver, and in-memory pages can match on it
//! directly in tests.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// ARIA roles the scraper looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Button,
    Link,
    Dialog,
}

/// Case-insensitive regular expression over visible text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextPattern(String);

impl TextPattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn source(&self) -> &str {
        &self.0
    }

    /// Whether `text` matches. An invalid pattern matches nothing.
    pub fn is_match(&self, text: &str) -> bool {
        RegexBuilder::new(&self.0)
            .case_insensitive(true)
            .build()
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    }
}

impl From<&str> for TextPattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

/// How to find elements on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Locator {
    /// Elements matching a CSS selector.
    Css { selector: String },
    /// Elements with an ARIA role, optionally filtered by accessible name.
    Role {
        role: Role,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<TextPattern>,
    },
    /// Innermost elements whose text matches.
    Text { pattern: TextPattern },
    /// `inner` resolved under each element of `scope`.
    Within {
        scope: Box<Locator>,
        inner: Box<Locator>,
    },
    /// `inner` resolved inside the documents of the iframes `frame` matches.
    Frame {
        frame: Box<Locator>,
        inner: Box<Locator>,
    },
    /// Elements of `inner` whose text matches.
    HasText {
        inner: Box<Locator>,
        pattern: TextPattern,
    },
    /// Last element of `inner`.
    Last { inner: Box<Locator> },
    /// Element `index` (zero-based) of `inner`.
    Nth { inner: Box<Locator>, index: usize },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css {
            selector: selector.into(),
        }
    }

    pub fn role(role: Role) -> Self {
        Locator::Role { role, name: None }
    }

    /// Role locator whose accessible name matches `pattern`.
    pub fn named(role: Role, pattern: impl Into<TextPattern>) -> Self {
        Locator::Role {
            role,
            name: Some(pattern.into()),
        }
    }

    pub fn text(pattern: impl Into<TextPattern>) -> Self {
        Locator::Text {
            pattern: pattern.into(),
        }
    }

    /// Resolve `inner` under this locator's elements.
    pub fn within(self, inner: Locator) -> Self {
        Locator::Within {
            scope: Box::new(self),
            inner: Box::new(inner),
        }
    }

    /// Resolve `inner` inside the iframe this locator matches.
    pub fn in_frame(self, inner: Locator) -> Self {
        Locator::Frame {
            frame: Box::new(self),
            inner: Box::new(inner),
        }
    }

    pub fn has_text(self, pattern: impl Into<TextPattern>) -> Self {
        Locator::HasText {
            inner: Box::new(self),
            pattern: pattern.into(),
        }
    }

    pub fn last(self) -> Self {
        Locator::Last {
            inner: Box::new(self),
        }
    }

    pub fn nth(self, index: usize) -> Self {
        Locator::Nth {
            inner: Box::new(self),
            index,
        }
    }

    pub fn first(self) -> Self {
        self.nth(0)
    }
}
