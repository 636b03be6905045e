//! In-page locator resolver.
//!
//! Each query is a self-contained expression: the resolver source followed by
//! one operation on the elements a locator resolves to.

use serde_json::Value;

use crate::locator::Locator;

const RESOLVER_SOURCE: &str = include_str!("resolver.js");

/// Operation to run on the resolved elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Query {
    /// Number of matches.
    Count,
    /// Whether the first match is visible.
    Visible,
    /// `innerText` of the first match, or null.
    InnerText,
    /// `textContent` of the first match, or null.
    TextContent,
    /// Scroll the first match into view; false when nothing matched.
    ScrollIntoView,
    /// `{x, y, hit, visible}` for the first match, or null.
    ClickPoint,
}

impl Query {
    fn body(self) -> &'static str {
        match self {
            Query::Count => "return els.length;",
            Query::Visible => "return els.length > 0 && isVisible(els[0]);",
            Query::InnerText => "return els.length ? textOf(els[0]) : null;",
            Query::TextContent => "return els.length ? els[0].textContent : null;",
            Query::ScrollIntoView => {
                "if (!els.length) return false; els[0].scrollIntoView({block: 'center'}); return true;"
            }
            Query::ClickPoint => "return els.length ? clickPoint(els[0]) : null;",
        }
    }
}

/// Build the expression evaluating `query` against `locator`.
pub(crate) fn build_query(locator: &Locator, query: Query) -> Result<String, serde_json::Error> {
    let encoded: Value = serde_json::to_value(locator)?;
    Ok(format!(
        "(() => {{\n{}\nconst els = resolve({});\n{}\n}})()",
        RESOLVER_SOURCE,
        encoded,
        query.body()
    ))
}
