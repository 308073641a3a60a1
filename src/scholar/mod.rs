// Google Scholar access: profile listing and per-publication detail pages.
//
// Scholar has no public API, so the client fetches the same HTML pages a
// browser would and scrapes them with CSS selectors. Parsing is kept in
// pure functions (profile, detail) so it can be tested against fixtures.

pub mod client;
pub mod detail;
pub mod profile;
pub mod traits;

use anyhow::Result;
use scraper::{ElementRef, Selector};

/// Compile a CSS selector, turning parse failures into ordinary errors.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Invalid CSS selector {css:?}: {e:?}"))
}

/// An element's text content with whitespace runs collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
