//! Text helpers shared by the HTML extractors.

use scraper::ElementRef;

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element: its text nodes concatenated as the markup
/// presents them, with whitespace runs collapsed. `None` when nothing remains.
pub fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = collapse_whitespace(&element.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}
