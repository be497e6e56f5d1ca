//! FAQ page abstraction.
//!
//! The extractor only needs to list the accordion headers, read them,
//! expand them and read the answer next to them. [`FaqPage`] captures
//! that, so the same extraction runs against a live browser tab or a
//! parsed HTML snapshot.

use scraper::{ElementRef, Html, Selector};

use crate::text::element_text;

use super::error::FaqError;

/// Collapsed accordion headers holding the questions.
pub const DEFAULT_QUESTION_SELECTOR: &str = ".ckeditor-accordion dt";

/// A page of collapsible question headers.
#[allow(async_fn_in_trait)]
pub trait FaqPage {
    /// Handle to one question header.
    type Header;

    /// All question headers, in document order.
    async fn headers(&self) -> Result<Vec<Self::Header>, FaqError>;

    /// Raw text of a header, before normalization.
    async fn question(&self, header: &Self::Header) -> Result<String, FaqError>;

    /// Expand a header the way a user would.
    async fn expand(&self, header: &Self::Header) -> Result<(), FaqError>;

    /// Expand a header from script, when a native click fails.
    async fn expand_by_script(&self, header: &Self::Header) -> Result<(), FaqError>;

    /// Text of the visible answer block following a header, if any.
    async fn answer(&self, header: &Self::Header) -> Result<Option<String>, FaqError>;
}

#[derive(Debug, Clone)]
struct StaticEntry {
    question: String,
    answer: Option<String>,
}

/// A FAQ page read from an HTML snapshot.
///
/// Expansion is a no-op: an answer counts as visible unless it, or one of
/// its ancestors, is hidden by attribute or inline style.
#[derive(Debug, Clone)]
pub struct StaticFaqPage {
    entries: Vec<StaticEntry>,
}

impl StaticFaqPage {
    /// Parse `html` using the default question selector.
    pub fn parse(html: &str) -> Result<Self, FaqError> {
        Self::parse_with(html, DEFAULT_QUESTION_SELECTOR)
    }

    /// Parse `html`, locating question headers with `selector`.
    pub fn parse_with(html: &str, selector: &str) -> Result<Self, FaqError> {
        let headers = Selector::parse(selector).map_err(|e| FaqError::Selector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;

        let document = Html::parse_document(html);
        let entries = document
            .select(&headers)
            .map(|header| StaticEntry {
                question: header.text().collect::<String>(),
                answer: next_answer(header)
                    .filter(|answer| is_visible(*answer))
                    .and_then(element_text),
            })
            .collect();

        Ok(Self { entries })
    }
}

impl FaqPage for StaticFaqPage {
    type Header = usize;

    async fn headers(&self) -> Result<Vec<usize>, FaqError> {
        Ok((0..self.entries.len()).collect())
    }

    async fn question(&self, header: &usize) -> Result<String, FaqError> {
        self.entry(*header).map(|e| e.question.clone())
    }

    async fn expand(&self, header: &usize) -> Result<(), FaqError> {
        self.entry(*header).map(|_| ())
    }

    async fn expand_by_script(&self, header: &usize) -> Result<(), FaqError> {
        self.entry(*header).map(|_| ())
    }

    async fn answer(&self, header: &usize) -> Result<Option<String>, FaqError> {
        self.entry(*header).map(|e| e.answer.clone())
    }
}

impl StaticFaqPage {
    fn entry(&self, index: usize) -> Result<&StaticEntry, FaqError> {
        self.entries
            .get(index)
            .ok_or_else(|| FaqError::Interaction(format!("no question header {index}")))
    }
}

/// First `dd` among the following siblings of `header`.
fn next_answer(header: ElementRef<'_>) -> Option<ElementRef<'_>> {
    header
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "dd")
}

fn is_visible(element: ElementRef<'_>) -> bool {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .all(|e| !is_hidden(e))
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if value.attr("hidden").is_some() || value.attr("aria-hidden") == Some("true") {
        return true;
    }

    value.attr("style").is_some_and(|style| {
        let style: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        style.contains("display:none") || style.contains("visibility:hidden")
    })
}
