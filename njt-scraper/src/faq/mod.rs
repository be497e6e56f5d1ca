//! FAQ extraction.
//!
//! Expands each collapsed accordion header on the FAQ page and pairs it
//! with the answer rendered next to it. Questions whose answer cannot be
//! located fall back to a configurable override table, or are dropped.
//!
//! - [`FaqPage`]: what the extractor needs from a page
//! - [`BrowserFaqPage`]: live page in a headless browser
//! - [`StaticFaqPage`]: parsed HTML snapshot

mod browser;
mod error;
mod extract;
mod overrides;
mod page;

pub use browser::{BrowserFaqPage, DEFAULT_FAQ_URL, FaqPageOptions, scrape_live};
pub use error::FaqError;
pub use extract::{FaqExtraction, FaqExtractor, normalize_question};
pub use overrides::AnswerOverrides;
pub use page::{DEFAULT_QUESTION_SELECTOR, FaqPage, StaticFaqPage};
