//! FAQ extraction.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::FaqEntry;
use crate::text::collapse_whitespace;

use super::error::FaqError;
use super::overrides::AnswerOverrides;
use super::page::FaqPage;

/// Icon-font ligature names that leak into header text.
const ICON_ARTIFACTS: &[&str] = &["chevron_right_circle", "chevron right circle"];

/// Strip icon-label residue from a question header and tidy whitespace.
///
/// ```
/// use njt_scraper::faq::normalize_question;
///
/// assert_eq!(
///     normalize_question("chevron_right_circle\n  Where can I buy tickets? "),
///     "Where can I buy tickets?"
/// );
/// assert_eq!(normalize_question(" chevron right circle "), "");
/// ```
pub fn normalize_question(raw: &str) -> String {
    let mut text = raw.to_string();
    loop {
        let stripped = ICON_ARTIFACTS
            .iter()
            .fold(text.clone(), |acc, artifact| acc.replace(artifact, ""));
        let next = collapse_whitespace(&stripped);
        if next == text {
            return next;
        }
        text = next;
    }
}

/// Entries read from one FAQ page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqExtraction {
    pub entries: Vec<FaqEntry>,
    /// How many of `entries` took their answer from the override table.
    pub overridden: usize,
}

/// Extracts question/answer pairs from a [`FaqPage`].
#[derive(Debug, Clone)]
pub struct FaqExtractor {
    overrides: AnswerOverrides,
    /// Pause after expanding a header, letting the answer render.
    settle: Duration,
}

impl FaqExtractor {
    pub fn new(overrides: AnswerOverrides) -> Self {
        Self {
            overrides,
            settle: Duration::from_secs(1),
        }
    }

    /// Set the pause after each expansion.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Extract every answered question on `page`, in document order.
    ///
    /// Entries with an empty question or no locatable answer are skipped;
    /// a failure on one entry never aborts the batch.
    pub async fn extract<P: FaqPage>(&self, page: &P) -> Result<Vec<FaqEntry>, FaqError> {
        Ok(self.extract_counted(page).await?.entries)
    }

    /// Like [`extract`](Self::extract), also counting override use.
    pub async fn extract_counted<P: FaqPage>(&self, page: &P) -> Result<FaqExtraction, FaqError> {
        let headers = page.headers().await?;
        info!(count = headers.len(), "found FAQ containers");

        let mut entries = Vec::new();
        let mut overridden = 0;

        for (index, header) in headers.iter().enumerate() {
            match self.extract_one(page, header).await {
                Ok(Some((entry, from_override))) => {
                    if from_override {
                        overridden += 1;
                    }
                    entries.push(entry);
                }
                Ok(None) => {}
                Err(e) => warn!(index, error = %e, "error processing FAQ, skipping"),
            }
        }

        if overridden > 0 {
            warn!(overridden, "some FAQ answers came from the override table");
        }
        info!(extracted = entries.len(), "FAQ extraction complete");

        Ok(FaqExtraction {
            entries,
            overridden,
        })
    }

    async fn extract_one<P: FaqPage>(
        &self,
        page: &P,
        header: &P::Header,
    ) -> Result<Option<(FaqEntry, bool)>, FaqError> {
        let question = normalize_question(&page.question(header).await?);
        if question.is_empty() {
            return Ok(None);
        }
        debug!(question = %question, "processing FAQ");

        if let Err(e) = page.expand(header).await {
            debug!(error = %e, "click failed, trying script click");
            if let Err(e) = page.expand_by_script(header).await {
                warn!(question = %question, error = %e, "could not expand FAQ, skipping");
                return Ok(None);
            }
        }
        tokio::time::sleep(self.settle).await;

        let live = match page.answer(header).await {
            Ok(answer) => answer
                .map(|a| collapse_whitespace(&a))
                .filter(|a| !a.is_empty()),
            Err(e) => {
                debug!(question = %question, error = %e, "could not read answer");
                None
            }
        };

        if let Some(answer) = live {
            return Ok(Some((FaqEntry::new(question, answer), false)));
        }

        match self.overrides.get(&question) {
            Some(answer) => {
                warn!(question = %question, "answer not found, using override");
                Ok(Some((FaqEntry::new(question, answer), true)))
            }
            None => {
                info!(question = %question, "no answer found, skipping");
                Ok(None)
            }
        }
    }
}

impl Default for FaqExtractor {
    fn default() -> Self {
        Self::new(AnswerOverrides::builtin())
    }
}
