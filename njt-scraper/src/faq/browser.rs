//! Live FAQ page driven through a headless browser.

use std::time::Duration;

use chromiumoxide::{Element, Page};
use tracing::{debug, info, warn};

use crate::fetch::{BrowserOptions, BrowserSession, FetchError, script_click, wait_for_selector};

use super::error::FaqError;
use super::extract::{FaqExtraction, FaqExtractor};
use super::page::{DEFAULT_QUESTION_SELECTOR, FaqPage};

/// FAQ page on the NJ TRANSIT site.
pub const DEFAULT_FAQ_URL: &str = "https://www.njtransit.com/our-agency/frequently-asked-questions";

/// Anything that looks like FAQ content; used to tell the page has rendered.
const CONTENT_SELECTOR: &str = r#"[class*="faq"], [class*="accordion"]"#;

/// Returns the visible text of the first `dd` after the header, or null.
const ANSWER_JS: &str = r#"function() {
    let el = this.nextElementSibling;
    while (el && el.tagName !== 'DD') { el = el.nextElementSibling; }
    if (!el) { return null; }
    const visible = !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length);
    return visible ? el.innerText.trim() : null;
}"#;

/// Loading parameters for the live FAQ page.
#[derive(Debug, Clone)]
pub struct FaqPageOptions {
    /// How long to wait for FAQ content before carrying on anyway
    pub content_timeout: Duration,
    /// Document-ready checks before giving up waiting
    pub ready_attempts: u32,
    /// Pause between document-ready checks
    pub ready_interval: Duration,
    /// Selector for question headers
    pub question_selector: String,
}

impl Default for FaqPageOptions {
    fn default() -> Self {
        Self {
            content_timeout: Duration::from_secs(20),
            ready_attempts: 20,
            ready_interval: Duration::from_millis(500),
            question_selector: DEFAULT_QUESTION_SELECTOR.to_string(),
        }
    }
}

/// A FAQ page open in a browser tab.
pub struct BrowserFaqPage {
    page: Page,
    question_selector: String,
}

impl BrowserFaqPage {
    /// Navigate to `url` and wait until the FAQ content has rendered.
    ///
    /// Content that never shows up within the timeout is not fatal: the
    /// page is used as-is once the document reports ready.
    pub async fn open(
        session: &BrowserSession,
        url: &str,
        browser: &BrowserOptions,
        options: &FaqPageOptions,
    ) -> Result<Self, FaqError> {
        let page = session.open(url).await?;

        match wait_for_selector(
            &page,
            url,
            CONTENT_SELECTOR,
            options.content_timeout,
            browser.poll_interval,
        )
        .await
        {
            Ok(_) => debug!("FAQ content present"),
            Err(FetchError::Timeout { .. }) => {
                warn!("timeout waiting for FAQ content, continuing with current page")
            }
            Err(e) => return Err(e.into()),
        }

        wait_document_ready(&page, options).await;

        Ok(Self {
            page,
            question_selector: options.question_selector.clone(),
        })
    }
}

async fn wait_document_ready(page: &Page, options: &FaqPageOptions) {
    for _ in 0..options.ready_attempts {
        let state = match page.evaluate("document.readyState").await {
            Ok(result) => result.into_value::<String>().ok(),
            Err(e) => {
                debug!(error = %e, "readyState check failed");
                None
            }
        };
        if state.as_deref() == Some("complete") {
            return;
        }
        tokio::time::sleep(options.ready_interval).await;
    }
    debug!("document never reported complete");
}

impl FaqPage for BrowserFaqPage {
    type Header = Element;

    async fn headers(&self) -> Result<Vec<Element>, FaqError> {
        Ok(self.page.find_elements(self.question_selector.as_str()).await?)
    }

    async fn question(&self, header: &Element) -> Result<String, FaqError> {
        Ok(header.inner_text().await?.unwrap_or_default())
    }

    async fn expand(&self, header: &Element) -> Result<(), FaqError> {
        header.scroll_into_view().await?;
        header.click().await?;
        Ok(())
    }

    async fn expand_by_script(&self, header: &Element) -> Result<(), FaqError> {
        script_click(header).await?;
        Ok(())
    }

    async fn answer(&self, header: &Element) -> Result<Option<String>, FaqError> {
        let returns = header.call_js_fn(ANSWER_JS, false).await?;
        Ok(match returns.result.value {
            Some(serde_json::Value::String(text)) => Some(text),
            _ => None,
        })
    }
}

/// Open the FAQ page in a fresh browser session and extract it.
///
/// The session is closed before returning, whatever the outcome.
pub async fn scrape_live(
    browser: &BrowserOptions,
    options: &FaqPageOptions,
    url: &str,
    extractor: &FaqExtractor,
) -> Result<FaqExtraction, FaqError> {
    info!(url, "fetching FAQs");

    let session = BrowserSession::launch(browser).await?;
    let result = match BrowserFaqPage::open(&session, url, browser, options).await {
        Ok(page) => extractor.extract_counted(&page).await,
        Err(e) => Err(e),
    };
    session.close().await;

    result
}
