//! Rendered page fetcher.
//!
//! Drives a headless browser to a URL, waits for a caller-supplied ready
//! signal, and returns the DOM as serialized after client-side scripts ran.

use std::time::Duration;

use chromiumoxide::Page;
use tracing::{debug, info};

use super::PageFetcher;
use super::browser::{BrowserOptions, BrowserSession, script_click, wait_for_selector};
use super::error::FetchError;

/// Condition that marks a rendered page as ready to snapshot.
#[derive(Debug, Clone)]
pub struct ReadySignal {
    /// CSS selector that must match an element
    pub selector: String,
    /// How long to wait for the selector
    pub timeout: Duration,
    /// Click the matched element (script click, then native click)
    pub activate: bool,
    /// Pause after each activation step to let the page react
    pub settle: Duration,
}

impl ReadySignal {
    /// Wait for `selector` to be present, with a 10 second timeout.
    pub fn element(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            timeout: Duration::from_secs(10),
            activate: false,
            settle: Duration::from_secs(2),
        }
    }

    /// Click the element once it appears.
    pub fn and_activate(mut self) -> Self {
        self.activate = true;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

/// Fetches pages through a fresh headless browser session per call.
#[derive(Debug, Clone)]
pub struct RenderedFetcher {
    options: BrowserOptions,
    ready: ReadySignal,
}

impl RenderedFetcher {
    pub fn new(options: BrowserOptions, ready: ReadySignal) -> Self {
        Self { options, ready }
    }

    async fn render(&self, page: &Page, url: &str) -> Result<String, FetchError> {
        let ready = &self.ready;
        let element = wait_for_selector(
            page,
            url,
            &ready.selector,
            ready.timeout,
            self.options.poll_interval,
        )
        .await?;
        debug!(selector = %ready.selector, "page ready");

        if ready.activate {
            // The autocomplete only opens reliably after both kinds of click.
            if let Err(e) = script_click(&element).await {
                debug!(error = %e, "script click failed");
            }
            tokio::time::sleep(ready.settle).await;

            if let Err(e) = element.click().await {
                debug!(error = %e, "native click failed");
            }
            tokio::time::sleep(ready.settle).await;
        }

        Ok(page.content().await?)
    }
}

impl PageFetcher for RenderedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!(url, "rendering page");

        let session = BrowserSession::launch(&self.options).await?;
        let result = match session.open(url).await {
            Ok(page) => self.render(&page, url).await,
            Err(e) => Err(e),
        };
        session.close().await;

        result
    }
}
