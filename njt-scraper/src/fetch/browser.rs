//! Headless browser session management.
//!
//! A [`BrowserSession`] owns one Chromium process and the task driving its
//! DevTools connection. Call [`BrowserSession::close`] when done; if the
//! session is dropped instead (error path, panic, early return) the process
//! is killed and the handler task aborted.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use super::client::DEFAULT_USER_AGENT;
use super::error::FetchError;

/// How often to re-check for a ready selector.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launch options for the headless browser.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Explicit Chrome/Chromium binary; auto-detected when `None`
    pub chrome_executable: Option<PathBuf>,
    /// User agent the browser reports
    pub user_agent: String,
    /// Viewport size
    pub window_size: (u32, u32),
    /// Per-command DevTools timeout
    pub request_timeout: Duration,
    /// Interval between readiness checks
    pub poll_interval: Duration,
}

impl BrowserOptions {
    /// Use a specific browser binary.
    pub fn with_chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    /// Set the DevTools command timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn to_config(&self) -> Result<BrowserConfig, FetchError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(self.window_size.0, self.window_size.1)
            .request_timeout(self.request_timeout)
            .arg("--disable-gpu")
            .arg("--disable-notifications")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled")
            .arg(format!("--user-agent={}", self.user_agent));

        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(FetchError::Browser)
    }
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            window_size: (1920, 1080),
            request_timeout: Duration::from_secs(30),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// A running headless browser, torn down on every exit path.
pub struct BrowserSession {
    browser: Option<Browser>,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a headless browser.
    pub async fn launch(options: &BrowserOptions) -> Result<Self, FetchError> {
        let config = options.to_config()?;
        let (browser, mut events) = Browser::launch(config).await?;

        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    trace!(error = %e, "browser handler event error");
                }
            }
        });

        debug!("browser session started");
        Ok(Self {
            browser: Some(browser),
            handler,
        })
    }

    /// Open a new tab and navigate it to `url`.
    pub async fn open(&self, url: &str) -> Result<Page, FetchError> {
        let Some(browser) = self.browser.as_ref() else {
            return Err(FetchError::Browser("session already closed".to_string()));
        };
        let page = browser.new_page(url).await?;
        Ok(page)
    }

    /// Close the browser and wait for the process to exit.
    pub async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!(error = %e, "failed to close browser cleanly");
            }
            if let Err(e) = browser.wait().await {
                warn!(error = %e, "failed to wait for browser exit");
            }
        }
        self.handler.abort();
        debug!("browser session closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Dropping the Browser kills the child process.
        if self.browser.take().is_some() {
            debug!("browser session dropped without close, killing process");
        }
        self.handler.abort();
    }
}

/// Poll `page` until `selector` matches, or fail with a timeout.
pub async fn wait_for_selector(
    page: &Page,
    url: &str,
    selector: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<Element, FetchError> {
    let deadline = Instant::now() + timeout;

    loop {
        match page.find_element(selector).await {
            Ok(element) => return Ok(element),
            Err(e) => trace!(selector, error = %e, "selector not ready"),
        }

        if Instant::now() >= deadline {
            return Err(FetchError::Timeout {
                url: url.to_string(),
                waited: timeout,
            });
        }
        tokio::time::sleep(poll_interval).await;
    }
}

/// Click an element from script, bypassing overlays and hit-testing.
pub async fn script_click(element: &Element) -> Result<(), FetchError> {
    element
        .call_js_fn("function() { this.click(); }", false)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_defaults() {
        let options = BrowserOptions::default();
        assert!(options.chrome_executable.is_none());
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(options.window_size, (1920, 1080));
        assert_eq!(options.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn options_builder() {
        let options = BrowserOptions::default()
            .with_chrome_executable("/usr/bin/chromium")
            .with_request_timeout(Duration::from_secs(5));
        assert_eq!(
            options.chrome_executable,
            Some(PathBuf::from("/usr/bin/chromium"))
        );
        assert_eq!(options.request_timeout, Duration::from_secs(5));
    }
}
