//! Page fetching.
//!
//! Two interchangeable strategies sit behind [`PageFetcher`]:
//! - [`StaticFetcher`]: a single GET with a browser-like user agent
//! - [`RenderedFetcher`]: a headless browser snapshot taken once a
//!   [`ReadySignal`] is satisfied
//!
//! [`MockFetcher`] serves canned pages for tests and offline runs.

mod browser;
mod client;
mod error;
mod mock;
mod rendered;

pub use browser::{BrowserOptions, BrowserSession, script_click, wait_for_selector};
pub use client::{DEFAULT_USER_AGENT, FetchConfig, StaticFetcher};
pub use error::FetchError;
pub use mock::MockFetcher;
pub use rendered::{ReadySignal, RenderedFetcher};

use reqwest::Url;

/// Something that can turn a URL into HTML.
///
/// This abstraction allows the pipeline to be tested with mock pages.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetch the page at `url` and return its HTML.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Build a per-station lookup URL: `base_url` with the station name
/// appended as one percent-encoded path segment.
///
/// ```
/// use njt_scraper::fetch::station_url;
///
/// let url = station_url("https://www.njtransit.com/dv-to", "Newark Penn Station").unwrap();
/// assert_eq!(url, "https://www.njtransit.com/dv-to/Newark%20Penn%20Station");
/// ```
pub fn station_url(base_url: &str, station_name: &str) -> Result<String, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot have a path".to_string()))?
        .pop_if_empty()
        .push(station_name);

    Ok(url.into())
}
