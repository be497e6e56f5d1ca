//! Mock fetcher for testing without network or browser access.
//!
//! Serves canned HTML (or canned failures) keyed by URL, and can load
//! station pages from a directory of fixtures.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use super::error::FetchError;
use super::{PageFetcher, station_url};

/// Fetcher that answers from an in-memory table.
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: HashMap<String, Result<String, FetchError>>,
    /// URLs requested so far, in order.
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Ok(html.into()));
        self
    }

    /// Fail requests for `url` with `error`.
    pub fn with_error(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.pages.insert(url.into(), Err(error));
        self
    }

    /// Load station departure pages from a directory.
    ///
    /// Expects files named `{station name}.html` (e.g. `Hoboken Terminal.html`),
    /// served at the station's URL under `base_url`.
    pub fn load_stations(
        mut self,
        data_dir: impl AsRef<Path>,
        base_url: &str,
    ) -> Result<Self, FetchError> {
        let data_dir = data_dir.as_ref();
        let io_error = |message: String| FetchError::Network {
            url: data_dir.display().to_string(),
            message,
        };

        let entries = std::fs::read_dir(data_dir)
            .map_err(|e| io_error(format!("failed to read fixture directory: {}", e)))?;

        for entry in entries {
            let path = entry
                .map_err(|e| io_error(format!("failed to read directory entry: {}", e)))?
                .path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("html") {
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let html = std::fs::read_to_string(&path)
                .map_err(|e| io_error(format!("failed to read {:?}: {}", path, e)))?;

            self.pages.insert(station_url(base_url, name)?, Ok(html));
        }

        Ok(self)
    }

    /// URLs requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        self.pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Network {
                    url: url.to_string(),
                    message: "HTTP 404".to_string(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn serves_pages_and_errors() {
        let fetcher = MockFetcher::new()
            .with_page("https://a.test/", "<p>a</p>")
            .with_error(
                "https://b.test/",
                FetchError::Timeout {
                    url: "https://b.test/".into(),
                    waited: Duration::from_secs(1),
                },
            );

        assert_eq!(fetcher.fetch("https://a.test/").await.unwrap(), "<p>a</p>");
        assert!(fetcher.fetch("https://b.test/").await.unwrap_err().is_timeout());
        assert!(matches!(
            fetcher.fetch("https://c.test/").await,
            Err(FetchError::Network { .. })
        ));
        assert_eq!(
            fetcher.requests(),
            vec!["https://a.test/", "https://b.test/", "https://c.test/"]
        );
    }

    #[tokio::test]
    async fn load_fixture_stations() {
        let base = "https://www.njtransit.com/dv-to";
        let fetcher = MockFetcher::new()
            .load_stations("data/fixtures/stations", base)
            .unwrap();

        let url = station_url(base, "Newark Penn Station").unwrap();
        let html = fetcher.fetch(&url).await.unwrap();
        assert!(html.contains("media no-gutters p-3"));
    }

    #[test]
    fn missing_directory_is_error() {
        let result = MockFetcher::new().load_stations("/nonexistent/fixtures", "https://x.test");
        assert!(result.is_err());
    }
}
