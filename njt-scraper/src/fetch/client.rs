//! Static HTTP page fetcher.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use super::PageFetcher;
use super::error::FetchError;

/// Browser-like identification sent with every request. The departure
/// board serves a reduced page to unknown clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Configuration for the static fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FetchConfig {
    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Fetches raw HTML with a single GET request.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    http: reqwest::Client,
    timeout: Duration,
}

impl StaticFetcher {
    /// Create a new static fetcher.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();

        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| FetchError::Network {
                url: String::new(),
                message: "invalid user agent".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network {
                url: String::new(),
                message: e.to_string(),
            })?;

        Ok(Self { http, timeout })
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                waited: self.timeout,
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| self.classify(url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = FetchConfig::default()
            .with_user_agent("test-agent")
            .with_timeout(5);
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_creation() {
        assert!(StaticFetcher::new(FetchConfig::default()).is_ok());
    }

    #[test]
    fn rejects_unencodable_user_agent() {
        let config = FetchConfig::default().with_user_agent("bad\nagent");
        assert!(StaticFetcher::new(config).is_err());
    }
}
