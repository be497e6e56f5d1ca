//! Page fetch error types.

use std::time::Duration;

/// Errors that can occur while fetching a page.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Transport failure or non-success HTTP status
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// The page (or its ready signal) did not arrive in time
    #[error("timed out after {}s fetching {url}", waited.as_secs_f32())]
    Timeout { url: String, waited: Duration },

    /// A page URL could not be built; nothing was requested
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Browser could not be launched or driven
    #[error("browser error: {0}")]
    Browser(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}

impl From<chromiumoxide::error::CdpError> for FetchError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        FetchError::Browser(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Network {
            url: "https://example.com".into(),
            message: "HTTP 503".into(),
        };
        assert_eq!(
            err.to_string(),
            "network error fetching https://example.com: HTTP 503"
        );

        let err = FetchError::Timeout {
            url: "https://example.com".into(),
            waited: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "timed out after 10s fetching https://example.com");
        assert!(err.is_timeout());

        let err = FetchError::Browser("no chrome".into());
        assert_eq!(err.to_string(), "browser error: no chrome");
        assert!(!err.is_timeout());

        let err = FetchError::InvalidUrl {
            url: "not a url".into(),
            reason: "relative URL without a base".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid URL \"not a url\": relative URL without a base"
        );
    }
}
