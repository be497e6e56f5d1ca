//! FAQ extraction error types.

use crate::fetch::FetchError;

/// Errors that can occur while extracting FAQ entries.
#[derive(Debug, thiserror::Error)]
pub enum FaqError {
    /// Loading the page failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Reading from or clicking on the page failed
    #[error("page interaction failed: {0}")]
    Interaction(String),

    /// A configured CSS selector does not parse
    #[error("invalid FAQ selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    /// Answer override file could not be used
    #[error("failed to load answer overrides from {path}: {message}")]
    Overrides { path: String, message: String },
}

impl From<chromiumoxide::error::CdpError> for FaqError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        FaqError::Interaction(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FaqError::Interaction("element not clickable".into());
        assert_eq!(err.to_string(), "page interaction failed: element not clickable");

        let err = FaqError::from(FetchError::Browser("no chrome".into()));
        assert_eq!(err.to_string(), "browser error: no chrome");

        let err = FaqError::Overrides {
            path: "overrides.json".into(),
            message: "expected map".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load answer overrides from overrides.json: expected map"
        );
    }
}
