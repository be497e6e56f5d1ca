//! Record sink error types.

/// Errors that can occur while writing or reading output files.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding or decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored station row is not a valid station
    #[error("invalid station row: {0}")]
    Station(#[from] crate::domain::InvalidStation),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SinkError::Io {
            path: "out/nj_transit_faqs.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "I/O error on out/nj_transit_faqs.json: denied");

        let err = SinkError::from(crate::domain::Station::new("", true).unwrap_err());
        assert_eq!(
            err.to_string(),
            "invalid station row: invalid station name: must not be empty"
        );
    }
}
