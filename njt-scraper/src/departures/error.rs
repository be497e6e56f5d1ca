//! Departure extraction error types.

use super::extract::Field;

/// Errors building a departure extractor.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractError {
    /// A configured CSS selector does not parse
    #[error("invalid {field} selector {selector:?}: {message}")]
    Selector {
        field: &'static str,
        selector: String,
        message: String,
    },
}

/// A sub-field absent from a departure widget.
///
/// Recovered locally by substituting the field's sentinel; only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing {0} field")]
pub struct MissingField(pub Field);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ExtractError::Selector {
            field: "track",
            selector: "p[".into(),
            message: "unexpected end".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid track selector \"p[\": unexpected end"
        );

        assert_eq!(MissingField(Field::Time).to_string(), "missing time field");
    }
}
