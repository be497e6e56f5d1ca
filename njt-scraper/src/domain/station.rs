//! Station type.

use std::fmt;

/// Error returned when constructing a station from an unusable name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

/// A rail station as listed by the NJ TRANSIT departure-vision site.
///
/// Identity is the name. The name is trimmed and guaranteed non-empty by
/// construction, so it can always be embedded in a lookup URL.
///
/// # Examples
///
/// ```
/// use njt_scraper::domain::Station;
///
/// let hoboken = Station::new("  Hoboken Terminal ", true).unwrap();
/// assert_eq!(hoboken.name(), "Hoboken Terminal");
/// assert!(hoboken.is_accessible());
///
/// // Blank names are rejected
/// assert!(Station::new("   ", false).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Station {
    name: String,
    is_accessible: bool,
}

impl Station {
    /// Create a station, trimming surrounding whitespace from the name.
    pub fn new(name: impl AsRef<str>, is_accessible: bool) -> Result<Self, InvalidStation> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(InvalidStation {
                reason: "must not be empty",
            });
        }

        Ok(Self {
            name: name.to_string(),
            is_accessible,
        })
    }

    /// The station's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the station is marked as accessible.
    pub fn is_accessible(&self) -> bool {
        self.is_accessible
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any name with a visible character survives construction, trimmed
        #[test]
        fn non_blank_names_accepted(s in "[ \t]{0,3}[A-Za-z][A-Za-z .-]{0,20}[ \t]{0,3}") {
            let station = Station::new(&s, true).unwrap();
            prop_assert_eq!(station.name(), s.trim());
        }

        /// Whitespace-only names are always rejected
        #[test]
        fn blank_names_rejected(s in "[ \t\n]{0,8}") {
            prop_assert!(Station::new(&s, false).is_err());
        }
    }
}
