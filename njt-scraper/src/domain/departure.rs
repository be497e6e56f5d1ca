//! Scheduled departure records.

use super::Station;

/// One scheduled train as shown on a station's departure board.
///
/// All fields are free text exactly as the site presents them. The station
/// fields are copied in at extraction time, so a departure never refers
/// back to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Line and destination, e.g. "NEC Trenton".
    pub train: String,
    /// Departure time block, e.g. "8:14 AM in 6 min".
    pub time: String,
    /// Track information, e.g. "Track 3".
    pub track: String,
    /// Name of the station the board belongs to.
    pub station: String,
    /// Accessibility flag of that station.
    pub accessible: bool,
}

impl Departure {
    /// Build a departure for `station` from the three scraped fields.
    pub fn at_station(
        station: &Station,
        train: impl Into<String>,
        time: impl Into<String>,
        track: impl Into<String>,
    ) -> Self {
        Self {
            train: train.into(),
            time: time.into(),
            track: track.into(),
            station: station.name().to_string(),
            accessible: station.is_accessible(),
        }
    }
}
