//! Run orchestration.
//!
//! A departures run lists stations, fetches and extracts each station's
//! board in turn with a pacing delay, then hands everything to the sink.
//! A FAQ run extracts one page and does the same.
//!
//! Per-station failures never end a run; only an empty station catalog
//! does, before anything is written.

mod departures;
mod faqs;

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{Departure, FaqEntry, Station};
use crate::stations::{CatalogOrigin, DEFAULT_STATIONS_URL};

pub use departures::run_departures;
pub use faqs::{persist_faqs, run_faqs, run_faqs_live};

/// Parameters for a departures run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Delay inserted between consecutive station fetches.
    pub pacing: Duration,
    /// Departure pages live at `{departures_url}/{station name}`.
    pub departures_url: String,
}

impl RunConfig {
    /// Set the delay between station fetches.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set a custom departures base URL (for testing).
    pub fn with_departures_url(mut self, url: impl Into<String>) -> Self {
        self.departures_url = url.into();
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pacing: Duration::from_secs(2),
            departures_url: DEFAULT_STATIONS_URL.to_string(),
        }
    }
}

/// Outcome of a departures run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stations: Vec<Station>,
    pub catalog_origin: CatalogOrigin,
    /// All departures, in station order then board order.
    pub departures: Vec<Departure>,
    /// Stations whose page could not be fetched.
    pub failed_stations: Vec<String>,
    /// Files successfully written.
    pub written: Vec<PathBuf>,
}

impl RunReport {
    /// Whether the run found any departures, whether or not they were saved.
    pub fn collected(&self) -> bool {
        !self.departures.is_empty()
    }
}

/// Outcome of a FAQ run.
#[derive(Debug, Clone, Default)]
pub struct FaqReport {
    pub entries: Vec<FaqEntry>,
    /// Entries whose answer came from the override table.
    pub overridden: usize,
    /// Files successfully written.
    pub written: Vec<PathBuf>,
}

impl FaqReport {
    pub fn collected(&self) -> bool {
        !self.entries.is_empty()
    }
}
