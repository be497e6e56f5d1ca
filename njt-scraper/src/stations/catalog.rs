//! Station catalog.

use std::fmt;
use std::str::FromStr;

use tracing::{info, warn};

use crate::domain::Station;
use crate::fetch::PageFetcher;

use super::autocomplete::parse_autocomplete;
use super::error::CatalogError;

/// Station-selection page holding the autocomplete widget.
pub const DEFAULT_STATIONS_URL: &str = "https://www.njtransit.com/dv-to";

/// Well-known stations used when the live widget yields nothing.
const FALLBACK_STATIONS: &[(&str, bool)] = &[
    ("Newark Penn Station", true),
    ("New York Penn Station", true),
    ("Hoboken Terminal", true),
];

/// Fixed catalog used when rendering is bypassed entirely.
const STATIC_STATIONS: &[(&str, bool)] = &[
    ("Newark Penn Station", true),
    ("New York Penn Station", true),
    ("Hoboken Terminal", true),
    ("Secaucus Junction", true),
    ("Newark Broad St", true),
    ("Princeton Junction", true),
    ("Metropark", true),
    ("Trenton Transit Center", true),
    ("Aberdeen-Matawan", true),
    ("Summit", true),
];

/// Where the station list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StationSource {
    /// Render the station-selection page and read its autocomplete.
    #[default]
    Rendered,
    /// Use the built-in table.
    Static,
}

impl FromStr for StationSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rendered" | "live" => Ok(StationSource::Rendered),
            "static" => Ok(StationSource::Static),
            other => Err(format!("unknown station source {other:?}")),
        }
    }
}

/// How a catalog snapshot was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// Read from the live site
    Live,
    /// Live read produced nothing; minimal fallback list in use
    Fallback,
    /// Built-in static table
    Static,
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CatalogOrigin::Live => "live",
            CatalogOrigin::Fallback => "fallback",
            CatalogOrigin::Static => "static",
        };
        f.write_str(s)
    }
}

/// The stations known for one run.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub stations: Vec<Station>,
    pub origin: CatalogOrigin,
}

enum Strategy<F> {
    Static,
    Rendered { fetcher: F, url: String },
}

/// Lists the stations a run should visit.
pub struct StationCatalog<F> {
    strategy: Strategy<F>,
    fallback: Vec<Station>,
}

impl<F: PageFetcher> StationCatalog<F> {
    /// Catalog backed by the built-in station table.
    pub fn static_table() -> Self {
        Self {
            strategy: Strategy::Static,
            fallback: build_stations(FALLBACK_STATIONS),
        }
    }

    /// Catalog read from the rendered autocomplete widget at `url`.
    ///
    /// `fetcher` should return the DOM after the widget has been opened.
    pub fn rendered(fetcher: F, url: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Rendered {
                fetcher,
                url: url.into(),
            },
            fallback: build_stations(FALLBACK_STATIONS),
        }
    }

    /// Replace the list used when the live widget yields nothing.
    pub fn with_fallback(mut self, fallback: Vec<Station>) -> Self {
        self.fallback = fallback;
        self
    }

    /// List the stations for this run.
    ///
    /// A rendered catalog that finds nothing (timeout, layout change,
    /// blocked automation) degrades to the fallback list and says so.
    pub async fn list_stations(&self) -> Result<CatalogSnapshot, CatalogError> {
        let snapshot = match &self.strategy {
            Strategy::Static => CatalogSnapshot {
                stations: build_stations(STATIC_STATIONS),
                origin: CatalogOrigin::Static,
            },
            Strategy::Rendered { fetcher, url } => {
                info!(url = %url, "fetching station list");
                let stations = match fetcher.fetch(url).await {
                    Ok(html) => parse_autocomplete(&html),
                    Err(e) => {
                        warn!(error = %e, "failed to render station list");
                        Vec::new()
                    }
                };

                if stations.is_empty() {
                    warn!(
                        fallback = self.fallback.len(),
                        "no stations found, using default stations"
                    );
                    CatalogSnapshot {
                        stations: self.fallback.clone(),
                        origin: CatalogOrigin::Fallback,
                    }
                } else {
                    CatalogSnapshot {
                        stations,
                        origin: CatalogOrigin::Live,
                    }
                }
            }
        };

        if snapshot.stations.is_empty() {
            return Err(CatalogError::Empty);
        }

        info!(
            stations = snapshot.stations.len(),
            origin = %snapshot.origin,
            "station list ready"
        );
        Ok(snapshot)
    }
}

fn build_stations(table: &[(&str, bool)]) -> Vec<Station> {
    table
        .iter()
        .filter_map(|(name, accessible)| Station::new(name, *accessible).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::fetch::{FetchError, MockFetcher};

    const URL: &str = "https://www.njtransit.com/dv-to";

    fn names(snapshot: &CatalogSnapshot) -> Vec<&str> {
        snapshot.stations.iter().map(|s| s.name()).collect()
    }

    #[tokio::test]
    async fn static_table_has_ten_stations() {
        let catalog = StationCatalog::<MockFetcher>::static_table();
        let snapshot = catalog.list_stations().await.unwrap();

        assert_eq!(snapshot.origin, CatalogOrigin::Static);
        assert_eq!(snapshot.stations.len(), 10);
        assert_eq!(snapshot.stations[0].name(), "Newark Penn Station");
        assert_eq!(snapshot.stations[9].name(), "Summit");
        assert!(snapshot.stations.iter().all(|s| s.is_accessible()));
    }

    #[tokio::test]
    async fn rendered_reads_widget() {
        let html = r#"<ul>
            <li data-cy="autocomplete-item"><a>Summit</a></li>
            <li data-cy="autocomplete-item"><a>Metropark</a>
                <svg aria-labelledby="accessibility-title"></svg></li>
        </ul>"#;
        let catalog = StationCatalog::rendered(MockFetcher::new().with_page(URL, html), URL);
        let snapshot = catalog.list_stations().await.unwrap();

        assert_eq!(snapshot.origin, CatalogOrigin::Live);
        assert_eq!(names(&snapshot), vec!["Summit", "Metropark"]);
        assert!(!snapshot.stations[0].is_accessible());
        assert!(snapshot.stations[1].is_accessible());
    }

    #[tokio::test]
    async fn empty_widget_falls_back() {
        let catalog =
            StationCatalog::rendered(MockFetcher::new().with_page(URL, "<ul></ul>"), URL);
        let snapshot = catalog.list_stations().await.unwrap();

        assert_eq!(snapshot.origin, CatalogOrigin::Fallback);
        let names = names(&snapshot);
        for expected in ["Newark Penn Station", "New York Penn Station", "Hoboken Terminal"] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[tokio::test]
    async fn render_timeout_falls_back() {
        let fetcher = MockFetcher::new().with_error(
            URL,
            FetchError::Timeout {
                url: URL.into(),
                waited: Duration::from_secs(10),
            },
        );
        let snapshot = StationCatalog::rendered(fetcher, URL)
            .list_stations()
            .await
            .unwrap();

        assert_eq!(snapshot.origin, CatalogOrigin::Fallback);
        assert_eq!(snapshot.stations.len(), 3);
    }

    #[tokio::test]
    async fn empty_fallback_is_error() {
        let catalog = StationCatalog::rendered(MockFetcher::new(), URL).with_fallback(Vec::new());
        let result = catalog.list_stations().await;

        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn parse_station_source() {
        assert_eq!("static".parse::<StationSource>(), Ok(StationSource::Static));
        assert_eq!(" Rendered ".parse::<StationSource>(), Ok(StationSource::Rendered));
        assert_eq!("live".parse::<StationSource>(), Ok(StationSource::Rendered));
        assert!("database".parse::<StationSource>().is_err());
        assert_eq!(StationSource::default(), StationSource::Rendered);
    }
}
