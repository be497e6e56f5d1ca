//! Departures run.

use tracing::{error, info, warn};

use crate::departures::DepartureExtractor;
use crate::domain::Station;
use crate::fetch::{FetchError, PageFetcher, station_url};
use crate::sink::CsvSink;
use crate::stations::{CatalogError, StationCatalog};

use super::{RunConfig, RunReport};

/// Scrape every catalog station's departure board and write the results.
///
/// Fails only when the catalog is empty. Nothing is written unless at
/// least one departure was collected.
/// Stations whose page cannot be fetched contribute no departures and are
/// listed in [`RunReport::failed_stations`]; sink failures are logged and
/// leave the collected data in the report.
pub async fn run_departures<C, F>(
    catalog: &StationCatalog<C>,
    fetcher: &F,
    extractor: &DepartureExtractor,
    sink: &CsvSink,
    config: &RunConfig,
) -> Result<RunReport, CatalogError>
where
    C: PageFetcher,
    F: PageFetcher,
{
    let snapshot = catalog.list_stations().await?;
    let total = snapshot.stations.len();

    let mut departures = Vec::new();
    let mut failed_stations = Vec::new();

    for (index, station) in snapshot.stations.iter().enumerate() {
        if index > 0 && !config.pacing.is_zero() {
            tokio::time::sleep(config.pacing).await;
        }

        info!(
            station = %station,
            n = index + 1,
            of = total,
            "processing station"
        );

        match fetch_board(fetcher, &config.departures_url, station).await {
            Ok(html) => {
                let found = extractor.extract(&html, station);
                info!(station = %station, departures = found.len(), "extracted departures");
                departures.extend(found);
            }
            Err(e) => {
                warn!(station = %station, error = %e, "failed to fetch departures");
                failed_stations.push(station.name().to_string());
            }
        }
    }

    let mut written = Vec::new();

    if departures.is_empty() {
        warn!("no departure data to save");
    } else {
        match sink.write_stations(&snapshot.stations) {
            Ok(path) => written.push(path),
            Err(e) => error!(error = %e, "failed to save stations"),
        }
        match sink.write_departures(&departures) {
            Ok(path) => written.push(path),
            Err(e) => error!(error = %e, "failed to save departures"),
        }
    }

    info!(
        stations = total,
        departures = departures.len(),
        failed = failed_stations.len(),
        origin = %snapshot.origin,
        "departures run complete"
    );

    Ok(RunReport {
        stations: snapshot.stations,
        catalog_origin: snapshot.origin,
        departures,
        failed_stations,
        written,
    })
}

async fn fetch_board<F: PageFetcher>(
    fetcher: &F,
    base_url: &str,
    station: &Station,
) -> Result<String, FetchError> {
    let url = station_url(base_url, station.name())?;
    fetcher.fetch(&url).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::tempdir;

    use super::*;
    use crate::departures::DepartureSelectors;
    use crate::fetch::MockFetcher;
    use crate::sink::{DEPARTURES_FILE, STATIONS_FILE};
    use crate::stations::{CatalogOrigin, DEFAULT_STATIONS_URL};

    const BASE: &str = "https://www.njtransit.com/dv-to";

    fn config() -> RunConfig {
        RunConfig::default().with_pacing(Duration::ZERO)
    }

    fn extractor() -> DepartureExtractor {
        DepartureExtractor::new(DepartureSelectors::default()).unwrap()
    }

    fn fixture_fetcher() -> MockFetcher {
        MockFetcher::new()
            .load_stations("data/fixtures/stations", BASE)
            .unwrap()
    }

    #[test]
    fn run_config_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.pacing, Duration::from_secs(2));
        assert_eq!(config.departures_url, DEFAULT_STATIONS_URL);
    }

    #[tokio::test]
    async fn static_catalog_over_fixtures() {
        let dir = tempdir().unwrap();
        let sink = CsvSink::new(dir.path());
        let catalog = StationCatalog::<MockFetcher>::static_table();
        let fetcher = fixture_fetcher();

        let report = run_departures(&catalog, &fetcher, &extractor(), &sink, &config())
            .await
            .unwrap();

        assert_eq!(report.catalog_origin, CatalogOrigin::Static);
        assert_eq!(report.stations.len(), 10);
        // Only Newark Penn has departures; Hoboken is empty; the rest 404.
        assert_eq!(report.departures.len(), 3);
        assert!(report
            .departures
            .iter()
            .all(|d| d.station == "Newark Penn Station" && d.accessible));
        assert_eq!(report.failed_stations.len(), 8);
        assert!(!report.failed_stations.contains(&"Hoboken Terminal".to_string()));

        // Every station was attempted, in catalog order.
        let requests = fetcher.requests();
        assert_eq!(requests.len(), 10);
        assert_eq!(requests[0], format!("{BASE}/Newark%20Penn%20Station"));

        assert_eq!(report.written.len(), 2);
        assert_eq!(sink.read_departures().unwrap(), report.departures);
        assert_eq!(sink.read_stations().unwrap(), report.stations);
    }

    #[tokio::test]
    async fn no_departures_writes_nothing() {
        let dir = tempdir().unwrap();
        let sink = CsvSink::new(dir.path());
        let catalog = StationCatalog::<MockFetcher>::static_table();

        let report = run_departures(&catalog, &MockFetcher::new(), &extractor(), &sink, &config())
            .await
            .unwrap();

        assert!(!report.collected());
        assert_eq!(report.failed_stations.len(), 10);
        assert!(report.written.is_empty());
        assert!(!dir.path().join(STATIONS_FILE).exists());
        assert!(!dir.path().join(DEPARTURES_FILE).exists());
    }

    #[tokio::test]
    async fn sink_failure_still_reports_data() {
        let dir = tempdir().unwrap();
        // A file where the output directory should be.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "").unwrap();
        let sink = CsvSink::new(&blocked);

        let catalog = StationCatalog::<MockFetcher>::static_table();
        let report = run_departures(&catalog, &fixture_fetcher(), &extractor(), &sink, &config())
            .await
            .unwrap();

        assert!(report.collected());
        assert!(report.written.is_empty());
    }

    #[tokio::test]
    async fn pacing_between_stations() {
        let dir = tempdir().unwrap();
        let sink = CsvSink::new(dir.path());
        let fallback = vec![
            Station::new("Newark Penn Station", true).unwrap(),
            Station::new("Hoboken Terminal", true).unwrap(),
            Station::new("Summit", true).unwrap(),
        ];
        let catalog = StationCatalog::rendered(MockFetcher::new(), "https://example.invalid/dv-to")
            .with_fallback(fallback);
        let config = RunConfig::default().with_pacing(Duration::from_millis(30));

        let started = std::time::Instant::now();
        let report = run_departures(&catalog, &fixture_fetcher(), &extractor(), &sink, &config)
            .await
            .unwrap();

        assert_eq!(report.catalog_origin, CatalogOrigin::Fallback);
        // Two gaps for three stations.
        assert!(started.elapsed() >= Duration::from_millis(60));
    }
}
