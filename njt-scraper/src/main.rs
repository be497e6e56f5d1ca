use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use njt_scraper::config::{Command, ScraperConfig};
use njt_scraper::departures::{DepartureExtractor, DepartureSelectors};
use njt_scraper::faq::{AnswerOverrides, DEFAULT_FAQ_URL, FaqExtractor, FaqPageOptions};
use njt_scraper::fetch::{
    BrowserOptions, FetchConfig, ReadySignal, RenderedFetcher, StaticFetcher,
};
use njt_scraper::pipeline::{RunConfig, run_departures, run_faqs_live};
use njt_scraper::sink::CsvSink;
use njt_scraper::stations::{DEFAULT_STATIONS_URL, StationCatalog, StationSource};

/// Element on the station-selection page that opens the autocomplete.
const STATION_INPUT: &str = "#dv-to-station";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("njt_scraper=info")),
        )
        .init();

    let command = match Command::from_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: njt-scraper [departures|faqs|all]");
            return ExitCode::from(2);
        }
    };

    let config = match ScraperConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::from(2);
        }
    };

    let mut browser = BrowserOptions::default();
    if let Some(path) = &config.chrome_executable {
        browser = browser.with_chrome_executable(path);
    }
    let sink = CsvSink::new(&config.output_dir);

    if command.scrapes_departures() {
        scrape_departures(&config, &browser, &sink).await;
    }
    if command.scrapes_faqs() {
        scrape_faqs(&config, &browser, &sink).await;
    }

    ExitCode::SUCCESS
}

async fn scrape_departures(config: &ScraperConfig, browser: &BrowserOptions, sink: &CsvSink) {
    let catalog = match config.station_source {
        StationSource::Static => StationCatalog::static_table(),
        StationSource::Rendered => {
            let ready = ReadySignal::element(STATION_INPUT)
                .and_activate()
                .with_timeout(config.render_timeout);
            StationCatalog::rendered(
                RenderedFetcher::new(browser.clone(), ready),
                DEFAULT_STATIONS_URL,
            )
        }
    };

    let fetcher = match StaticFetcher::new(FetchConfig::default()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!(error = %e, "failed to create HTTP client");
            return;
        }
    };

    let extractor = match DepartureExtractor::new(DepartureSelectors::default()) {
        Ok(extractor) => extractor,
        Err(e) => {
            error!(error = %e, "failed to build departure extractor");
            return;
        }
    };

    let run = RunConfig::default().with_pacing(config.pacing);

    match run_departures(&catalog, &fetcher, &extractor, sink, &run).await {
        Ok(report) if report.collected() => {
            println!(
                "Collected {} departures from {} stations ({} catalog, {} failed)",
                report.departures.len(),
                report.stations.len(),
                report.catalog_origin,
                report.failed_stations.len()
            );
        }
        Ok(_) => println!("No departure data collected"),
        Err(e) => {
            error!(error = %e, "no stations to scrape");
            println!("No departure data collected");
        }
    }
}

async fn scrape_faqs(config: &ScraperConfig, browser: &BrowserOptions, sink: &CsvSink) {
    let mut overrides = AnswerOverrides::builtin();
    if let Some(path) = &config.faq_overrides {
        match AnswerOverrides::load(path) {
            Ok(extra) => {
                info!(count = extra.len(), "loaded FAQ answer overrides");
                overrides = overrides.merge(extra);
            }
            Err(e) => warn!(error = %e, "ignoring FAQ overrides file"),
        }
    }

    let extractor = FaqExtractor::new(overrides);
    let options = FaqPageOptions::default();

    match run_faqs_live(browser, &options, DEFAULT_FAQ_URL, &extractor, sink).await {
        Ok(report) if report.collected() => {
            println!(
                "Collected {} FAQs ({} from overrides)",
                report.entries.len(),
                report.overridden
            );
        }
        Ok(_) => println!("No FAQ data collected"),
        Err(e) => {
            error!(error = %e, "FAQ scrape failed");
            println!("No FAQ data collected");
        }
    }
}
