//! FAQ run.

use tracing::{error, info, warn};

use crate::faq::{
    FaqError, FaqExtraction, FaqExtractor, FaqPage, FaqPageOptions, scrape_live,
};
use crate::fetch::BrowserOptions;
use crate::sink::CsvSink;

use super::FaqReport;

/// Extract `page` and write the entries.
pub async fn run_faqs<P: FaqPage>(
    page: &P,
    extractor: &FaqExtractor,
    sink: &CsvSink,
) -> Result<FaqReport, FaqError> {
    let extraction = extractor.extract_counted(page).await?;
    Ok(persist_faqs(extraction, sink))
}

/// Open the live FAQ page in a browser, extract it, and write the entries.
pub async fn run_faqs_live(
    browser: &BrowserOptions,
    options: &FaqPageOptions,
    url: &str,
    extractor: &FaqExtractor,
    sink: &CsvSink,
) -> Result<FaqReport, FaqError> {
    let extraction = scrape_live(browser, options, url, extractor).await?;
    Ok(persist_faqs(extraction, sink))
}

/// Write extracted entries, if there are any.
///
/// A sink failure is logged; the entries stay in the report.
pub fn persist_faqs(extraction: FaqExtraction, sink: &CsvSink) -> FaqReport {
    let mut written = Vec::new();

    if extraction.entries.is_empty() {
        warn!("no FAQ data to save");
    } else {
        match sink.write_faqs(&extraction.entries) {
            Ok((csv, json)) => written.extend([csv, json]),
            Err(e) => error!(error = %e, "failed to save FAQs"),
        }
    }

    info!(
        entries = extraction.entries.len(),
        overridden = extraction.overridden,
        "FAQ run complete"
    );

    FaqReport {
        entries: extraction.entries,
        overridden: extraction.overridden,
        written,
    }
}
