//! Station extraction from the rendered autocomplete widget.

use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::domain::Station;

/// One suggestion in the station autocomplete list.
const ITEM_SELECTOR: &str = r#"li[data-cy="autocomplete-item"]"#;
/// The station label inside a suggestion.
const LABEL_SELECTOR: &str = "a";
/// Accessibility icon shown next to step-free stations.
const ACCESSIBLE_SELECTOR: &str = r#"svg[aria-labelledby="accessibility-title"]"#;

/// Read every autocomplete suggestion in `html` as a station.
///
/// Suggestions without a usable label are skipped.
pub fn parse_autocomplete(html: &str) -> Vec<Station> {
    let (Ok(item), Ok(label), Ok(accessible)) = (
        Selector::parse(ITEM_SELECTOR),
        Selector::parse(LABEL_SELECTOR),
        Selector::parse(ACCESSIBLE_SELECTOR),
    ) else {
        warn!("autocomplete selectors failed to parse");
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut stations = Vec::new();

    for entry in document.select(&item) {
        let Some(anchor) = entry.select(&label).next() else {
            warn!("autocomplete item has no label, skipping");
            continue;
        };
        let name = anchor.text().collect::<String>();
        let is_accessible = entry.select(&accessible).next().is_some();

        match Station::new(&name, is_accessible) {
            Ok(station) => {
                debug!(station = %station, accessible = is_accessible, "found station");
                stations.push(station);
            }
            Err(e) => warn!(error = %e, "skipping autocomplete item"),
        }
    }

    stations
}
