//! Departure board extraction.
//!
//! Each departure widget on a station page yields one record. The three
//! sub-fields are located independently; a missing one is replaced by its
//! sentinel so the rest of the record survives markup drift.

use std::fmt;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use crate::domain::{Departure, Station};
use crate::text::element_text;

use super::error::{ExtractError, MissingField};

/// A sub-field of a departure widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Train,
    Time,
    Track,
}

impl Field {
    /// Placeholder used when the field cannot be extracted.
    pub fn sentinel(self) -> &'static str {
        match self {
            Field::Train => "Unknown Train",
            Field::Time => "Time Not Available",
            Field::Track => "Track Not Available",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::Train => "train",
            Field::Time => "time",
            Field::Track => "track",
        };
        f.write_str(s)
    }
}

/// CSS selectors describing the departure widget markup.
#[derive(Debug, Clone)]
pub struct DepartureSelectors {
    /// One scheduled train
    pub container: String,
    /// Line identifier, relative to the container
    pub train: String,
    /// Time-remaining block, relative to the container
    pub time: String,
    /// Track information, relative to the container
    pub track: String,
}

impl Default for DepartureSelectors {
    fn default() -> Self {
        Self {
            container: "div.media.no-gutters.p-3".to_string(),
            // The track paragraph also carries `mb-0`.
            train: "p.mb-0:not(.align-self-end)".to_string(),
            time: "div.d-flex.flex-column.ml-3.text-right".to_string(),
            track: "p.align-self-end.mt-1.mb-0".to_string(),
        }
    }
}

/// Turns station page HTML into departure records.
#[derive(Debug, Clone)]
pub struct DepartureExtractor {
    container: Selector,
    train: Selector,
    time: Selector,
    track: Selector,
}

impl DepartureExtractor {
    /// Compile the given selectors.
    pub fn new(selectors: DepartureSelectors) -> Result<Self, ExtractError> {
        Ok(Self {
            container: compile("container", &selectors.container)?,
            train: compile("train", &selectors.train)?,
            time: compile("time", &selectors.time)?,
            track: compile("track", &selectors.track)?,
        })
    }

    /// Extract every departure on `html`, tagged with `station`.
    ///
    /// A page with no departure widgets yields an empty list.
    pub fn extract(&self, html: &str, station: &Station) -> Vec<Departure> {
        let document = Html::parse_document(html);

        let departures: Vec<Departure> = document
            .select(&self.container)
            .map(|container| {
                Departure::at_station(
                    station,
                    self.field(container, Field::Train),
                    self.field(container, Field::Time),
                    self.field(container, Field::Track),
                )
            })
            .collect();

        for departure in &departures {
            trace!(
                station = %station,
                train = %departure.train,
                time = %departure.time,
                track = %departure.track,
                "departure"
            );
        }

        departures
    }

    fn field(&self, container: ElementRef<'_>, field: Field) -> String {
        let selector = match field {
            Field::Train => &self.train,
            Field::Time => &self.time,
            Field::Track => &self.track,
        };

        match container.select(selector).find_map(element_text) {
            Some(text) => text,
            None => {
                debug!(missing = %MissingField(field), "using sentinel");
                field.sentinel().to_string()
            }
        }
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        field,
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DepartureExtractor {
        DepartureExtractor::new(DepartureSelectors::default()).unwrap()
    }

    fn station(name: &str, accessible: bool) -> Station {
        Station::new(name, accessible).unwrap()
    }

    fn widget(train: Option<&str>, time: Option<&str>, track: Option<&str>) -> String {
        let mut html = String::from(r#"<div class="media no-gutters p-3"><div class="media-body">"#);
        if let Some(train) = train {
            html.push_str(&format!(r#"<p class="mb-0">{train}</p>"#));
        }
        if let Some(time) = time {
            html.push_str(&format!(
                r#"<div class="d-flex flex-column ml-3 text-right"><p>{time}</p> <p>in 6 min</p></div>"#
            ));
        }
        if let Some(track) = track {
            html.push_str(&format!(
                r#"<p class="align-self-end mt-1 mb-0">{track}</p>"#
            ));
        }
        html.push_str("</div></div>");
        html
    }

    fn page(widgets: &[String]) -> String {
        format!("<html><body><main>{}</main></body></html>", widgets.concat())
    }

    #[test]
    fn extracts_all_fields() {
        let html = page(&[widget(Some("NEC Trenton"), Some("8:14 AM"), Some("Track 3"))]);
        let departures = extractor().extract(&html, &station("Newark Penn Station", true));

        assert_eq!(departures.len(), 1);
        let d = &departures[0];
        assert_eq!(d.train, "NEC Trenton");
        assert_eq!(d.time, "8:14 AM in 6 min");
        assert_eq!(d.track, "Track 3");
        assert_eq!(d.station, "Newark Penn Station");
        assert!(d.accessible);
    }

    #[test]
    fn no_containers_is_empty() {
        let departures = extractor().extract(
            "<html><body><p class=\"mb-0\">No trains</p></body></html>",
            &station("Summit", true),
        );
        assert!(departures.is_empty());

        assert!(extractor().extract("", &station("Summit", true)).is_empty());
    }

    #[test]
    fn missing_track_uses_sentinel() {
        let html = page(&[widget(Some("Morristown Line Dover"), Some("9:02 AM"), None)]);
        let departures = extractor().extract(&html, &station("Summit", true));

        assert_eq!(departures.len(), 1);
        assert_eq!(departures[0].track, "Track Not Available");
        assert_eq!(departures[0].train, "Morristown Line Dover");
        assert_eq!(departures[0].time, "9:02 AM in 6 min");
    }

    #[test]
    fn inline_markup_kept_as_presented() {
        let html = page(&[widget(Some("NEC <b>Tren</b>ton"), Some("8:14 AM"), Some("Track <b>3</b>"))]);
        let departures = extractor().extract(&html, &station("Newark Penn Station", true));

        assert_eq!(departures[0].train, "NEC Trenton");
        assert_eq!(departures[0].track, "Track 3");
    }

    #[test]
    fn missing_train_does_not_borrow_track() {
        let html = page(&[widget(None, Some("9:02 AM"), Some("Track 1"))]);
        let departures = extractor().extract(&html, &station("Summit", true));

        assert_eq!(departures[0].train, "Unknown Train");
        assert_eq!(departures[0].track, "Track 1");
    }

    #[test]
    fn empty_container_gets_all_sentinels() {
        let html = page(&[widget(None, None, None)]);
        let departures = extractor().extract(&html, &station("Summit", false));

        assert_eq!(departures.len(), 1);
        assert_eq!(departures[0].train, Field::Train.sentinel());
        assert_eq!(departures[0].time, Field::Time.sentinel());
        assert_eq!(departures[0].track, Field::Track.sentinel());
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let html = page(&[widget(Some("  "), Some("9:02 AM"), Some("Track 1"))]);
        let departures = extractor().extract(&html, &station("Summit", true));

        assert_eq!(departures[0].train, "Unknown Train");
    }

    #[test]
    fn keeps_document_order_and_duplicates() {
        let first = widget(Some("NJCL Bay Head"), Some("7:00 AM"), Some("Track 1"));
        let second = widget(Some("RVL Raritan"), Some("7:05 AM"), Some("Track 2"));
        let html = page(&[first.clone(), second, first]);
        let departures = extractor().extract(&html, &station("Newark Penn Station", true));

        let trains: Vec<_> = departures.iter().map(|d| d.train.as_str()).collect();
        assert_eq!(trains, vec!["NJCL Bay Head", "RVL Raritan", "NJCL Bay Head"]);
        assert_eq!(departures[0], departures[2]);
    }

    #[test]
    fn fixture_page() {
        let html = std::fs::read_to_string("data/fixtures/stations/Newark Penn Station.html")
            .unwrap();
        let departures = extractor().extract(&html, &station("Newark Penn Station", true));

        assert_eq!(departures.len(), 3);
        assert_eq!(departures[0].train, "NEC Trenton");
        assert_eq!(departures[2].track, "Track Not Available");
    }

    #[test]
    fn invalid_selector_is_error() {
        let selectors = DepartureSelectors {
            track: "p[".to_string(),
            ..DepartureSelectors::default()
        };
        let err = DepartureExtractor::new(selectors).unwrap_err();
        assert!(matches!(err, ExtractError::Selector { field: "track", .. }));
    }

    #[test]
    fn sentinels() {
        assert_eq!(Field::Train.sentinel(), "Unknown Train");
        assert_eq!(Field::Time.sentinel(), "Time Not Available");
        assert_eq!(Field::Track.sentinel(), "Track Not Available");
    }
}
