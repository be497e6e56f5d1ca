//! Record sink.
//!
//! Serializes stations, departures and FAQ entries to flat files in an
//! output directory.

mod error;
mod files;

pub use error::SinkError;
pub use files::{CsvSink, DEPARTURES_FILE, FAQS_CSV_FILE, FAQS_JSON_FILE, STATIONS_FILE};
