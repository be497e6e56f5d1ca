//! Departure extraction.
//!
//! Turns a station's departure-board HTML into [`Departure`](crate::domain::Departure)
//! records, substituting sentinels for sub-fields that cannot be found.

mod error;
mod extract;

pub use error::{ExtractError, MissingField};
pub use extract::{DepartureExtractor, DepartureSelectors, Field};
