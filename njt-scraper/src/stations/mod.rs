//! Station catalog.
//!
//! Lists the stations a run visits, either from the live autocomplete
//! widget on the station-selection page (with a minimal fallback list) or
//! from a built-in table. The strategy is a configuration choice.

mod autocomplete;
mod catalog;
mod error;

pub use autocomplete::parse_autocomplete;
pub use catalog::{
    CatalogOrigin, CatalogSnapshot, DEFAULT_STATIONS_URL, StationCatalog, StationSource,
};
pub use error::CatalogError;
