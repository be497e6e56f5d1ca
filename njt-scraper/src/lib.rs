//! NJ TRANSIT website scraper.
//!
//! Collects the station list, each station's scheduled departures, and the
//! FAQ page from the public NJ TRANSIT site, and writes them to CSV/JSON
//! files.

pub mod config;
pub mod departures;
pub mod domain;
pub mod faq;
pub mod fetch;
pub mod pipeline;
pub mod sink;
pub mod stations;
pub mod text;
