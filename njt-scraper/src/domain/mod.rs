//! Domain types for the NJ TRANSIT scraper.
//!
//! These are the flat records produced by a scrape run. Stations validate
//! their name at construction; departures and FAQ entries carry free text
//! as presented by the site.

mod departure;
mod faq;
mod station;

pub use departure::Departure;
pub use faq::FaqEntry;
pub use station::{InvalidStation, Station};
