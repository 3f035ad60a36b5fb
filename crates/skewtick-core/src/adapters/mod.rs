//! Data source adapters.
//!
//! - [`YahooAdapter`]: Yahoo Finance v8 chart endpoint (production)
//! - [`FixtureSource`]: preset in-memory outcome (tests, offline runs)

pub mod fixture;
pub mod yahoo;

pub use fixture::FixtureSource;
pub use yahoo::{parse_chart, YahooAdapter, DEFAULT_CHART_BASE_URL};
