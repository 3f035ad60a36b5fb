//! # Domain Models
//!
//! Canonical types for the price data skewtick works on.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker |
//! | [`Interval`] | Bar granularity (`1d`, `1wk`, ...) |
//! | [`Period`] | Trailing lookback range (`6mo`, `1y`, ...) |
//! | [`UtcDateTime`] | UTC timestamp |
//! | [`Bar`] | OHLCV bar |
//! | [`PriceSeries`] | Date-ordered bars for one symbol |
//!
//! All types validate their invariants at construction:
//!
//! ```rust
//! use skewtick_core::{Bar, UtcDateTime, ValidationError};
//!
//! let ts = UtcDateTime::parse("2024-01-02T14:30:00Z").unwrap();
//! let invalid = Bar::new(ts, 100.0, 95.0, 105.0, 102.0, Some(1_000));
//! assert!(matches!(invalid, Err(ValidationError::InvalidBarRange)));
//! ```

mod interval;
mod models;
mod period;
mod symbol;
mod timestamp;

pub use interval::Interval;
pub use models::{Bar, PriceSeries};
pub use period::Period;
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
