//! Data source trait and request/error types.
//!
//! [`DataSource`] is the seam between the pipeline and whoever supplies
//! bars: the Yahoo chart adapter in production, [`FixtureSource`] in tests.
//!
//! ```rust
//! use skewtick_core::{BarsRequest, Interval, Period, Symbol};
//!
//! let request = BarsRequest::new(Symbol::parse("NVDA").unwrap(), Period::SixMonths, Interval::OneDay);
//! assert_eq!(request.period.as_str(), "6mo");
//! ```
//!
//! [`FixtureSource`]: crate::adapters::FixtureSource

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{Interval, Period, PriceSeries, ProviderId, Symbol};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Transport failure: DNS, connect, TLS, timeout.
    Unavailable,
    /// Upstream answered with a failure status or an API-level error.
    Provider,
    /// Upstream answered but had no usable rows.
    NoData,
    /// Body could not be decoded.
    Malformed,
    InvalidRequest,
}

/// Structured data source error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Provider,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NoData,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Malformed,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Provider => "source.provider",
            SourceErrorKind::NoData => "source.no_data",
            SourceErrorKind::Malformed => "source.malformed",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for a trailing-range bar download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarsRequest {
    pub symbol: Symbol,
    pub period: Period,
    pub interval: Interval,
}

impl BarsRequest {
    pub fn new(symbol: Symbol, period: Period, interval: Interval) -> Self {
        Self {
            symbol,
            period,
            interval,
        }
    }
}

/// Supplies a [`PriceSeries`] for `(symbol, period, interval)` or fails with a
/// [`SourceError`].
pub trait DataSource: Send + Sync {
    fn id(&self) -> ProviderId;

    fn bars<'a>(
        &'a self,
        req: BarsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_per_kind() {
        assert_eq!(SourceError::unavailable("x").code(), "source.unavailable");
        assert_eq!(SourceError::provider("x").code(), "source.provider");
        assert_eq!(SourceError::no_data("x").code(), "source.no_data");
        assert_eq!(SourceError::malformed("x").code(), "source.malformed");
        assert_eq!(
            SourceError::invalid_request("x").code(),
            "source.invalid_request"
        );
    }

    #[test]
    fn only_transport_failures_are_retryable() {
        assert!(SourceError::unavailable("connection reset").retryable());
        assert!(!SourceError::no_data("empty").retryable());
    }

    #[test]
    fn display_includes_code() {
        let error = SourceError::no_data("yahoo returned no rows for NVDA");
        assert_eq!(
            error.to_string(),
            "yahoo returned no rows for NVDA (source.no_data)"
        );
    }
}
