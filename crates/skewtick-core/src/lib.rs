//! # Skewtick Core
//!
//! Fetches daily price bars for a ticker, derives log returns, and reports
//! their skewness as a single number plus two PNG charts.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Data source adapters (Yahoo chart API, fixtures) |
//! | [`data_source`] | Data source trait and request/error types |
//! | [`domain`] | Domain models (Symbol, Period, Interval, Bar, PriceSeries) |
//! | [`error`] | Validation and serialization errors |
//! | [`export`] | Per-bar CSV export |
//! | [`http_client`] | HTTP client abstraction |
//! | [`pipeline`] | End-to-end run producing a [`SkewReport`] |
//! | [`render`] | Volume and rolling-skew PNG charts |
//! | [`returns`] | Log return transform |
//! | [`source`] | Provider identifiers |
//! | [`stats`] | Skewness, rolling skewness, summary statistics |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Data Source     │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest)        │
//! └────────┬────────┘     └──────────────────┘
//!          │ PriceSeries
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Returns / Stats │────▶│ Render / Export  │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skewtick_core::{run_pipeline, PipelineConfig, YahooAdapter};
//!
//! # async fn demo() -> Result<(), skewtick_core::PipelineError> {
//! let adapter = YahooAdapter::default();
//! let report = run_pipeline(&adapter, &PipelineConfig::default()).await?;
//! println!("{}", report.headline());
//! # Ok(())
//! # }
//! ```
//!
//! ## Statistics
//!
//! ```rust
//! use skewtick_core::stats::skewness;
//!
//! let skew = skewness(&[1.0, 2.0, 3.0, 10.0]).unwrap();
//! assert!((skew - 1.7636).abs() < 1e-4);
//! assert_eq!(skewness(&[0.5, 0.5]), None);
//! ```

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod export;
pub mod http_client;
pub mod pipeline;
pub mod render;
pub mod returns;
pub mod source;
pub mod stats;

// Adapters
pub use adapters::{FixtureSource, YahooAdapter};

// Data source trait and types
pub use data_source::{BarsRequest, DataSource, SourceError, SourceErrorKind};

// Domain models
pub use domain::{Bar, Interval, Period, PriceSeries, Symbol, UtcDateTime};

// Errors
pub use error::{CoreError, ValidationError};

// HTTP client
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Analysis
pub use export::{write_csv, AnalysisRow, AnalysisTable, ExportError};
pub use pipeline::{run_pipeline, PipelineConfig, PipelineError, ReportRow, SkewReport};
pub use render::{ChartRenderer, RenderError};
pub use returns::{log_returns, ReturnPoint, ReturnSeries};
pub use stats::{rolling_skewness, skewness, StatsError, SummaryStats};

pub use source::ProviderId;
