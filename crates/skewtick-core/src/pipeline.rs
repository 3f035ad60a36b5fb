//! End-to-end run: fetch, transform, aggregate, render, report.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::data_source::{BarsRequest, DataSource, SourceError};
use crate::export::{write_csv, AnalysisRow, AnalysisTable, ExportError};
use crate::render::{ChartRenderer, RenderError};
use crate::returns::log_returns;
use crate::stats::{
    rolling_skewness, StatsError, SummaryStats, DEFAULT_ROLLING_WINDOW, MIN_SKEW_OBSERVATIONS,
};
use crate::{CoreError, Interval, Period, ProviderId, Symbol, ValidationError};

pub const DEFAULT_SYMBOL: &str = "NVDA";
pub const DEFAULT_OUTPUT_DIR: &str = "docs";

/// Everything a run needs to know; the defaults reproduce the six-month NVDA
/// daily report.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub symbol: Symbol,
    pub period: Period,
    pub interval: Interval,
    pub window: usize,
    pub output_dir: PathBuf,
    pub csv_path: Option<PathBuf>,
    /// Draw charts without captions or tick labels.
    pub plain_charts: bool,
    /// Attach the per-bar table to the report.
    pub include_rows: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            symbol: Symbol::from_static(DEFAULT_SYMBOL),
            period: Period::default(),
            interval: Interval::default(),
            window: DEFAULT_ROLLING_WINDOW,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            csv_path: None,
            plain_charts: false,
            include_rows: false,
        }
    }
}

impl PipelineConfig {
    /// Default run for another ticker.
    pub fn for_symbol(symbol: &str) -> Result<Self, PipelineError> {
        Ok(Self {
            symbol: Symbol::parse(symbol)?,
            ..Self::default()
        })
    }

    pub fn volume_title(&self) -> String {
        format!(
            "{} {} Volume - {}",
            self.symbol,
            capitalize(self.interval.adjective()),
            self.period.title()
        )
    }

    pub fn skew_title(&self) -> String {
        format!(
            "{} {}-{} Rolling Skew - {}",
            self.symbol,
            self.window,
            self.interval.window_unit(),
            self.period.title()
        )
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data source error: {0}")]
    Source(#[from] SourceError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Stats(#[from] StatsError),
    #[error("{symbol}: need at least {required} log returns for skewness, got {got}")]
    InsufficientData {
        symbol: Symbol,
        required: usize,
        got: usize,
    },
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// One bar of the per-bar table carried by the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: String,
    pub close: f64,
    pub log_return: Option<f64>,
    pub sma5: Option<f64>,
    pub sma20: Option<f64>,
    pub rolling_skew: Option<f64>,
}

impl From<&AnalysisRow> for ReportRow {
    fn from(row: &AnalysisRow) -> Self {
        Self {
            date: row.date.clone(),
            close: row.close,
            log_return: row.log_return,
            sma5: row.sma5,
            sma20: row.sma20,
            rolling_skew: row.rolling_skew,
        }
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkewReport {
    pub symbol: Symbol,
    pub source: ProviderId,
    pub period: Period,
    pub interval: Interval,
    pub window: usize,
    pub first_date: String,
    pub last_date: String,
    pub bars: usize,
    pub returns: usize,
    pub rolling_points: usize,
    pub skewness: f64,
    pub latest_rolling_skew: Option<f64>,
    pub summary: SummaryStats,
    pub volume_chart: PathBuf,
    /// `None` when no rolling window filled and no chart was drawn.
    pub skew_chart: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<ReportRow>>,
}

impl SkewReport {
    /// The one-line stdout summary.
    pub fn headline(&self) -> String {
        format!(
            "{} {} log return skewness over the {}: {}",
            self.symbol,
            self.interval.adjective(),
            self.period.phrase(),
            self.skewness
        )
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, CoreError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Fetch bars from `source` and produce skewness statistics and charts.
///
/// Failures are not retried; the first error ends the run.
pub async fn run_pipeline(
    source: &dyn DataSource,
    config: &PipelineConfig,
) -> Result<SkewReport, PipelineError> {
    if config.window < MIN_SKEW_OBSERVATIONS {
        return Err(StatsError::WindowTooSmall {
            window: config.window,
        }
        .into());
    }

    let request = BarsRequest::new(config.symbol.clone(), config.period, config.interval);
    let series = source.bars(request).await?;
    if series.is_empty() {
        return Err(SourceError::no_data(format!(
            "{} returned no bars for {}",
            source.id(),
            config.symbol
        ))
        .into());
    }
    info!(source = %source.id(), symbol = %series.symbol, bars = series.len(), "fetched price series");

    let returns = log_returns(&series);
    let values = returns.values();
    let rolling = rolling_skewness(&values, config.window)?;
    let summary = SummaryStats::from_returns(&values).map_err(|_| PipelineError::InsufficientData {
        symbol: config.symbol.clone(),
        required: MIN_SKEW_OBSERVATIONS,
        got: values.len(),
    })?;
    let rolling_points = rolling.iter().flatten().count();
    info!(
        returns = values.len(),
        rolling_points,
        skewness = summary.skewness,
        "computed return statistics"
    );

    let mut renderer = ChartRenderer::new(&config.output_dir);
    if config.plain_charts {
        renderer = renderer.without_text();
    }
    let volume_chart = renderer.render_volume(&series, &config.volume_title())?;
    let skew_chart = if rolling_points > 0 {
        Some(renderer.render_rolling_skew(
            &series.symbol,
            &returns,
            &rolling,
            &config.skew_title(),
        )?)
    } else {
        // Not enough history for a single window; leave no stale chart behind.
        let path = renderer.skew_path(&series.symbol);
        warn!(
            window = config.window,
            returns = values.len(),
            "series shorter than rolling window; skew chart not drawn"
        );
        remove_stale(&path)?;
        None
    };

    let table = if config.csv_path.is_some() || config.include_rows {
        Some(AnalysisTable::build(&series, &returns, &rolling)?)
    } else {
        None
    };
    let csv = match (&config.csv_path, &table) {
        (Some(path), Some(table)) => {
            write_csv(path, table)?;
            Some(path.clone())
        }
        _ => None,
    };
    let rows = table
        .filter(|_| config.include_rows)
        .map(|table| table.rows.iter().map(ReportRow::from).collect());

    let bars = series.bars();
    Ok(SkewReport {
        symbol: series.symbol.clone(),
        source: source.id(),
        period: config.period,
        interval: config.interval,
        window: config.window,
        first_date: bars.first().map(|bar| bar.ts.date_string()).unwrap_or_default(),
        last_date: bars.last().map(|bar| bar.ts.date_string()).unwrap_or_default(),
        bars: series.len(),
        returns: values.len(),
        rolling_points,
        skewness: summary.skewness,
        latest_rolling_skew: rolling.last().copied().flatten(),
        summary,
        volume_chart,
        skew_chart,
        csv,
        rows,
    })
}

fn remove_stale(path: &std::path::Path) -> Result<(), PipelineError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(ExportError::Io(error).into()),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
