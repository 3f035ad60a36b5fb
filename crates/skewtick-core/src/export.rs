//! Per-bar CSV export of the analysis table.

use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::stats::{simple_moving_average, SMA_LONG_WINDOW, SMA_SHORT_WINDOW};
use crate::{PriceSeries, ReturnSeries};

/// Column order of the exported table.
pub const CSV_HEADER: [&str; 10] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "SMA5",
    "SMA20",
    "LogReturn",
    "RollingSkew",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("column lengths differ: bars={bars}, returns={returns}, rolling={rolling}")]
    LengthMismatch {
        bars: usize,
        returns: usize,
        rolling: usize,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One row per bar; the first row has no return and no rolling value, and the
/// moving averages stay empty until their window of closes fills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: Option<u64>,
    #[serde(rename = "SMA5")]
    pub sma5: Option<f64>,
    #[serde(rename = "SMA20")]
    pub sma20: Option<f64>,
    #[serde(rename = "LogReturn")]
    pub log_return: Option<f64>,
    #[serde(rename = "RollingSkew")]
    pub rolling_skew: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisTable {
    pub rows: Vec<AnalysisRow>,
}

impl AnalysisTable {
    /// Join bars with their returns and rolling skewness.
    ///
    /// `returns` and `rolling` are indexed by return, so they must both be one
    /// shorter than `series` (or empty for an empty series).
    pub fn build(
        series: &PriceSeries,
        returns: &ReturnSeries,
        rolling: &[Option<f64>],
    ) -> Result<Self, ExportError> {
        let expected = series.len().saturating_sub(1);
        if returns.len() != expected || rolling.len() != expected {
            return Err(ExportError::LengthMismatch {
                bars: series.len(),
                returns: returns.len(),
                rolling: rolling.len(),
            });
        }

        let closes = series.closes();
        let sma5 = simple_moving_average(&closes, SMA_SHORT_WINDOW);
        let sma20 = simple_moving_average(&closes, SMA_LONG_WINDOW);

        let rows = series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let (log_return, rolling_skew) = match i.checked_sub(1) {
                    Some(r) => (Some(returns.points()[r].value), rolling[r]),
                    None => (None, None),
                };
                AnalysisRow {
                    date: bar.ts.date_string(),
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume,
                    sma5: sma5[i],
                    sma20: sma20[i],
                    log_return,
                    rolling_skew,
                }
            })
            .collect();

        Ok(Self { rows })
    }
}

/// Write the table as CSV, creating parent directories and overwriting any
/// existing file. Undefined cells are left empty.
pub fn write_csv(path: &Path, table: &AnalysisTable) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    if table.rows.is_empty() {
        writer.write_record(CSV_HEADER)?;
    }
    for row in &table.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.rows.len(), "wrote analysis csv");
    Ok(())
}
