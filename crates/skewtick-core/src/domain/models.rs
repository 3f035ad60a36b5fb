use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Interval, Symbol, UtcDateTime, ValidationError};

/// Daily (or coarser) OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub ts: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl Bar {
    pub fn new(
        ts: UtcDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_positive("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            ts,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    pub fn date(&self) -> Date {
        self.ts.date()
    }
}

/// Date-ordered bar series for a single instrument.
///
/// Dates are unique and strictly ascending; the constructor enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: Symbol,
    pub interval: Interval,
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, interval: Interval, bars: Vec<Bar>) -> Result<Self, ValidationError> {
        for pair in bars.windows(2) {
            if pair[1].date() <= pair[0].date() {
                return Err(ValidationError::UnorderedBars {
                    date: pair[1].ts.date_string(),
                });
            }
        }

        Ok(Self {
            symbol,
            interval,
            bars,
        })
    }

    /// Build a series from closing prices only, one bar per consecutive day
    /// starting at `start`. Open/high/low are pinned to the close.
    pub fn from_closes(
        symbol: Symbol,
        start: Date,
        closes: &[f64],
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        let mut bars = Vec::with_capacity(closes.len());
        let mut date = start;
        for &close in closes {
            bars.push(Bar::new(
                UtcDateTime::from_date(date),
                close,
                close,
                close,
                close,
                volume,
            )?);
            date = date.next_day().ok_or(ValidationError::TimestampOutOfRange {
                value: i64::from(date.to_julian_day()),
            })?;
        }

        Self::new(symbol, Interval::OneDay, bars)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Volumes with missing values reported as zero.
    pub fn volumes(&self) -> Vec<u64> {
        self.bars.iter().map(|bar| bar.volume.unwrap_or(0)).collect()
    }

    pub fn dates(&self) -> Vec<Date> {
        self.bars.iter().map(Bar::date).collect()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_non_negative(field, value)?;
    if value == 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}
