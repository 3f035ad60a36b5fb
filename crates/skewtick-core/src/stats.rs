//! Return distribution statistics.
//!
//! Skewness follows the adjusted Fisher-Pearson convention used by pandas'
//! `Series.skew` and `Rolling.skew`:
//!
//! ```text
//! G1 = n * sqrt(n - 1) / (n - 2) * Σ(x - μ)³ / (Σ(x - μ)²)^(3/2)
//! ```
//!
//! Sums below `1e-14` are treated as exact zeros, so a constant sample has a
//! skewness of `0.0` rather than `NaN`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Observations per rolling skewness window.
pub const DEFAULT_ROLLING_WINDOW: usize = 30;

/// Trading days per year used to annualize the Sharpe ratio.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Smallest sample skewness is defined for.
pub const MIN_SKEW_OBSERVATIONS: usize = 3;

/// Short and long simple moving average windows over closes.
pub const SMA_SHORT_WINDOW: usize = 5;
pub const SMA_LONG_WINDOW: usize = 20;

const ZERO_TOLERANCE: f64 = 1e-14;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("rolling window must be at least 3 observations, got {window}")]
    WindowTooSmall { window: usize },
    #[error("need at least {required} observations, got {got}")]
    InsufficientData { required: usize, got: usize },
}

/// Sample skewness of `values`, or `None` with fewer than three observations.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < MIN_SKEW_OBSERVATIONS {
        return None;
    }

    let count = n as f64;
    let mean = values.iter().sum::<f64>() / count;
    let (m2, m3) = values.iter().fold((0.0, 0.0), |(m2, m3), value| {
        let d = value - mean;
        let d2 = d * d;
        (m2 + d2, m3 + d2 * d)
    });
    let m2 = zero_out_rounding(m2);
    let m3 = zero_out_rounding(m3);

    if m2 == 0.0 {
        return Some(0.0);
    }

    Some(count * (count - 1.0).sqrt() / (count - 2.0) * m3 / m2.powf(1.5))
}

/// Skewness of every trailing `window`-sized slice.
///
/// The output has one slot per input value: the first `window - 1` are
/// `None`, every later slot holds the skewness of the window ending there.
pub fn rolling_skewness(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, StatsError> {
    if window < MIN_SKEW_OBSERVATIONS {
        return Err(StatsError::WindowTooSmall { window });
    }

    let mut out = vec![None; values.len()];
    for (end, slot) in out.iter_mut().enumerate().skip(window - 1) {
        *slot = skewness(&values[end + 1 - window..=end]);
    }
    Ok(out)
}

/// Trailing mean of every `window`-sized slice.
///
/// One slot per input value: the first `window - 1` are `None`. A zero window
/// yields all `None`.
pub fn simple_moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    for (slot, chunk) in out.iter_mut().skip(window - 1).zip(values.windows(window)) {
        *slot = Some(chunk.iter().sum::<f64>() / window as f64);
    }
    out
}

/// Whole-sample summary of a return series.
///
/// Computed over log returns with the sample (n - 1) deviation, so the std
/// and Sharpe differ from figures built on simple returns with a population
/// deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean_return_daily: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_return_daily: f64,
    /// `mean / std * sqrt(252)`; zero when the series has no dispersion.
    pub sharpe_annual: f64,
    pub skewness: f64,
}

impl SummaryStats {
    pub fn from_returns(returns: &[f64]) -> Result<Self, StatsError> {
        let skewness = skewness(returns).ok_or(StatsError::InsufficientData {
            required: MIN_SKEW_OBSERVATIONS,
            got: returns.len(),
        })?;

        let count = returns.len();
        let n = count as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let squares = zero_out_rounding(returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>());
        let variance = squares / (n - 1.0);
        let std = variance.sqrt();
        let sharpe = if std > 0.0 {
            mean / std * TRADING_DAYS_PER_YEAR.sqrt()
        } else {
            0.0
        };

        Ok(Self {
            count,
            mean_return_daily: mean,
            std_return_daily: std,
            sharpe_annual: sharpe,
            skewness,
        })
    }
}

fn zero_out_rounding(value: f64) -> f64 {
    if value.abs() < ZERO_TOLERANCE {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_adjusted_fisher_pearson_reference() {
        // scipy.stats.skew([1, 2, 3, 10], bias=False)
        let skew = skewness(&[1.0, 2.0, 3.0, 10.0]).expect("defined");
        assert!((skew - 1.763_632_614_803_888).abs() < 1e-12, "got {skew}");
    }

    #[test]
    fn undefined_below_three_observations() {
        assert_eq!(skewness(&[]), None);
        assert_eq!(skewness(&[0.01, -0.02]), None);
    }

    #[test]
    fn constant_sample_has_zero_skew() {
        assert_eq!(skewness(&[0.1, 0.1, 0.1, 0.1]), Some(0.0));
    }

    #[test]
    fn rolling_rejects_tiny_window() {
        assert_eq!(
            rolling_skewness(&[1.0, 2.0, 3.0], 2),
            Err(StatsError::WindowTooSmall { window: 2 })
        );
    }

    #[test]
    fn rolling_shorter_than_window_is_all_none() {
        let out = rolling_skewness(&[1.0, 2.0], 3).expect("valid window");
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn rolling_last_slot_equals_tail_skew() {
        let values = [0.5, -1.0, 2.0, 0.25, 3.0, -0.75];
        let out = rolling_skewness(&values, 4).expect("valid window");

        assert_eq!(out[..3], [None, None, None]);
        assert_eq!(out[5], skewness(&values[2..]));
    }

    #[test]
    fn sma_leaves_first_window_minus_one_slots_empty() {
        let out = simple_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 5);

        assert_eq!(out[..4], [None, None, None, None]);
        assert_eq!(out[4], Some(3.0));
        assert_eq!(out[5], Some(4.0));
    }

    #[test]
    fn sma_matches_hand_computed_average() {
        // (10 + 11 + 15) / 3 and (11 + 15 + 20) / 3
        let out = simple_moving_average(&[10.0, 11.0, 15.0, 20.0], 3);

        assert_eq!(out.len(), 4);
        assert!((out[2].expect("defined") - 12.0).abs() < 1e-12);
        assert!((out[3].expect("defined") - 46.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn sma_longer_than_series_or_zero_is_all_none() {
        assert_eq!(simple_moving_average(&[1.0, 2.0], SMA_LONG_WINDOW), vec![None, None]);
        assert_eq!(simple_moving_average(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn summary_uses_sample_std_and_annualizes_sharpe() {
        let summary = SummaryStats::from_returns(&[0.01, 0.02, 0.03]).expect("summary");

        assert_eq!(summary.count, 3);
        assert!((summary.mean_return_daily - 0.02).abs() < 1e-15);
        assert!((summary.std_return_daily - 0.01).abs() < 1e-15);
        assert!((summary.sharpe_annual - 2.0 * 252f64.sqrt()).abs() < 1e-9);
        assert!(summary.skewness.abs() < 1e-9);
    }

    #[test]
    fn summary_requires_three_returns() {
        assert_eq!(
            SummaryStats::from_returns(&[0.01]),
            Err(StatsError::InsufficientData {
                required: 3,
                got: 1
            })
        );
    }
}
