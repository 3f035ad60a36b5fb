//! Behavior tests for the return statistics.
//!
//! Reference values were computed with pandas (`Series.skew`,
//! `Rolling.skew`), which uses the adjusted Fisher-Pearson estimator.

use skewtick_core::returns::log_returns_from_closes;
use skewtick_core::stats::{DEFAULT_ROLLING_WINDOW, MIN_SKEW_OBSERVATIONS};
use skewtick_core::{
    log_returns, rolling_skewness, skewness, PriceSeries, StatsError, SummaryStats, Symbol,
};
use time::macros::date;

const TOLERANCE: f64 = 1e-9;

fn nvda_series(closes: &[f64]) -> PriceSeries {
    PriceSeries::from_closes(
        Symbol::parse("NVDA").expect("NVDA is valid"),
        date!(2024 - 01 - 02),
        closes,
        Some(1_000_000),
    )
    .expect("closes are positive")
}

/// Deterministic price path with a few sharp up moves.
fn trending_closes(len: usize) -> Vec<f64> {
    let mut price = 100.0;
    (0..len)
        .map(|i| {
            let step = match i % 7 {
                0 => 0.045,
                3 => -0.012,
                5 => -0.008,
                _ => 0.003,
            };
            price *= 1.0 + step;
            price
        })
        .collect()
}

// =============================================================================
// Log returns
// =============================================================================

#[test]
fn log_returns_match_hand_computed_values() {
    // Given: Five closing prices
    let series = nvda_series(&[100.0, 105.0, 102.0, 108.0, 103.0]);

    // When: Log returns are derived
    let returns = log_returns(&series).values();

    // Then: Each return is ln(p_t / p_{t-1})
    let expected = [
        0.048_790_164_169_432_05,
        -0.028_987_536_873_252_298,
        0.057_158_413_839_948_62,
        -0.047_402_238_894_583_906,
    ];
    assert_eq!(returns.len(), expected.len());
    for (got, want) in returns.iter().zip(expected) {
        assert!((got - want).abs() < 1e-15, "got {got}, want {want}");
    }
}

#[test]
fn log_returns_sum_to_total_log_change() {
    // Given: A longer price path
    let closes = trending_closes(60);

    // When: Returns are summed
    let total: f64 = log_returns_from_closes(&closes).iter().sum();

    // Then: They telescope to ln(last / first)
    let expected = (closes[59] / closes[0]).ln();
    assert!((total - expected).abs() < 1e-12);
}

// =============================================================================
// Scalar skewness
// =============================================================================

#[test]
fn skewness_matches_pandas_reference() {
    // Given: The log returns of the five-price sample
    let returns = log_returns_from_closes(&[100.0, 105.0, 102.0, 108.0, 103.0]);

    // When: Skewness is computed
    let skew = skewness(&returns).expect("four returns are enough");

    // Then: It matches pandas' Series.skew()
    assert!(
        (skew - -0.081_093_919_576_625_01).abs() < TOLERANCE,
        "got {skew}"
    );
}

#[test]
fn single_outlier_gives_positive_skew() {
    // Given: Three equal values and one large outlier
    let values = [1.0, 1.0, 1.0, 20.0];

    // Then: The adjusted estimator yields exactly 2
    let skew = skewness(&values).expect("defined");
    assert!((skew - 2.0).abs() < TOLERANCE, "got {skew}");

    // And: Mirroring the sample flips the sign
    let mirrored: Vec<f64> = values.iter().map(|v| -v).collect();
    let mirrored_skew = skewness(&mirrored).expect("defined");
    assert!((mirrored_skew + 2.0).abs() < TOLERANCE);
}

#[test]
fn symmetric_sample_has_zero_skew() {
    assert!(skewness(&[-3.0, -1.0, 0.0, 1.0, 3.0]).expect("defined").abs() < TOLERANCE);
}

#[test]
fn skewness_ignores_order_and_scale() {
    // Given: A sample, a shuffled copy and a rescaled copy
    let values = [0.02, -0.01, 0.05, 0.0, -0.03, 0.011];
    let shuffled = [0.0, 0.05, -0.03, 0.02, 0.011, -0.01];
    let scaled: Vec<f64> = values.iter().map(|v| v * 250.0 + 3.0).collect();

    // Then: All three share one skewness
    let base = skewness(&values).expect("defined");
    assert!((skewness(&shuffled).expect("defined") - base).abs() < TOLERANCE);
    assert!((skewness(&scaled).expect("defined") - base).abs() < TOLERANCE);
}

#[test]
fn skewness_needs_three_observations() {
    assert_eq!(MIN_SKEW_OBSERVATIONS, 3);
    assert_eq!(skewness(&[0.01, 0.02]), None);
    assert!(skewness(&[0.01, 0.02, 0.04]).is_some());
}

// =============================================================================
// Rolling skewness
// =============================================================================

#[test]
fn rolling_skew_leaves_first_window_minus_one_slots_undefined() {
    // Given: 40 returns and the default 30-observation window
    let returns = log_returns_from_closes(&trending_closes(41));
    assert_eq!(returns.len(), 40);

    // When: Rolling skewness is computed
    let rolling = rolling_skewness(&returns, DEFAULT_ROLLING_WINDOW).expect("valid window");

    // Then: One slot per return, 29 leading gaps, 11 defined values
    assert_eq!(rolling.len(), 40);
    assert!(rolling[..29].iter().all(Option::is_none));
    assert!(rolling[29..].iter().all(Option::is_some));
}

#[test]
fn each_rolling_value_equals_skew_of_its_window() {
    let returns = log_returns_from_closes(&trending_closes(50));
    let window = 10;

    let rolling = rolling_skewness(&returns, window).expect("valid window");

    for end in window - 1..returns.len() {
        let expected = skewness(&returns[end + 1 - window..=end]).expect("full window");
        let got = rolling[end].expect("defined");
        assert!((got - expected).abs() < 1e-12, "slot {end}");
    }
}

#[test]
fn rolling_over_flat_window_is_zero_not_nan() {
    // Given: A stretch of identical returns
    let returns = vec![0.01; 8];

    // When/Then: Every full window reports 0.0
    let rolling = rolling_skewness(&returns, 4).expect("valid window");
    assert!(rolling[3..].iter().all(|value| *value == Some(0.0)));
}

#[test]
fn rolling_rejects_windows_below_three() {
    assert_eq!(
        rolling_skewness(&[0.1, 0.2, 0.3], 2),
        Err(StatsError::WindowTooSmall { window: 2 })
    );
}

// =============================================================================
// Summary statistics
// =============================================================================

#[test]
fn summary_annualizes_sharpe_with_252_days() {
    // Given: Returns with known mean and sample deviation
    let returns = [0.01, 0.03, 0.02, 0.04, 0.0];

    // When: A summary is computed
    let summary = SummaryStats::from_returns(&returns).expect("enough data");

    // Then: Sharpe = mean / std * sqrt(252)
    let mean = 0.02;
    let std = (0.001f64 / 4.0).sqrt();
    assert_eq!(summary.count, 5);
    assert!((summary.mean_return_daily - mean).abs() < 1e-15);
    assert!((summary.std_return_daily - std).abs() < 1e-15);
    assert!((summary.sharpe_annual - mean / std * 252f64.sqrt()).abs() < 1e-9);
    assert_eq!(Some(summary.skewness), skewness(&returns));
}

#[test]
fn summary_of_constant_returns_has_zero_sharpe() {
    let summary = SummaryStats::from_returns(&[0.01, 0.01, 0.01]).expect("enough data");

    assert_eq!(summary.std_return_daily, 0.0);
    assert_eq!(summary.sharpe_annual, 0.0);
    assert_eq!(summary.skewness, 0.0);
}
