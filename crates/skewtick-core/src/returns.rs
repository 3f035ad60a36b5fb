//! Log return transform.

use time::Date;

use crate::PriceSeries;

/// One log return, dated by the later of the two closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPoint {
    pub date: Date,
    pub value: f64,
}

/// Log returns derived from a [`PriceSeries`]; one element shorter than the
/// series because the first bar has no prior close.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.value).collect()
    }

    pub fn dates(&self) -> Vec<Date> {
        self.points.iter().map(|point| point.date).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `ln(close_t / close_{t-1})` for every consecutive pair of bars.
pub fn log_returns(series: &PriceSeries) -> ReturnSeries {
    let points = series
        .bars()
        .windows(2)
        .map(|pair| ReturnPoint {
            date: pair[1].date(),
            value: (pair[1].close / pair[0].close).ln(),
        })
        .collect();

    ReturnSeries { points }
}

/// Undated variant over a raw close slice.
pub fn log_returns_from_closes(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|pair| (pair[1] / pair[0]).ln())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;
    use time::macros::date;

    fn series(closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes(
            Symbol::parse("NVDA").expect("symbol"),
            date!(2024 - 01 - 01),
            closes,
            Some(1_000),
        )
        .expect("series")
    }

    #[test]
    fn length_is_one_less_than_prices() {
        let returns = log_returns(&series(&[100.0, 105.0, 102.0, 108.0, 103.0]));
        assert_eq!(returns.len(), 4);
    }

    #[test]
    fn first_return_is_dated_by_second_bar() {
        let returns = log_returns(&series(&[100.0, 105.0]));
        let point = returns.points()[0];

        assert_eq!(point.date, date!(2024 - 01 - 02));
        assert!((point.value - (1.05f64).ln()).abs() < 1e-15);
    }

    #[test]
    fn single_bar_yields_no_returns() {
        assert!(log_returns(&series(&[100.0])).is_empty());
        assert!(log_returns_from_closes(&[]).is_empty());
    }

    #[test]
    fn dated_and_undated_variants_agree() {
        let closes = [100.0, 105.0, 102.0, 108.0, 103.0];
        assert_eq!(
            log_returns(&series(&closes)).values(),
            log_returns_from_closes(&closes)
        );
    }
}
