use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Bar granularity accepted by the chart endpoint for trailing ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1wk")]
    OneWeek,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
}

impl Interval {
    pub const ALL: [Self; 5] = [
        Self::OneDay,
        Self::FiveDays,
        Self::OneWeek,
        Self::OneMonth,
        Self::ThreeMonths,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneWeek => "1wk",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
        }
    }

    /// Adjective used in report lines and chart titles ("daily", "weekly").
    pub const fn adjective(self) -> &'static str {
        match self {
            Self::OneDay => "daily",
            Self::FiveDays => "5-day",
            Self::OneWeek => "weekly",
            Self::OneMonth => "monthly",
            Self::ThreeMonths => "quarterly",
        }
    }

    /// Unit used for rolling window labels ("30-Day Rolling Skew").
    pub const fn window_unit(self) -> &'static str {
        match self {
            Self::OneDay => "Day",
            Self::FiveDays => "Bar",
            Self::OneWeek => "Week",
            Self::OneMonth => "Month",
            Self::ThreeMonths => "Quarter",
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(Self::OneDay),
            "5d" => Ok(Self::FiveDays),
            "1wk" => Ok(Self::OneWeek),
            "1mo" => Ok(Self::OneMonth),
            "3mo" => Ok(Self::ThreeMonths),
            other => Err(ValidationError::InvalidInterval {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_interval() {
        let interval = Interval::from_str("1D").expect("must parse");
        assert_eq!(interval, Interval::OneDay);
        assert_eq!(Interval::default(), Interval::OneDay);
    }

    #[test]
    fn rejects_intraday_interval() {
        let err = Interval::from_str("5m").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidInterval { .. }));
    }

    #[test]
    fn round_trips_through_as_str() {
        for interval in Interval::ALL {
            assert_eq!(Interval::from_str(interval.as_str()), Ok(interval));
        }
    }
}
