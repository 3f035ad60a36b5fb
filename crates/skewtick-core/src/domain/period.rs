use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Trailing lookback range passed to the chart endpoint as `range=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub const ALL: [Self; 11] = [
        Self::OneDay,
        Self::FiveDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::TwoYears,
        Self::FiveYears,
        Self::TenYears,
        Self::YearToDate,
        Self::Max,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
            Self::YearToDate => "ytd",
            Self::Max => "max",
        }
    }

    /// Lowercase phrase for the report line, e.g. "last six months".
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::OneDay => "last day",
            Self::FiveDays => "last five days",
            Self::OneMonth => "last month",
            Self::ThreeMonths => "last three months",
            Self::SixMonths => "last six months",
            Self::OneYear => "last year",
            Self::TwoYears => "last two years",
            Self::FiveYears => "last five years",
            Self::TenYears => "last ten years",
            Self::YearToDate => "year to date",
            Self::Max => "full available history",
        }
    }

    /// Title-case suffix for chart captions, e.g. "Last 6 Months".
    pub const fn title(self) -> &'static str {
        match self {
            Self::OneDay => "Last Day",
            Self::FiveDays => "Last 5 Days",
            Self::OneMonth => "Last Month",
            Self::ThreeMonths => "Last 3 Months",
            Self::SixMonths => "Last 6 Months",
            Self::OneYear => "Last Year",
            Self::TwoYears => "Last 2 Years",
            Self::FiveYears => "Last 5 Years",
            Self::TenYears => "Last 10 Years",
            Self::YearToDate => "Year to Date",
            Self::Max => "Full History",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == normalized)
            .ok_or(ValidationError::InvalidPeriod { value: normalized })
    }
}
