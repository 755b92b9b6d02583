//! Date range shorthands and custom date windows

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::core::error::ValidationError;

/// A named reporting period, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Last7Days,
    Last28Days,
    Last30Days,
    Last91Days,
    Month,
    Last6Months,
    Last12Months,
    Year,
    AllTime,
}

impl Period {
    /// Every supported shorthand, in the order surfaced to clients.
    pub const ALL: [Period; 10] = [
        Period::Day,
        Period::Last7Days,
        Period::Last28Days,
        Period::Last30Days,
        Period::Last91Days,
        Period::Month,
        Period::Last6Months,
        Period::Last12Months,
        Period::Year,
        Period::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Last7Days => "7d",
            Period::Last28Days => "28d",
            Period::Last30Days => "30d",
            Period::Last91Days => "91d",
            Period::Month => "month",
            Period::Last6Months => "6mo",
            Period::Last12Months => "12mo",
            Period::Year => "year",
            Period::AllTime => "all",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown date range shorthand: '{}'", s))
    }
}

/// The reporting window of a query: a named period or an explicit
/// `[start, end]` pair of calendar dates.
///
/// Custom ranges are validated on construction: both bounds must be
/// ISO-8601 dates and `start` must fall strictly before `end` on the
/// calendar. Equal dates are rejected.
///
/// # Examples
///
/// ```
/// use plausible_domain::query::date_range::DateRange;
///
/// let range = DateRange::parse_custom("2024-01-01", "2024-01-31").unwrap();
/// assert_eq!(
///     serde_json::to_string(&range).unwrap(),
///     r#"["2024-01-01","2024-01-31"]"#
/// );
///
/// assert!(DateRange::parse_custom("2024-01-31", "2024-01-01").is_err());
/// assert!(DateRange::parse_custom("2024-01-01", "2024-01-01").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Period(Period),
    Custom { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    /// Build a custom range, enforcing calendar order.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::invalid_date_range(format!(
                "Invalid date range: start '{}' must be strictly before end '{}'",
                start, end
            ))
            .with_details("Use [\"YYYY-MM-DD\", \"YYYY-MM-DD\"] with distinct, ordered dates"));
        }
        Ok(DateRange::Custom { start, end })
    }

    /// Parse and validate a custom range from two ISO-8601 date strings.
    pub fn parse_custom(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = parse_iso_date(start)?;
        let end = parse_iso_date(end)?;
        DateRange::custom(start, end)
    }
}

fn parse_iso_date(s: &str) -> Result<NaiveDate, ValidationError> {
    s.parse::<NaiveDate>().map_err(|_| {
        ValidationError::invalid_date_range(format!("Invalid ISO-8601 date: '{}'", s))
            .with_details("Dates must use the YYYY-MM-DD format")
    })
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DateRange::Period(period) => serializer.serialize_str(period.as_str()),
            DateRange::Custom { start, end } => {
                [start.to_string(), end.to_string()].serialize(serializer)
            }
        }
    }
}
