//! Common types for the shared crate

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthFilterError {
    #[error("Month filter must look like YYYY-MM, got {0:?}")]
    Format(String),

    #[error("Month out of range: {0}")]
    Month(u32),

    #[error("Year out of range: {0}")]
    Year(i32),
}

/// Years representable as four digits
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Calendar month used to filter personal history (`YYYY-MM` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthFilter {
    year: i32,
    month: u32,
}

impl MonthFilter {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthFilterError> {
        if !YEAR_RANGE.contains(&year) {
            return Err(MonthFilterError::Year(year));
        }
        if !(1..=12).contains(&month) {
            return Err(MonthFilterError::Month(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether `date` falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthFilter {
    type Err = MonthFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .filter(|(y, m)| {
                y.len() == 4
                    && m.len() == 2
                    && y.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit())
            })
            .ok_or_else(|| MonthFilterError::Format(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| MonthFilterError::Format(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthFilterError::Format(s.to_string()))?;
        Self::new(year, month)
    }
}

impl Serialize for MonthFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_year_month() {
        let month: MonthFilter = "2024-03".parse().unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 3);
        assert_eq!(month.to_string(), "2024-03");
    }

    #[test]
    fn rejects_malformed_months() {
        assert!("2024-3".parse::<MonthFilter>().is_err());
        assert!("24-03".parse::<MonthFilter>().is_err());
        assert!("2024/03".parse::<MonthFilter>().is_err());
        assert_eq!(
            "2024-13".parse::<MonthFilter>(),
            Err(MonthFilterError::Month(13))
        );
    }

    #[test]
    fn rejects_signed_or_oversized_years() {
        assert!(matches!(
            "+024-03".parse::<MonthFilter>(),
            Err(MonthFilterError::Format(_))
        ));
        assert!("2024-+3".parse::<MonthFilter>().is_err());
        assert_eq!(MonthFilter::new(10_000, 1), Err(MonthFilterError::Year(10_000)));
        assert_eq!(MonthFilter::new(-1, 1), Err(MonthFilterError::Year(-1)));
        assert_eq!(MonthFilter::new(9999, 12).unwrap().to_string(), "9999-12");
    }

    #[test]
    fn contains_checks_year_and_month() {
        let month = MonthFilter::new(2024, 3).unwrap();
        assert!(month.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()));
    }
}
