use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// A calendar month encoded as `year * 100 + month` (e.g. `202603` for
/// March 2026).
///
/// Every staged transaction and every ledger entry is keyed by the month it
/// targets, which is not necessarily the month of its own date (re-imports
/// narrow to the requested month, they never correct it).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct YearMonth(i32);

impl YearMonth {
    /// Creates a `YearMonth` from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::Validation(format!(
                "invalid month: {month} (expected 1-12)"
            )));
        }
        if !(1970..=9999).contains(&year) {
            return Err(EngineError::Validation(format!("invalid year: {year}")));
        }
        Ok(Self(year * 100 + month as i32))
    }

    /// Parses the packed `YYYYMM` integer form used on the wire and in
    /// storage.
    pub fn from_packed(value: i32) -> Result<Self, EngineError> {
        Self::new(value / 100, (value % 100).max(0) as u32)
    }

    /// The month a date belongs to.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self(date.year() * 100 + date.month() as i32)
    }

    /// Returns `true` if `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }

    /// Returns the packed `YYYYMM` integer form.
    #[must_use]
    pub const fn packed(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.0 / 100
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        (self.0 % 100) as u32
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    /// Parses either the packed form (`202603`) or `2026-03`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::Validation(format!("invalid month: {s}"));
        let trimmed = s.trim();
        if let Some((year, month)) = trimmed.split_once('-') {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            return Self::new(year, month);
        }
        let packed: i32 = trimmed.parse().map_err(|_| invalid())?;
        Self::from_packed(packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_round_trip() {
        let ym = YearMonth::new(2026, 3).unwrap();
        assert_eq!(ym.packed(), 202603);
        assert_eq!(YearMonth::from_packed(202603).unwrap(), ym);
        assert_eq!(ym.to_string(), "2026-03");
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert!(YearMonth::new(2026, 0).is_err());
        assert!(YearMonth::new(2026, 13).is_err());
        assert!(YearMonth::from_packed(202600).is_err());
        assert!(YearMonth::from_packed(202613).is_err());
        assert!(YearMonth::from_packed(-1).is_err());
    }

    #[test]
    fn contains_checks_year_and_month() {
        let ym = YearMonth::new(2026, 3).unwrap();
        assert!(ym.contains(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()));
    }

    #[test]
    fn parses_both_wire_forms() {
        assert_eq!(
            "202603".parse::<YearMonth>().unwrap(),
            YearMonth::new(2026, 3).unwrap()
        );
        assert_eq!(
            "2026-03".parse::<YearMonth>().unwrap(),
            YearMonth::new(2026, 3).unwrap()
        );
        assert!("2026-00".parse::<YearMonth>().is_err());
        assert!("garbage".parse::<YearMonth>().is_err());
    }
}
