/// Utilities for date and date-range handling
///
/// Provides the date-range presets used by the transaction and routing slip
/// filters.
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive date range picked in a filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Build a range; inverted bounds are swapped
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    /// The `n` days ending with `today` (both inclusive), clamped at the
    /// earliest representable date
    pub fn last_n_days(today: NaiveDate, n: u32) -> Self {
        let span = i64::from(n.max(1)) - 1;
        let from = today
            .checked_sub_signed(Duration::days(span))
            .unwrap_or(NaiveDate::MIN);
        Self::new(from, today)
    }

    /// First to last day of the month `today` falls in
    pub fn current_month(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        let next_month_start = if start.month() == 12 {
            NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
        };
        let end = next_month_start
            .map(|d| d - Duration::days(1))
            .unwrap_or(today);
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Bounds as the `YYYY-MM-DD` strings the API expects
    pub fn to_api(&self) -> (String, String) {
        (
            self.from.format("%Y-%m-%d").to_string(),
            self.to.format("%Y-%m-%d").to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_inverted_range_is_swapped() {
        let range = DateRange::new(d(2024, 5, 10), d(2024, 5, 1));
        assert_eq!(range.from, d(2024, 5, 1));
        assert_eq!(range.to, d(2024, 5, 10));
    }

    #[test]
    fn test_last_n_days() {
        let range = DateRange::last_n_days(d(2024, 3, 2), 7);
        assert_eq!(range.from, d(2024, 2, 25));
        assert_eq!(range.to, d(2024, 3, 2));
        assert!(range.contains(d(2024, 2, 29)));

        let today_only = DateRange::last_n_days(d(2024, 3, 2), 0);
        assert_eq!(today_only.from, today_only.to);
    }

    #[test]
    fn test_last_n_days_clamps_huge_span() {
        let today = d(2024, 3, 2);
        let range = DateRange::last_n_days(today, u32::MAX);
        assert_eq!(range.from, NaiveDate::MIN);
        assert_eq!(range.to, today);
        assert!(range.contains(d(1, 1, 1)));
    }

    #[test]
    fn test_current_month_december() {
        let range = DateRange::current_month(d(2023, 12, 15));
        assert_eq!(range.to_api(), ("2023-12-01".into(), "2023-12-31".into()));
    }

    #[test]
    fn test_current_month_leap_february() {
        let range = DateRange::current_month(d(2024, 2, 10));
        assert_eq!(range.to, d(2024, 2, 29));
    }
}
