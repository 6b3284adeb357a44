#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Calendar and period utilities for monthly patrol datasets.
//!
//! Every monthly dataset carries one slot per calendar day, and weekly
//! reporting divides a month into four fixed 7-day buckets. These helpers
//! define both mappings in one place so every consumer agrees on them.

use chrono::{Datelike, NaiveDate};

/// Number of week buckets in a reporting month.
///
/// Days past the 28th fold into the last bucket; no month ever produces a
/// fifth bucket.
pub const WEEK_BUCKET_COUNT: usize = 4;

/// Returns the number of days in the given Gregorian month, accounting for
/// leap years.
///
/// Returns `None` when `month` is not in `1..=12` or `year` is outside the
/// supported calendar range.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Returns the zero-based offset of `date` within its month's daily array.
#[must_use]
pub fn day_index(date: NaiveDate) -> usize {
    date.day0() as usize
}

/// Maps a day of the month (1-based) to its week bucket (1-4).
///
/// Buckets are fixed 7-day windows counted from the 1st of the month, not
/// ISO weeks. Days 29-31 fold into bucket 4 rather than opening a fifth
/// bucket.
#[must_use]
pub const fn week_bucket(day_of_month: u32) -> u32 {
    match day_of_month.saturating_sub(1) / 7 {
        0 => 1,
        1 => 2,
        2 => 3,
        _ => 4,
    }
}

/// Returns the dashboard reference day for `today`: yesterday, along with
/// its zero-based index within its own month.
///
/// Daily classification views report on the last completed day rather than
/// the in-progress one. Returns `None` only when `today` is the minimum
/// representable date.
#[must_use]
pub fn reference_day(today: NaiveDate) -> Option<(NaiveDate, usize)> {
    let yesterday = today.pred_opt()?;
    Some((yesterday, day_index(yesterday)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2025, 1), Some(31));
        assert_eq!(days_in_month(2025, 4), Some(30));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(2025, 12), Some(31));
    }

    #[test]
    fn leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2100, 2), Some(28));
    }

    #[test]
    fn invalid_months() {
        assert_eq!(days_in_month(2025, 0), None);
        assert_eq!(days_in_month(2025, 13), None);
    }

    #[test]
    fn day_index_is_zero_based() {
        let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(day_index(first), 0);
        assert_eq!(day_index(last), 30);
    }

    #[test]
    fn week_bucket_boundaries() {
        assert_eq!(week_bucket(1), 1);
        assert_eq!(week_bucket(7), 1);
        assert_eq!(week_bucket(8), 2);
        assert_eq!(week_bucket(14), 2);
        assert_eq!(week_bucket(15), 3);
        assert_eq!(week_bucket(22), 4);
        assert_eq!(week_bucket(28), 4);
    }

    #[test]
    fn week_bucket_folds_trailing_days() {
        assert_eq!(week_bucket(29), 4);
        assert_eq!(week_bucket(30), 4);
        assert_eq!(week_bucket(31), 4);
    }

    #[test]
    fn reference_day_is_yesterday() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let (day, index) = reference_day(today).unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());
        assert_eq!(index, 13);
    }

    #[test]
    fn reference_day_crosses_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let (day, index) = reference_day(today).unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(index, 28);
    }

    #[test]
    fn reference_day_crosses_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let (day, index) = reference_day(today).unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(index, 30);
    }
}
