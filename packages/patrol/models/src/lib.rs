#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Core data model for the patrol monitoring engine.
//!
//! Defines the daily patrol value (where "no entry" is deliberately distinct
//! from a recorded zero), the monthly dataset every municipality appears in,
//! the activity tier taxonomy with its three concurrent threshold policies,
//! and the classification tallies derived from them.

use std::collections::BTreeSet;

use bantay_geography::Municipality;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// A single day's patrol count for one municipality.
///
/// `NoEntry` means no meaningful count was ever recorded for the day. A
/// recorded `Count(0)` is a different statement ("patrolled nothing") and
/// the two are only conflated by the normalizer's all-zero-month rule.
///
/// Serializes as a nullable number: `NoEntry` is `null`, `Count(n)` is `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum DailyPatrolValue {
    /// No meaningful entry was recorded.
    NoEntry,
    /// A recorded patrol count, possibly zero.
    Count(u32),
}

impl DailyPatrolValue {
    /// Returns the recorded count, treating `NoEntry` as 0.
    #[must_use]
    pub const fn count_or_zero(self) -> u32 {
        match self {
            Self::NoEntry => 0,
            Self::Count(count) => count,
        }
    }

    /// Returns `true` when a count was actually recorded.
    #[must_use]
    pub const fn is_entry(self) -> bool {
        matches!(self, Self::Count(_))
    }
}

impl From<Option<u32>> for DailyPatrolValue {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::NoEntry, Self::Count)
    }
}

impl From<DailyPatrolValue> for Option<u32> {
    fn from(value: DailyPatrolValue) -> Self {
        match value {
            DailyPatrolValue::NoEntry => None,
            DailyPatrolValue::Count(count) => Some(count),
        }
    }
}

/// A (year, month) period key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl MonthKey {
    /// Creates a new month key. Validity is checked where day counts are
    /// needed, not at construction.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Returns the number of days in this month, or `None` when the key
    /// does not name a valid Gregorian month.
    #[must_use]
    pub fn day_count(self) -> Option<u32> {
        bantay_calendar::days_in_month(self.year, self.month)
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The set of months whose data is permanently fixed to all-no-entry and
/// rejected for writing.
///
/// Locked months are supplied by the caller on every computation; nothing
/// here caches or hardcodes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedMonths(BTreeSet<MonthKey>);

impl LockedMonths {
    /// Creates an empty set: no month is locked.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns `true` when the given month is locked.
    #[must_use]
    pub fn contains(&self, month: MonthKey) -> bool {
        self.0.contains(&month)
    }

    /// Marks a month as locked. Returns `false` if it already was.
    pub fn insert(&mut self, month: MonthKey) -> bool {
        self.0.insert(month)
    }
}

impl FromIterator<MonthKey> for LockedMonths {
    fn from_iter<I: IntoIterator<Item = MonthKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Activity tier assigned to a day or municipality under a threshold policy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityTier {
    /// Met the selected policy's active threshold.
    Active,
    /// Exactly one below the active threshold; only produced by policies
    /// with a warning band.
    Warning,
    /// Below the active threshold (including recorded zeros, where the
    /// policy counts them).
    Inactive,
    /// Nothing classifiable: no entry was recorded, or (under the barangay
    /// quota) a zero count measured nothing against the quota. Kept out of
    /// tallies by policies that produce it.
    NoEntry,
}

impl ActivityTier {
    /// Returns all tiers in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Active, Self::Warning, Self::Inactive, Self::NoEntry]
    }
}

/// One of the three concurrent threshold policies.
///
/// Each serving context selects its own policy explicitly; they are never
/// merged into a single threshold, and adding context must never change the
/// thresholds of another.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ThresholdPolicy {
    /// Dashboard tiles for the reference day: active at 14+, warning at
    /// exactly 13, inactive below; no-entry days count as inactive.
    DashboardReferenceDay,
    /// Operational daily monitoring: active at 5+, inactive below; no
    /// warning band; no-entry days count as inactive.
    OperationalDaily,
    /// Barangay coverage quota: active when the count reaches the
    /// municipality's required barangays; days without a usable entry are
    /// excluded from the tallies entirely.
    BarangayQuota,
}

impl ThresholdPolicy {
    /// Returns `true` when the policy defines a warning band between
    /// active and inactive.
    #[must_use]
    pub const fn has_warning_band(self) -> bool {
        matches!(self, Self::DashboardReferenceDay)
    }

    /// Returns all policies.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::DashboardReferenceDay,
            Self::OperationalDaily,
            Self::BarangayQuota,
        ]
    }
}

/// One municipality's daily values within a [`MonthlyDataset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityDays {
    /// The municipality this row belongs to.
    pub municipality: Municipality,
    /// One value per calendar day; index 0 is the 1st of the month.
    pub days: Vec<DailyPatrolValue>,
}

/// A complete month of daily patrol values.
///
/// Always carries exactly one row per registry municipality, in registry
/// order (district order, then display order within the district); consumers
/// rely on that order for every derived table. Locked datasets reject all
/// writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDataset {
    month: MonthKey,
    locked: bool,
    rows: Vec<MunicipalityDays>,
}

impl MonthlyDataset {
    /// Builds a dataset where every registry municipality has `day_count`
    /// no-entry slots.
    #[must_use]
    pub fn all_no_entry(month: MonthKey, day_count: u32, locked: bool) -> Self {
        let rows = Municipality::all()
            .iter()
            .map(|&municipality| MunicipalityDays {
                municipality,
                days: vec![DailyPatrolValue::NoEntry; day_count as usize],
            })
            .collect();
        Self {
            month,
            locked,
            rows,
        }
    }

    /// Returns the month this dataset covers.
    #[must_use]
    pub const fn month(&self) -> MonthKey {
        self.month
    }

    /// Returns `true` when the month is locked and rejects writes.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns the number of daily slots per municipality.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.rows.first().map_or(0, |row| row.days.len())
    }

    /// Returns all rows in registry order.
    #[must_use]
    pub fn rows(&self) -> &[MunicipalityDays] {
        &self.rows
    }

    /// Returns the daily values for one municipality, or `None` when the
    /// dataset (for example one deserialized from an external payload) has
    /// no row for it.
    #[must_use]
    pub fn days_for(&self, municipality: Municipality) -> Option<&[DailyPatrolValue]> {
        self.rows
            .iter()
            .find(|row| row.municipality == municipality)
            .map(|row| row.days.as_slice())
    }

    /// Returns a single day's value for one municipality.
    #[must_use]
    pub fn get_day(&self, municipality: Municipality, day_index: usize) -> Option<DailyPatrolValue> {
        self.days_for(municipality)?.get(day_index).copied()
    }

    /// Replaces a single daily slot for one municipality. This is the only
    /// per-day mutation; classification output is always recomputed, never
    /// patched.
    ///
    /// # Errors
    ///
    /// Fails without modifying anything when the month is locked, the day
    /// index is out of range, or the dataset has no row for the
    /// municipality.
    pub fn set_day(
        &mut self,
        municipality: Municipality,
        day_index: usize,
        value: DailyPatrolValue,
    ) -> Result<(), WriteError> {
        if self.locked {
            return Err(WriteError::LockedMonth { month: self.month });
        }
        let day_count = self.day_count();
        let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| row.municipality == municipality)
        else {
            return Err(WriteError::MissingRow { municipality });
        };
        let Some(slot) = row.days.get_mut(day_index) else {
            return Err(WriteError::DayOutOfRange {
                day_index,
                day_count,
            });
        };
        *slot = value;
        Ok(())
    }

    /// Replaces the entire daily array for one municipality.
    ///
    /// # Errors
    ///
    /// Fails without modifying anything when the month is locked, the new
    /// array's length differs from the dataset's day count, or the dataset
    /// has no row for the municipality.
    pub fn replace_days(
        &mut self,
        municipality: Municipality,
        days: Vec<DailyPatrolValue>,
    ) -> Result<(), WriteError> {
        if self.locked {
            return Err(WriteError::LockedMonth { month: self.month });
        }
        let expected = self.day_count();
        if days.len() != expected {
            return Err(WriteError::LengthMismatch {
                expected,
                actual: days.len(),
            });
        }
        let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| row.municipality == municipality)
        else {
            return Err(WriteError::MissingRow { municipality });
        };
        row.days = days;
        Ok(())
    }
}

/// Errors raised by dataset mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WriteError {
    /// The month is locked; its data is permanently all-no-entry.
    #[error("month {month} is locked and rejects writes")]
    LockedMonth {
        /// The locked month.
        month: MonthKey,
    },

    /// The day index does not exist in this month.
    #[error("day index {day_index} is out of range for a {day_count}-day month")]
    DayOutOfRange {
        /// The rejected zero-based index.
        day_index: usize,
        /// Number of days in the dataset's month.
        day_count: usize,
    },

    /// The replacement array does not match the month's length.
    #[error("expected {expected} daily values, got {actual}")]
    LengthMismatch {
        /// Days in the dataset's month.
        expected: usize,
        /// Length of the rejected array.
        actual: usize,
    },

    /// The dataset carries no row for the municipality.
    #[error("dataset has no row for {municipality}")]
    MissingRow {
        /// The municipality without a row.
        municipality: Municipality,
    },
}

/// Per-week-bucket tallies for one municipality and month.
///
/// Holds attended-action counts on one side of the reconciliation and summed
/// patrol counts on the other; the two never mix in a single value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCounts(pub [u32; bantay_calendar::WEEK_BUCKET_COUNT]);

impl WeeklyCounts {
    /// Returns the count for a week bucket (1-4); 0 for any other bucket
    /// number.
    #[must_use]
    pub fn for_bucket(self, bucket: u32) -> u32 {
        match usize::try_from(bucket) {
            Ok(bucket @ 1..=bantay_calendar::WEEK_BUCKET_COUNT) => self.0[bucket - 1],
            _ => 0,
        }
    }

    /// Adds to the count for a week bucket (1-4); other bucket numbers are
    /// ignored.
    pub fn add(&mut self, bucket: u32, count: u32) {
        if let Ok(bucket @ 1..=bantay_calendar::WEEK_BUCKET_COUNT) = usize::try_from(bucket) {
            self.0[bucket - 1] = self.0[bucket - 1].saturating_add(count);
        }
    }
}

/// Classification tallies for one municipality over one dataset, or over a
/// single reference day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Days classified active.
    pub active_days: u32,
    /// Days classified warning; only policies with a warning band produce
    /// these.
    pub warning_days: u32,
    /// Days classified inactive.
    pub inactive_days: u32,
    /// Sum of all recorded (non-no-entry) patrol counts.
    pub total_patrols: u32,
    /// `round(active_days / classifiable days * 100)`; 0 when nothing was
    /// classifiable.
    pub active_percentage: u32,
}

impl ClassificationResult {
    /// Builds the tallies for a single already-classified day, so a
    /// reference-day tier can flow into the district aggregation.
    #[must_use]
    pub fn from_single_day(tier: ActivityTier, value: DailyPatrolValue) -> Self {
        let mut result = Self {
            total_patrols: value.count_or_zero(),
            ..Self::default()
        };
        match tier {
            ActivityTier::Active => {
                result.active_days = 1;
                result.active_percentage = 100;
            }
            ActivityTier::Warning => result.warning_days = 1,
            ActivityTier::Inactive => result.inactive_days = 1,
            ActivityTier::NoEntry => {}
        }
        result
    }
}

/// Integer percentage of `numerator / denominator`, rounded half up.
///
/// A zero denominator yields 0 rather than an error: "no classifiable data"
/// reads as 0% everywhere in the dashboard.
#[must_use]
pub fn round_percent(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let scaled = 200 * u64::from(numerator) + u64::from(denominator);
    u32::try_from(scaled / (2 * u64::from(denominator))).unwrap_or(u32::MAX)
}
