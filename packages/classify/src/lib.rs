#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Activity classification under the three concurrent threshold policies.
//!
//! Each serving context picks its policy explicitly; the thresholds are
//! deliberately kept apart so the dashboard, operational monitoring, and
//! barangay quota views can never bleed into each other.

use bantay_geography::Municipality;
use bantay_patrol_models::{
    ActivityTier, ClassificationResult, DailyPatrolValue, MonthlyDataset, ThresholdPolicy,
    round_percent,
};

/// Patrol count at or above which a reference-day dashboard tile reads
/// active.
pub const DASHBOARD_ACTIVE_THRESHOLD: u32 = 14;

/// The one patrol count that reads as a warning on reference-day dashboard
/// tiles.
pub const DASHBOARD_WARNING_COUNT: u32 = 13;

/// Patrol count at or above which operational daily monitoring reads
/// active.
pub const OPERATIONAL_ACTIVE_THRESHOLD: u32 = 5;

/// Classifies a single day's value under the selected policy.
///
/// The municipality matters only to [`ThresholdPolicy::BarangayQuota`],
/// which compares the count against that municipality's required barangays.
#[must_use]
pub fn classify_day(
    value: DailyPatrolValue,
    policy: ThresholdPolicy,
    municipality: Municipality,
) -> ActivityTier {
    match policy {
        ThresholdPolicy::DashboardReferenceDay => {
            // No-entry days read as zero patrols under this policy.
            let count = value.count_or_zero();
            if count >= DASHBOARD_ACTIVE_THRESHOLD {
                ActivityTier::Active
            } else if count == DASHBOARD_WARNING_COUNT {
                ActivityTier::Warning
            } else {
                ActivityTier::Inactive
            }
        }
        ThresholdPolicy::OperationalDaily => {
            if value.count_or_zero() >= OPERATIONAL_ACTIVE_THRESHOLD {
                ActivityTier::Active
            } else {
                ActivityTier::Inactive
            }
        }
        ThresholdPolicy::BarangayQuota => match value {
            // A day with no entry, or a recorded zero, measures nothing
            // against the quota and stays out of both tallies.
            DailyPatrolValue::NoEntry | DailyPatrolValue::Count(0) => ActivityTier::NoEntry,
            DailyPatrolValue::Count(count) => {
                if count >= municipality.required_barangays() {
                    ActivityTier::Active
                } else {
                    ActivityTier::Inactive
                }
            }
        },
    }
}

/// Classifies every day of one municipality's row and sums the tallies.
///
/// `active_percentage` divides active days by the classifiable days: every
/// day under the policies that file no-entry as inactive, only countable
/// days under the barangay quota. No classifiable days yields 0%, never an
/// error.
///
/// Returns `None` when the dataset has no row for the municipality, which
/// normalizer output never produces.
#[must_use]
pub fn classify_month(
    dataset: &MonthlyDataset,
    municipality: Municipality,
    policy: ThresholdPolicy,
) -> Option<ClassificationResult> {
    let days = dataset.days_for(municipality)?;

    let mut result = ClassificationResult::default();
    let mut classifiable: u32 = 0;
    for value in days.iter().copied() {
        result.total_patrols = result.total_patrols.saturating_add(value.count_or_zero());
        match classify_day(value, policy, municipality) {
            ActivityTier::Active => {
                result.active_days += 1;
                classifiable += 1;
            }
            ActivityTier::Warning => {
                result.warning_days += 1;
                classifiable += 1;
            }
            ActivityTier::Inactive => {
                result.inactive_days += 1;
                classifiable += 1;
            }
            ActivityTier::NoEntry => {}
        }
    }
    result.active_percentage = round_percent(result.active_days, classifiable);
    Some(result)
}

/// Classifies a single day for one municipality, the way dashboards handle
/// the reference day. Returns the tier together with the underlying value
/// so single-day tallies can be built without a second lookup.
///
/// Returns `None` when the dataset has no row for the municipality or the
/// day index is out of range.
#[must_use]
pub fn classify_reference_day(
    dataset: &MonthlyDataset,
    municipality: Municipality,
    day_index: usize,
    policy: ThresholdPolicy,
) -> Option<(ActivityTier, DailyPatrolValue)> {
    let value = dataset.get_day(municipality, day_index)?;
    Some((classify_day(value, policy, municipality), value))
}
