//! Weekly reconciliation of patrol counts against attended actions.

use bantay_analytics_models::ReconciliationResult;
use bantay_calendar::{WEEK_BUCKET_COUNT, week_bucket};
use bantay_geography::Municipality;
use bantay_patrol_models::{MonthlyDataset, WeeklyCounts, round_percent};

/// Cross-references one municipality's recorded patrols with its attended
/// action entries, week bucket by week bucket.
///
/// Efficiency measures attended actions against the weekly quota of
/// `daily_minimum` patrols per day over seven days. The summed patrol counts
/// are reported alongside for display but do not enter the quota. The overall
/// percentage is the sum of the four weekly percentages and is preserved even
/// past 100. A zero quota yields zero efficiency across the board.
///
/// Returns `None` when the dataset carries no row for the municipality.
#[must_use]
pub fn reconcile(
    dataset: &MonthlyDataset,
    municipality: Municipality,
    attended: WeeklyCounts,
    daily_minimum: u32,
) -> Option<ReconciliationResult> {
    let days = dataset.days_for(municipality)?;

    let mut actual = WeeklyCounts::default();
    for (day_of_month, value) in (1_u32..).zip(days.iter().copied()) {
        actual.add(week_bucket(day_of_month), value.count_or_zero());
    }

    let weekly_quota = daily_minimum.saturating_mul(7);
    let mut weekly_efficiency = [0_u32; WEEK_BUCKET_COUNT];
    for (slot, attended_count) in weekly_efficiency.iter_mut().zip(attended.0) {
        *slot = round_percent(attended_count, weekly_quota);
    }
    let overall_percentage = weekly_efficiency
        .iter()
        .fold(0_u32, |sum, efficiency| sum.saturating_add(*efficiency));

    Some(ReconciliationResult {
        weekly_actual: actual.0,
        weekly_attended: attended.0,
        weekly_efficiency,
        overall_percentage,
    })
}
