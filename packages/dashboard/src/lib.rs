#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! One-call snapshot composition: fetch, normalize, classify, aggregate.
//!
//! Every snapshot is recomputed from scratch over the store's current
//! documents. Nothing here caches or polls; callers refresh by calling
//! again, and repeated calls over the same documents return identical
//! snapshots.

use bantay_analytics::aggregate::{district_summaries, province_summary};
use bantay_analytics::rank::{DEFAULT_TOP_N, top_performers};
use bantay_analytics::reconcile::reconcile;
use bantay_analytics_models::{
    DistrictSummary, ProvinceSummary, RankedMunicipality, ReconciliationResult,
};
use bantay_classify::{classify_day, classify_month, classify_reference_day};
use bantay_geography::Municipality;
use bantay_ingest::{
    NormalizeError, normalize, parse_action_records, parse_monthly_records, weekly_action_counts,
};
use bantay_patrol_models::{
    ActivityTier, ClassificationResult, DailyPatrolValue, LockedMonths, MonthKey, MonthlyDataset,
    ThresholdPolicy,
};
use bantay_store::PatrolStore;
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Patrols per municipality per day expected by the province dashboard.
///
/// Doubles as the reconciliation quota base: a full week expects seven times
/// this many patrols.
pub const DAILY_PATROL_MINIMUM: u32 = bantay_classify::DASHBOARD_ACTIVE_THRESHOLD;

/// Errors raised while composing a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The month could not be normalized.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Knobs for one snapshot computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotConfig {
    /// Threshold policy applied to both month and reference-day
    /// classification.
    pub policy: ThresholdPolicy,
    /// Required patrols per day, feeding the weekly reconciliation quota.
    pub daily_minimum: u32,
    /// Rows kept on the top-performers board.
    pub top_n: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            policy: ThresholdPolicy::DashboardReferenceDay,
            daily_minimum: DAILY_PATROL_MINIMUM,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Reference-day standing for one municipality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDayStatus {
    /// Municipality the standing belongs to.
    pub municipality: Municipality,
    /// Tier of the reference day under the snapshot's policy.
    pub tier: ActivityTier,
    /// The raw daily value behind the tier.
    pub value: DailyPatrolValue,
}

/// Everything the presentation layer needs for one month, in one structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    /// Month the snapshot covers.
    pub month: MonthKey,
    /// The day the summary cards describe, when it falls inside the month.
    pub reference_day: Option<NaiveDate>,
    /// Normalized daily dataset, one full row per municipality.
    pub dataset: MonthlyDataset,
    /// Reference-day standing per municipality, registry order.
    pub reference_statuses: Vec<ReferenceDayStatus>,
    /// Whole-month tallies per municipality, registry order.
    pub month_results: Vec<(Municipality, ClassificationResult)>,
    /// Reference-day rollup per district, district order.
    pub district_summaries: Vec<DistrictSummary>,
    /// Province-wide distribution of the active municipalities.
    pub province: ProvinceSummary,
    /// Weekly patrol-versus-action reconciliation per municipality.
    pub reconciliations: Vec<(Municipality, ReconciliationResult)>,
    /// Ranked board, truncated to the configured row count.
    pub top_performers: Vec<RankedMunicipality>,
}

/// Computes the full snapshot for one month.
///
/// The reference day is the day before `today`, and it only informs the
/// summary cards when it falls inside the viewed month. Otherwise
/// `reference_day` is `None` and every municipality's standing degrades to a
/// no-entry day, which in turn drives the district summaries into the
/// province fallback distribution.
///
/// # Errors
///
/// Returns [`SnapshotError::Normalize`] when `month` is not a real calendar
/// month.
pub fn month_snapshot(
    store: &dyn PatrolStore,
    month: MonthKey,
    locked: &LockedMonths,
    today: NaiveDate,
    config: &SnapshotConfig,
) -> Result<MonthlySnapshot, SnapshotError> {
    let records = parse_monthly_records(&store.monthly_documents(month));
    let dataset = normalize(&records, month, locked)?;

    let month_results: Vec<(Municipality, ClassificationResult)> = Municipality::all()
        .iter()
        .filter_map(|&municipality| {
            classify_month(&dataset, municipality, config.policy)
                .map(|result| (municipality, result))
        })
        .collect();

    let reference = bantay_calendar::reference_day(today)
        .filter(|(date, _)| date.year() == month.year && date.month() == month.month);
    let day_index = reference.map(|(_, day_index)| day_index);
    let reference_statuses: Vec<ReferenceDayStatus> = Municipality::all()
        .iter()
        .map(|&municipality| reference_status(&dataset, municipality, day_index, config.policy))
        .collect();

    let day_results: Vec<(Municipality, ClassificationResult)> = reference_statuses
        .iter()
        .map(|status| {
            (
                status.municipality,
                ClassificationResult::from_single_day(status.tier, status.value),
            )
        })
        .collect();
    let districts = district_summaries(&day_results);
    let province = province_summary(&districts);

    let actions = parse_action_records(&store.action_documents(month));
    let attended = weekly_action_counts(&actions);
    let reconciliations: Vec<(Municipality, ReconciliationResult)> = Municipality::all()
        .iter()
        .filter_map(|&municipality| {
            let counts = attended.get(&municipality).copied().unwrap_or_default();
            reconcile(&dataset, municipality, counts, config.daily_minimum)
                .map(|result| (municipality, result))
        })
        .collect();

    let top_performers = top_performers(&month_results, config.top_n);

    log::debug!(
        "Computed {month} snapshot covering {} municipalities",
        month_results.len()
    );

    Ok(MonthlySnapshot {
        month,
        reference_day: reference.map(|(date, _)| date),
        dataset,
        reference_statuses,
        month_results,
        district_summaries: districts,
        province,
        reconciliations,
        top_performers,
    })
}

/// Standing of one municipality on the reference day.
///
/// A missing day (outside the viewed month, or past the end of the dataset)
/// classifies as a no-entry value under the snapshot's policy, so the cards
/// degrade the same way an unrecorded day does.
fn reference_status(
    dataset: &MonthlyDataset,
    municipality: Municipality,
    day_index: Option<usize>,
    policy: ThresholdPolicy,
) -> ReferenceDayStatus {
    let classified = day_index
        .and_then(|index| classify_reference_day(dataset, municipality, index, policy));
    let (tier, value) = classified.unwrap_or_else(|| {
        (
            classify_day(DailyPatrolValue::NoEntry, policy, municipality),
            DailyPatrolValue::NoEntry,
        )
    });
    ReferenceDayStatus {
        municipality,
        tier,
        value,
    }
}

/// Computes the snapshot for the month containing the current UTC date.
///
/// # Errors
///
/// Returns [`SnapshotError`] as [`month_snapshot`] does.
pub fn latest_snapshot(
    store: &dyn PatrolStore,
    locked: &LockedMonths,
    config: &SnapshotConfig,
) -> Result<MonthlySnapshot, SnapshotError> {
    let today = Utc::now().date_naive();
    let month = MonthKey::new(today.year(), today.month());
    month_snapshot(store, month, locked, today, config)
}
