#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Result types produced by the aggregation, reconciliation, and ranking
//! passes, shaped for direct serialization into dashboard payloads.

use bantay_calendar::WEEK_BUCKET_COUNT;
use bantay_geography::{District, Municipality};
use serde::{Deserialize, Serialize};

/// Tier totals for one district, summed over its municipalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictSummary {
    /// District the totals belong to.
    pub district: District,
    /// Municipalities whose summarized day came out active.
    pub active: u32,
    /// Municipalities in the warning band.
    pub warning: u32,
    /// Municipalities counted inactive, no-entry days included.
    pub inactive: u32,
    /// Municipalities contributing to this summary.
    pub total: u32,
    /// Active municipalities as a rounded percentage of `total`.
    pub percentage: u32,
}

/// One district's slice of the province-wide active distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictShare {
    /// District the share belongs to.
    pub district: District,
    /// Rounded percentage of the province-wide active total.
    pub percentage: u32,
}

/// Province-wide distribution of active municipalities across districts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceSummary {
    /// Shares in district order.
    pub shares: Vec<DistrictShare>,
    /// `true` when no municipality was active anywhere and the shares fell
    /// back to district size instead of an all-zero chart.
    pub fallback: bool,
}

/// Weekly cross-reference of patrol counts against attended actions for one
/// municipality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    /// Patrol counts summed per week bucket, no-entry days counting zero.
    pub weekly_actual: [u32; WEEK_BUCKET_COUNT],
    /// Attended actions per week bucket, from the action dataset.
    pub weekly_attended: [u32; WEEK_BUCKET_COUNT],
    /// Attended actions as a rounded percentage of the weekly quota.
    pub weekly_efficiency: [u32; WEEK_BUCKET_COUNT],
    /// Sum of the four weekly efficiencies. The scoring convention adds the
    /// percentages rather than averaging them, so values over 100 are
    /// legitimate and reported unchanged.
    pub overall_percentage: u32,
}

/// One row of the top-performers board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMunicipality {
    /// Municipality being ranked.
    pub municipality: Municipality,
    /// Percentage of classifiable days that came out active.
    pub active_percentage: u32,
    /// Total patrols recorded for the month.
    pub total_patrols: u32,
}
