//! District and province rollups of per-municipality classification results.

use bantay_analytics_models::{DistrictShare, DistrictSummary, ProvinceSummary};
use bantay_geography::{District, Municipality};
use bantay_patrol_models::{ClassificationResult, round_percent};

/// Sums tier counts for one district across the given results.
///
/// Results belonging to other districts are skipped, so callers can pass the
/// full province-wide list. `total` counts the municipalities that actually
/// contributed, and `percentage` is the active share of that total (zero when
/// nothing contributed).
#[must_use]
pub fn district_summary(
    district: District,
    results: &[(Municipality, ClassificationResult)],
) -> DistrictSummary {
    let mut summary = DistrictSummary {
        district,
        active: 0,
        warning: 0,
        inactive: 0,
        total: 0,
        percentage: 0,
    };

    for (municipality, result) in results {
        if municipality.district() != district {
            continue;
        }
        summary.active = summary.active.saturating_add(result.active_days);
        summary.warning = summary.warning.saturating_add(result.warning_days);
        summary.inactive = summary.inactive.saturating_add(result.inactive_days);
        summary.total = summary.total.saturating_add(1);
    }

    summary.percentage = round_percent(summary.active, summary.total);
    summary
}

/// Summarizes every district, in district order.
#[must_use]
pub fn district_summaries(
    results: &[(Municipality, ClassificationResult)],
) -> Vec<DistrictSummary> {
    District::all()
        .iter()
        .map(|&district| district_summary(district, results))
        .collect()
}

/// Distributes the province-wide active total across districts.
///
/// When not a single municipality is active anywhere, every share would be
/// zero and the distribution chart would render empty. In that case the
/// shares fall back to district size (municipalities per district over the
/// province total) and the result is flagged as a fallback.
#[must_use]
pub fn province_summary(summaries: &[DistrictSummary]) -> ProvinceSummary {
    let active_total = summaries
        .iter()
        .fold(0_u32, |sum, summary| sum.saturating_add(summary.active));

    if active_total == 0 {
        let municipality_total = summaries
            .iter()
            .fold(0_u32, |sum, summary| sum.saturating_add(summary.total));
        let shares = summaries
            .iter()
            .map(|summary| DistrictShare {
                district: summary.district,
                percentage: round_percent(summary.total, municipality_total),
            })
            .collect();
        return ProvinceSummary {
            shares,
            fallback: true,
        };
    }

    let shares = summaries
        .iter()
        .map(|summary| DistrictShare {
            district: summary.district,
            percentage: round_percent(summary.active, active_total),
        })
        .collect();
    ProvinceSummary {
        shares,
        fallback: false,
    }
}
