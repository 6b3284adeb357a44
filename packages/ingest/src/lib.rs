#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Normalizes raw patrol documents into complete monthly datasets.
//!
//! The store is sparse: municipalities may be absent, duplicated, misnamed,
//! or submitted as nothing but zeros. Normalization guarantees one row per
//! registry municipality with exactly one slot per calendar day, with
//! "no entry" standing in wherever nothing meaningful was recorded, and
//! applies the locked-month rule before any raw content is considered.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use bantay_calendar::week_bucket;
use bantay_geography::{District, Municipality};
use bantay_ingest_models::{RawActionRecord, RawMonthlyRecord};
use bantay_patrol_models::{
    DailyPatrolValue, LockedMonths, MonthKey, MonthlyDataset, WeeklyCounts,
};
use thiserror::Error;

/// Errors raised while normalizing a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The month key does not name a valid Gregorian month.
    #[error("{month} is not a valid month")]
    InvalidMonth {
        /// The rejected key.
        month: MonthKey,
    },
}

/// Builds the complete [`MonthlyDataset`] for a month from whatever raw
/// records the store returned.
///
/// Every registry municipality gets a row in registry order. A municipality
/// with no usable record, or whose record holds nothing but zeros and
/// blanks, comes out all-no-entry; both states mean "nothing meaningful was
/// ever entered". Locked months come out all-no-entry and non-writable no
/// matter what the store holds.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidMonth`] when `month` does not name a
/// valid Gregorian month.
pub fn normalize(
    records: &[RawMonthlyRecord],
    month: MonthKey,
    locked: &LockedMonths,
) -> Result<MonthlyDataset, NormalizeError> {
    let day_count = month
        .day_count()
        .ok_or(NormalizeError::InvalidMonth { month })?;

    // Locked months read as all-no-entry regardless of stored content.
    if locked.contains(month) {
        log::debug!("Month {month} is locked; serving all-no-entry");
        return Ok(MonthlyDataset::all_no_entry(month, day_count, true));
    }

    let matched = match_records(records);

    let mut dataset = MonthlyDataset::all_no_entry(month, day_count, false);
    for (municipality, record) in matched {
        // An all-zero record is treated the same as a record that was
        // never created.
        if record.is_effectively_empty() {
            continue;
        }
        let days = fit_to_month(&record.daily_values, day_count);
        if let Err(err) = dataset.replace_days(municipality, days) {
            log::warn!("Could not apply raw record for {municipality}: {err}");
        }
    }
    Ok(dataset)
}

/// Pairs raw records with registry municipalities.
///
/// A record matches only when its municipality name resolves and its
/// district name agrees with the registry. Unknown names, mismatched
/// districts, and duplicates are dropped with a warning, never merged.
fn match_records(records: &[RawMonthlyRecord]) -> BTreeMap<Municipality, &RawMonthlyRecord> {
    let mut matched: BTreeMap<Municipality, &RawMonthlyRecord> = BTreeMap::new();

    for record in records {
        let municipality = match Municipality::from_name(&record.municipality_name) {
            Ok(municipality) => municipality,
            Err(err) => {
                log::warn!("Dropping raw record: {err}");
                continue;
            }
        };
        if District::from_name(&record.district_name) != Some(municipality.district()) {
            log::warn!(
                "Dropping raw record for {municipality}: district {:?} does not match the registry",
                record.district_name
            );
            continue;
        }
        match matched.entry(municipality) {
            Entry::Vacant(entry) => {
                entry.insert(record);
            }
            Entry::Occupied(_) => {
                log::warn!("Dropping duplicate raw record for {municipality}");
            }
        }
    }

    matched
}

/// Fits a raw daily array to the month: missing and `null` slots become
/// no-entry, surplus slots beyond the month length are dropped.
fn fit_to_month(raw: &[Option<u32>], day_count: u32) -> Vec<DailyPatrolValue> {
    (0..day_count as usize)
        .map(|index| DailyPatrolValue::from(raw.get(index).copied().flatten()))
        .collect()
}

/// Parses raw monthly documents out of store payloads.
///
/// Malformed documents are skipped with a warning; missing or broken data
/// is a normal state for this store, not a failure.
#[must_use]
pub fn parse_monthly_records(documents: &[serde_json::Value]) -> Vec<RawMonthlyRecord> {
    documents
        .iter()
        .filter_map(|document| match serde_json::from_value(document.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("Skipping malformed monthly record: {err}");
                None
            }
        })
        .collect()
}

/// Parses raw action entries out of store payloads.
///
/// Malformed documents are skipped with a warning.
#[must_use]
pub fn parse_action_records(documents: &[serde_json::Value]) -> Vec<RawActionRecord> {
    documents
        .iter()
        .filter_map(|document| match serde_json::from_value(document.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("Skipping malformed action record: {err}");
                None
            }
        })
        .collect()
}

/// Tallies attended actions per municipality and week bucket.
///
/// An entry counts only when its action text is non-blank. Unknown
/// municipality names are dropped with a warning. Municipalities without a
/// single attended entry are absent from the result; callers treat absence
/// as four zero weeks.
#[must_use]
pub fn weekly_action_counts(
    entries: &[RawActionRecord],
) -> BTreeMap<Municipality, WeeklyCounts> {
    let mut counts: BTreeMap<Municipality, WeeklyCounts> = BTreeMap::new();

    for entry in entries {
        let municipality = match Municipality::from_name(&entry.municipality_name) {
            Ok(municipality) => municipality,
            Err(err) => {
                log::warn!("Dropping action entry: {err}");
                continue;
            }
        };
        if !entry.is_attended() {
            continue;
        }
        counts
            .entry(municipality)
            .or_default()
            .add(week_bucket(entry.day), 1);
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june() -> MonthKey {
        MonthKey::new(2025, 6)
    }

    fn no_locks() -> LockedMonths {
        LockedMonths::new()
    }

    fn record(municipality: &str, district: &str, values: &[Option<u32>]) -> RawMonthlyRecord {
        RawMonthlyRecord {
            municipality_name: municipality.to_string(),
            district_name: district.to_string(),
            daily_values: values.to_vec(),
        }
    }

    #[test]
    fn empty_store_synthesizes_full_month() {
        let dataset = normalize(&[], june(), &no_locks()).unwrap();
        assert_eq!(dataset.day_count(), 30);
        assert_eq!(dataset.rows().len(), Municipality::all().len());
        for row in dataset.rows() {
            assert!(row.days.iter().all(|day| *day == DailyPatrolValue::NoEntry));
        }
    }

    #[test]
    fn registry_order_is_preserved() {
        let records = vec![
            record("Bagong Silang", "District 3", &[Some(4)]),
            record("San Isidro", "District 1", &[Some(9)]),
        ];
        let dataset = normalize(&records, june(), &no_locks()).unwrap();
        let order: Vec<_> = dataset.rows().iter().map(|row| row.municipality).collect();
        assert_eq!(order, Municipality::all());
    }

    #[test]
    fn all_zero_record_equals_absent_record() {
        let zeros = record(
            "Santa Cruz",
            "District 1",
            &[Some(0), None, Some(0), Some(0)],
        );
        let with_record = normalize(&[zeros], june(), &no_locks()).unwrap();
        let without_record = normalize(&[], june(), &no_locks()).unwrap();
        assert_eq!(with_record, without_record);
    }

    #[test]
    fn partial_month_keeps_recorded_zeros() {
        let records = vec![record(
            "San Rafael",
            "District 2",
            &[Some(5), None, Some(0), Some(14)],
        )];
        let dataset = normalize(&records, june(), &no_locks()).unwrap();
        let days = dataset.days_for(Municipality::SanRafael).unwrap();
        assert_eq!(days[0], DailyPatrolValue::Count(5));
        assert_eq!(days[1], DailyPatrolValue::NoEntry);
        assert_eq!(days[2], DailyPatrolValue::Count(0));
        assert_eq!(days[3], DailyPatrolValue::Count(14));
        assert!(days[4..].iter().all(|day| *day == DailyPatrolValue::NoEntry));
        assert_eq!(days.len(), 30);
    }

    #[test]
    fn long_raw_array_is_truncated_to_month() {
        let values: Vec<Option<u32>> = (1..=40).map(Some).collect();
        let records = vec![record("Malaya", "District 2", &values)];
        let dataset = normalize(&records, june(), &no_locks()).unwrap();
        let days = dataset.days_for(Municipality::Malaya).unwrap();
        assert_eq!(days.len(), 30);
        assert_eq!(days[29], DailyPatrolValue::Count(30));
    }

    #[test]
    fn locked_month_ignores_raw_content() {
        let locked: LockedMonths = [june()].into_iter().collect();
        let records = vec![record("San Isidro", "District 1", &[Some(20), Some(20)])];
        let mut dataset = normalize(&records, june(), &locked).unwrap();
        assert!(dataset.is_locked());
        for row in dataset.rows() {
            assert!(row.days.iter().all(|day| *day == DailyPatrolValue::NoEntry));
        }
        assert!(
            dataset
                .set_day(Municipality::SanIsidro, 0, DailyPatrolValue::Count(1))
                .is_err()
        );
    }

    #[test]
    fn unknown_municipality_is_dropped() {
        let records = vec![record("Pelican Bay", "District 1", &[Some(10)])];
        let dataset = normalize(&records, june(), &no_locks()).unwrap();
        assert_eq!(dataset, normalize(&[], june(), &no_locks()).unwrap());
    }

    #[test]
    fn district_mismatch_is_dropped() {
        let records = vec![record("San Isidro", "District 3", &[Some(10)])];
        let dataset = normalize(&records, june(), &no_locks()).unwrap();
        let days = dataset.days_for(Municipality::SanIsidro).unwrap();
        assert!(days.iter().all(|day| *day == DailyPatrolValue::NoEntry));
    }

    #[test]
    fn duplicate_records_first_wins() {
        let records = vec![
            record("Concepcion", "District 1", &[Some(7)]),
            record("Concepcion", "District 1", &[Some(99)]),
        ];
        let dataset = normalize(&records, june(), &no_locks()).unwrap();
        assert_eq!(
            dataset.get_day(Municipality::Concepcion, 0),
            Some(DailyPatrolValue::Count(7))
        );
    }

    #[test]
    fn invalid_month_is_rejected() {
        let month = MonthKey::new(2025, 13);
        assert_eq!(
            normalize(&[], month, &no_locks()),
            Err(NormalizeError::InvalidMonth { month })
        );
    }

    #[test]
    fn parse_skips_malformed_documents() {
        let documents = vec![
            serde_json::json!({
                "municipalityName": "San Isidro",
                "districtName": "District 1",
                "dailyValues": [3, null, 0],
            }),
            serde_json::json!({ "municipalityName": "missing the rest" }),
        ];
        let records = parse_monthly_records(&documents);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].municipality_name, "San Isidro");
        assert_eq!(records[0].daily_values, vec![Some(3), None, Some(0)]);
    }

    #[test]
    fn action_counts_bucket_by_week() {
        let entry = |day: u32, action: &str| RawActionRecord {
            municipality_name: "Malaya".to_string(),
            day,
            action_taken: action.to_string(),
        };
        let entries = vec![
            entry(1, "Dispersed loitering group"),
            entry(7, "Escorted complainant"),
            entry(8, "Referred to barangay captain"),
            entry(29, "Issued warning"),
            entry(3, "   "),
            RawActionRecord {
                municipality_name: "Pelican Bay".to_string(),
                day: 2,
                action_taken: "Filed report".to_string(),
            },
        ];
        let counts = weekly_action_counts(&entries);
        assert_eq!(
            counts.get(&Municipality::Malaya),
            Some(&WeeklyCounts([2, 1, 0, 1]))
        );
        assert_eq!(counts.len(), 1);
    }
}
