#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Seam over the remote document store.
//!
//! The engine itself never does I/O; it consumes already-fetched documents
//! and hands writes back through this trait. [`InMemoryStore`] backs tests
//! and previews with the same contract.

use std::collections::BTreeMap;

use bantay_geography::Municipality;
use bantay_patrol_models::{DailyPatrolValue, LockedMonths, MonthKey};
use thiserror::Error;

/// Errors raised by store writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The month key does not name a valid Gregorian month.
    #[error("{month} is not a valid month")]
    InvalidMonth {
        /// The rejected month key.
        month: MonthKey,
    },

    /// The day index does not fall inside the month.
    #[error("day index {day_index} is out of range for a {day_count}-day month")]
    DayOutOfRange {
        /// The rejected zero-based day index.
        day_index: usize,
        /// Days in the month.
        day_count: usize,
    },
}

/// Outcome of a patrol count submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was persisted.
    Written,
    /// The month is locked and nothing was written.
    RejectedLocked,
}

/// Read and write operations the engine needs from storage.
///
/// Reads return the store's documents as-is; malformed documents are the
/// normalizer's problem, not the store's.
pub trait PatrolStore {
    /// Raw per-municipality monthly documents, at most one per municipality.
    fn monthly_documents(&self, month: MonthKey) -> Vec<serde_json::Value>;

    /// Raw action entries recorded during the month.
    fn action_documents(&self, month: MonthKey) -> Vec<serde_json::Value>;

    /// Persists a single daily value.
    ///
    /// # Errors
    ///
    /// * [`StoreError::InvalidMonth`] when the month key is not a real month.
    /// * [`StoreError::DayOutOfRange`] when the day index falls outside it.
    fn write_day(
        &mut self,
        municipality: Municipality,
        month: MonthKey,
        day_index: usize,
        value: DailyPatrolValue,
    ) -> Result<(), StoreError>;
}

/// Persists one daily patrol count unless the month is locked.
///
/// A locked month rejects the write as a quiet no-op rather than an error, so
/// callers can tell the operator the period is closed without walking an
/// error path.
///
/// # Errors
///
/// Returns [`StoreError`] from the underlying write for invalid months or
/// out-of-range days.
pub fn submit_patrol_count(
    store: &mut dyn PatrolStore,
    locked: &LockedMonths,
    municipality: Municipality,
    month: MonthKey,
    day_index: usize,
    value: DailyPatrolValue,
) -> Result<WriteOutcome, StoreError> {
    if locked.contains(month) {
        log::warn!("Rejecting write to locked month {month} for {municipality}");
        return Ok(WriteOutcome::RejectedLocked);
    }
    store.write_day(municipality, month, day_index, value)?;
    Ok(WriteOutcome::Written)
}

/// Document store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    monthly: BTreeMap<MonthKey, Vec<serde_json::Value>>,
    actions: BTreeMap<MonthKey, Vec<serde_json::Value>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            monthly: BTreeMap::new(),
            actions: BTreeMap::new(),
        }
    }

    /// Adds a raw monthly document exactly as the remote store would hold it.
    pub fn push_monthly_document(&mut self, month: MonthKey, document: serde_json::Value) {
        self.monthly.entry(month).or_default().push(document);
    }

    /// Adds a raw action entry document.
    pub fn push_action_document(&mut self, month: MonthKey, document: serde_json::Value) {
        self.actions.entry(month).or_default().push(document);
    }
}

impl PatrolStore for InMemoryStore {
    fn monthly_documents(&self, month: MonthKey) -> Vec<serde_json::Value> {
        self.monthly.get(&month).cloned().unwrap_or_default()
    }

    fn action_documents(&self, month: MonthKey) -> Vec<serde_json::Value> {
        self.actions.get(&month).cloned().unwrap_or_default()
    }

    fn write_day(
        &mut self,
        municipality: Municipality,
        month: MonthKey,
        day_index: usize,
        value: DailyPatrolValue,
    ) -> Result<(), StoreError> {
        let Some(day_count) = month.day_count() else {
            return Err(StoreError::InvalidMonth { month });
        };
        let day_count = day_count as usize;
        if day_index >= day_count {
            return Err(StoreError::DayOutOfRange {
                day_index,
                day_count,
            });
        }

        let documents = self.monthly.entry(month).or_default();
        let slot = serde_json::Value::from(Option::<u32>::from(value));

        if let Some(document) = documents.iter_mut().find(|document| {
            document
                .get("municipalityName")
                .and_then(serde_json::Value::as_str)
                == Some(municipality.label())
        }) {
            if let Some(days) = document
                .get_mut("dailyValues")
                .and_then(serde_json::Value::as_array_mut)
            {
                // Arrays shorter than the month come from partial imports.
                if days.len() < day_count {
                    days.resize(day_count, serde_json::Value::Null);
                }
                days[day_index] = slot;
            } else {
                // A document without a usable daily array is rebuilt around
                // this write.
                *document = fresh_document(municipality, day_count, day_index, &slot);
            }
            return Ok(());
        }

        documents.push(fresh_document(municipality, day_count, day_index, &slot));
        Ok(())
    }
}

fn fresh_document(
    municipality: Municipality,
    day_count: usize,
    day_index: usize,
    slot: &serde_json::Value,
) -> serde_json::Value {
    let mut days = vec![serde_json::Value::Null; day_count];
    days[day_index] = slot.clone();
    serde_json::json!({
        "municipalityName": municipality.label(),
        "districtName": municipality.district().label(),
        "dailyValues": days,
    })
}
