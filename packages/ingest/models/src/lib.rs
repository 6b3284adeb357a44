#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Raw document types as they come back from the external patrol store.
//!
//! These mirror what operators actually submit: free-text names, daily
//! arrays of the wrong length, and entries that were opened but never
//! filled in. The normalizer turns them into registry-shaped datasets.

use serde::{Deserialize, Serialize};

/// One municipality's raw patrol submissions for a month, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMonthlyRecord {
    /// Municipality display name as entered upstream.
    pub municipality_name: String,
    /// District display name as entered upstream.
    pub district_name: String,
    /// One slot per day where present; `None` marks a day never filled in.
    /// The array may be shorter or longer than the month it describes.
    pub daily_values: Vec<Option<u32>>,
}

impl RawMonthlyRecord {
    /// Returns `true` when every slot is absent or zero.
    ///
    /// Such a record is indistinguishable from one that was never created,
    /// and the normalizer treats both the same way.
    #[must_use]
    pub fn is_effectively_empty(&self) -> bool {
        self.daily_values
            .iter()
            .all(|value| value.is_none_or(|count| count == 0))
    }
}

/// One raw entry from the independent actions dataset.
///
/// Actions are recorded separately from patrol counts and cross-referenced
/// only at the weekly level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActionRecord {
    /// Municipality display name as entered upstream.
    pub municipality_name: String,
    /// Day of the month (1-based) the entry was recorded on.
    pub day: u32,
    /// Free-text description of the action taken.
    pub action_taken: String,
}

impl RawActionRecord {
    /// Returns `true` when the entry counts as attended: its action text is
    /// non-blank.
    #[must_use]
    pub fn is_attended(&self) -> bool {
        !self.action_taken.trim().is_empty()
    }
}
