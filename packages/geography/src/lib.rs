#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! District and municipality registry for the patrol monitoring domain.
//!
//! The registry is closed: exactly three districts and eight municipalities
//! exist, in a fixed display order, and the per-municipality constants
//! (barangay quota, sweep duration, visit frequency) are reference data
//! maintained here rather than derived from patrol submissions.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of municipalities in the registry, across all districts.
pub const MUNICIPALITY_COUNT: usize = 8;

/// One of the three administrative districts, in display order.
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
pub enum District {
    /// District 1 (San Isidro, Santa Cruz, Concepcion)
    First,
    /// District 2 (San Rafael, Del Pilar, Malaya)
    Second,
    /// District 3 (San Mateo, Bagong Silang)
    Third,
}

impl District {
    /// Returns the display name used in raw documents and dashboards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "District 1",
            Self::Second => "District 2",
            Self::Third => "District 3",
        }
    }

    /// Returns this district's municipalities in display order.
    #[must_use]
    pub const fn municipalities(self) -> &'static [Municipality] {
        match self {
            Self::First => &[
                Municipality::SanIsidro,
                Municipality::SantaCruz,
                Municipality::Concepcion,
            ],
            Self::Second => &[
                Municipality::SanRafael,
                Municipality::DelPilar,
                Municipality::Malaya,
            ],
            Self::Third => &[Municipality::SanMateo, Municipality::BagongSilang],
        }
    }

    /// Looks up a district by its display name, ignoring ASCII case and
    /// surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|district| district.label().eq_ignore_ascii_case(trimmed))
    }

    /// Returns all districts in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::First, Self::Second, Self::Third]
    }
}

/// A monitored municipality. Each belongs to exactly one [`District`].
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
pub enum Municipality {
    // ── District 1 ──────────────────────────────────────
    /// San Isidro (12 barangays)
    SanIsidro,
    /// Santa Cruz (15 barangays)
    SantaCruz,
    /// Concepcion (10 barangays)
    Concepcion,

    // ── District 2 ──────────────────────────────────────
    /// San Rafael (9 barangays)
    SanRafael,
    /// Del Pilar (11 barangays)
    DelPilar,
    /// Malaya (8 barangays)
    Malaya,

    // ── District 3 ──────────────────────────────────────
    /// San Mateo (14 barangays)
    SanMateo,
    /// Bagong Silang (7 barangays)
    BagongSilang,
}

impl Municipality {
    /// Returns the display name used in raw documents and dashboards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SanIsidro => "San Isidro",
            Self::SantaCruz => "Santa Cruz",
            Self::Concepcion => "Concepcion",
            Self::SanRafael => "San Rafael",
            Self::DelPilar => "Del Pilar",
            Self::Malaya => "Malaya",
            Self::SanMateo => "San Mateo",
            Self::BagongSilang => "Bagong Silang",
        }
    }

    /// Returns the [`District`] this municipality belongs to.
    #[must_use]
    pub const fn district(self) -> District {
        match self {
            Self::SanIsidro | Self::SantaCruz | Self::Concepcion => District::First,
            Self::SanRafael | Self::DelPilar | Self::Malaya => District::Second,
            Self::SanMateo | Self::BagongSilang => District::Third,
        }
    }

    /// Returns the number of barangays a daily patrol must cover for the
    /// barangay-quota classification to count the day as active.
    #[must_use]
    pub const fn required_barangays(self) -> u32 {
        match self {
            Self::SanIsidro => 12,
            Self::SantaCruz => 15,
            Self::Concepcion => 10,
            Self::SanRafael => 9,
            Self::DelPilar => 11,
            Self::Malaya => 8,
            Self::SanMateo => 14,
            Self::BagongSilang => 7,
        }
    }

    /// Returns the number of days a full patrol sweep of the municipality
    /// takes.
    #[must_use]
    pub const fn days_to_complete_sweep(self) -> u32 {
        match self {
            Self::SanIsidro => 6,
            Self::SantaCruz => 8,
            Self::Concepcion => 5,
            Self::SanRafael => 5,
            Self::DelPilar => 6,
            Self::Malaya => 4,
            Self::SanMateo => 7,
            Self::BagongSilang => 4,
        }
    }

    /// Returns how many times per week each barangay is expected to be
    /// visited.
    #[must_use]
    pub const fn weekly_visit_frequency(self) -> u32 {
        match self {
            Self::SanIsidro => 2,
            Self::SantaCruz => 2,
            Self::Concepcion => 3,
            Self::SanRafael => 3,
            Self::DelPilar => 2,
            Self::Malaya => 3,
            Self::SanMateo => 2,
            Self::BagongSilang => 4,
        }
    }

    /// Looks up a municipality by its display name, ignoring ASCII case and
    /// surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the name does not match any registered
    /// municipality. The registry is closed; unknown names are never added
    /// at runtime.
    pub fn from_name(name: &str) -> Result<Self, UnknownMunicipalityError> {
        let trimmed = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|municipality| municipality.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownMunicipalityError {
                name: name.to_string(),
            })
    }

    /// Returns all municipalities in registry order: district order first,
    /// then display order within each district.
    ///
    /// Every derived output (datasets, summaries, rankings before sorting)
    /// preserves this order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::SanIsidro,
            Self::SantaCruz,
            Self::Concepcion,
            Self::SanRafael,
            Self::DelPilar,
            Self::Malaya,
            Self::SanMateo,
            Self::BagongSilang,
        ]
    }
}

/// Error returned when looking up a name outside the fixed registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMunicipalityError {
    /// The name that failed to resolve.
    pub name: String,
}

impl std::fmt::Display for UnknownMunicipalityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown municipality: {}", self.name)
    }
}

impl std::error::Error for UnknownMunicipalityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_size() {
        assert_eq!(Municipality::all().len(), MUNICIPALITY_COUNT);
        assert_eq!(District::First.municipalities().len(), 3);
        assert_eq!(District::Second.municipalities().len(), 3);
        assert_eq!(District::Third.municipalities().len(), 2);
    }

    #[test]
    fn registry_order_follows_districts() {
        let by_district: Vec<Municipality> = District::all()
            .iter()
            .flat_map(|district| district.municipalities().iter().copied())
            .collect();
        assert_eq!(by_district, Municipality::all());
    }

    #[test]
    fn district_membership_consistency() {
        for municipality in Municipality::all() {
            let district = municipality.district();
            assert!(
                district.municipalities().contains(municipality),
                "{municipality:?} claims {district:?} but isn't in its member list"
            );
        }
    }

    #[test]
    fn constants_are_positive() {
        for municipality in Municipality::all() {
            assert!(municipality.required_barangays() > 0);
            assert!(municipality.days_to_complete_sweep() > 0);
            assert!(municipality.weekly_visit_frequency() > 0);
        }
    }

    #[test]
    fn from_name_roundtrip() {
        for municipality in Municipality::all() {
            assert_eq!(
                Municipality::from_name(municipality.label()),
                Ok(*municipality)
            );
        }
        for district in District::all() {
            assert_eq!(District::from_name(district.label()), Some(*district));
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(
            Municipality::from_name("SAN ISIDRO"),
            Ok(Municipality::SanIsidro)
        );
        assert_eq!(
            Municipality::from_name(" san isidro "),
            Ok(Municipality::SanIsidro)
        );
        assert_eq!(District::from_name("district 2"), Some(District::Second));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = Municipality::from_name("Pelican Bay").unwrap_err();
        assert_eq!(err.name, "Pelican Bay");
        assert_eq!(District::from_name("District 4"), None);
    }
}
