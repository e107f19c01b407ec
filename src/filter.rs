//! Filter model: the optional facets a caller narrows events by.
//!
//! Every facet is independently optional. Absent means "no constraint",
//! and so does an empty id set. Year bounds fall back to the configured
//! [`YearBounds`] when the filter leaves them out.
//!
//! The JSON form uses the camelCase names of the public API:
//!
//! ```json
//! { "minYear": 2001, "maxYear": 2001, "countries": [4], "isSuccess": true }
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::schema::Dimension;

/// Dataset-wide year bounds used when a filter omits a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearBounds {
    pub min: i64,
    pub max: i64,
}

impl YearBounds {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl Default for YearBounds {
    /// First and last year covered by the Global Terrorism Database.
    fn default() -> Self {
        Self::new(1970, 2017)
    }
}

/// One filter facet. Declaration order is the order predicates (and
/// their bound parameters) appear in the compiled query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facet {
    YearRange,
    Extended,
    Countries,
    Regions,
    Success,
    Suicide,
    AttackTypes,
    TargetTypes,
    Groups,
}

impl Facet {
    pub const ORDER: [Facet; 9] = [
        Facet::YearRange,
        Facet::Extended,
        Facet::Countries,
        Facet::Regions,
        Facet::Success,
        Facet::Suicide,
        Facet::AttackTypes,
        Facet::TargetTypes,
        Facet::Groups,
    ];

    /// Dimension an id-set facet constrains.
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Facet::Countries => Some(Dimension::Country),
            Facet::Regions => Some(Dimension::Region),
            Facet::AttackTypes => Some(Dimension::AttackType),
            Facet::TargetTypes => Some(Dimension::TargetType),
            Facet::Groups => Some(Dimension::Group),
            Facet::YearRange | Facet::Extended | Facet::Success | Facet::Suicide => None,
        }
    }
}

/// Caller-supplied filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
#[must_use = "builders have no effect until used"]
pub struct Filter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_extended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_suicide: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<BTreeSet<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<BTreeSet<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_types: Option<BTreeSet<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_types: Option<BTreeSet<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_id: Option<BTreeSet<i64>>,
}

impl Filter {
    /// A filter with no facets set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_year(mut self, year: i64) -> Self {
        self.min_year = Some(year);
        self
    }

    pub fn with_max_year(mut self, year: i64) -> Self {
        self.max_year = Some(year);
        self
    }

    /// Set both year bounds (inclusive).
    pub fn with_years(self, min: i64, max: i64) -> Self {
        self.with_min_year(min).with_max_year(max)
    }

    pub fn extended(mut self, value: bool) -> Self {
        self.is_extended = Some(value);
        self
    }

    pub fn success(mut self, value: bool) -> Self {
        self.is_success = Some(value);
        self
    }

    pub fn suicide(mut self, value: bool) -> Self {
        self.is_suicide = Some(value);
        self
    }

    pub fn with_countries(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.countries = Some(ids.into_iter().collect());
        self
    }

    pub fn with_regions(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.regions = Some(ids.into_iter().collect());
        self
    }

    pub fn with_attack_types(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.attack_types = Some(ids.into_iter().collect());
        self
    }

    pub fn with_target_types(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.target_types = Some(ids.into_iter().collect());
        self
    }

    pub fn with_groups(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.groups_id = Some(ids.into_iter().collect());
        self
    }

    /// Effective inclusive year range, falling back to `bounds`.
    ///
    /// An inverted range is returned as is; it simply matches nothing.
    pub fn year_range(&self, bounds: YearBounds) -> (i64, i64) {
        (
            self.min_year.unwrap_or(bounds.min),
            self.max_year.unwrap_or(bounds.max),
        )
    }

    /// The id set constraining `dimension`, if it constrains anything.
    ///
    /// Empty sets are treated as absent.
    pub fn ids(&self, dimension: Dimension) -> Option<&BTreeSet<i64>> {
        let set = match dimension {
            Dimension::Country => &self.countries,
            Dimension::Region => &self.regions,
            Dimension::AttackType => &self.attack_types,
            Dimension::TargetType => &self.target_types,
            Dimension::Group => &self.groups_id,
        };
        set.as_ref().filter(|ids| !ids.is_empty())
    }

    /// Facets that contribute a predicate, in compile order.
    ///
    /// The year range is always active.
    pub fn active_facets(&self) -> Vec<Facet> {
        Facet::ORDER
            .into_iter()
            .filter(|facet| match facet {
                Facet::YearRange => true,
                Facet::Extended => self.is_extended.is_some(),
                Facet::Success => self.is_success.is_some(),
                Facet::Suicide => self.is_suicide.is_some(),
                other => other
                    .dimension()
                    .is_some_and(|dimension| self.ids(dimension).is_some()),
            })
            .collect()
    }
}
