//! Star-schema descriptors.
//!
//! The dataset is one fact table (`global`, one row per event) joined to
//! a fixed set of dimension tables, each mapping a code to a display name.
//!
//! ```text
//!                    countries(countrycode, countryname)
//!                        │ country
//! regions ── region ── global ── attacktype1 ── attack_types
//!                        │ groupid        │ targtype1
//!                    groups(id, ...)   target_types(id, ...)
//! ```
//!
//! Dimensions are held in an ordered map keyed by [`Dimension`], so the
//! join order is the enum's declaration order and adding a dimension
//! means adding a variant plus its descriptor.

mod ddl;

pub use ddl::create_script;

use std::collections::BTreeMap;

use crate::sql::ColumnType;

/// Column names of the fact table.
pub mod columns {
    pub const EVENT_ID: &str = "eventid";
    pub const YEAR: &str = "iyear";
    pub const MONTH: &str = "imonth";
    pub const DAY: &str = "iday";
    pub const EXTENDED: &str = "extended";
    pub const COUNTRY: &str = "country";
    pub const REGION: &str = "region";
    pub const SUMMARY: &str = "summary";
    pub const SUCCESS: &str = "success";
    pub const SUICIDE: &str = "suicide";
    pub const ATTACK_TYPE: &str = "attacktype1";
    pub const TARGET_TYPE: &str = "targtype1";
    pub const GROUP_ID: &str = "groupid";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const KILLS_COUNT: &str = "nkill";
}

/// A dimension of the star schema.
///
/// Variant order is join order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Country,
    AttackType,
    Group,
    Region,
    TargetType,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Country,
        Dimension::AttackType,
        Dimension::Group,
        Dimension::Region,
        Dimension::TargetType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Country => "country",
            Dimension::AttackType => "attack_type",
            Dimension::Group => "group",
            Dimension::Region => "region",
            Dimension::TargetType => "target_type",
        }
    }

    /// Result-set alias of this dimension's display column.
    ///
    /// Unique per dimension, so lookup tables may share a display column
    /// name with each other or with a fact column.
    pub fn display_alias(&self) -> String {
        format!("{}_name", self.as_str())
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dimension (lookup) table and how it joins to the fact table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionTable {
    /// Table name.
    pub table: String,
    /// Code column, the join key on the dimension side.
    pub key: String,
    /// Human-readable name column.
    pub display: String,
    /// Fact-table column referencing `key`.
    pub foreign_key: String,
}

impl DimensionTable {
    pub fn new(table: &str, key: &str, display: &str, foreign_key: &str) -> Self {
        Self {
            table: table.into(),
            key: key.into(),
            display: display.into(),
            foreign_key: foreign_key.into(),
        }
    }
}

/// A fact-table column and its storage type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactColumn {
    pub name: String,
    pub ty: ColumnType,
    pub nullable: bool,
}

impl FactColumn {
    fn required(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
        }
    }

    fn optional(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: true,
        }
    }
}

/// The fact table: its name, every column, and the subset projected into
/// query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactTable {
    pub table: String,
    pub columns: Vec<FactColumn>,
    pub projection: Vec<String>,
}

/// One fact table plus its ordered dimension descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarSchema {
    fact: FactTable,
    dimensions: BTreeMap<Dimension, DimensionTable>,
}

impl StarSchema {
    /// The Global Terrorism Database layout.
    pub fn global_terrorism() -> Self {
        use columns::*;

        let fact = FactTable {
            table: "global".into(),
            columns: vec![
                FactColumn::required(EVENT_ID, ColumnType::Text),
                FactColumn::required(YEAR, ColumnType::Integer),
                FactColumn::required(MONTH, ColumnType::Integer),
                FactColumn::required(DAY, ColumnType::Integer),
                FactColumn::optional(LATITUDE, ColumnType::Real),
                FactColumn::optional(LONGITUDE, ColumnType::Real),
                FactColumn::optional(SUMMARY, ColumnType::Text),
                FactColumn::required(TARGET_TYPE, ColumnType::Integer),
                FactColumn::optional(KILLS_COUNT, ColumnType::Real),
                FactColumn::required(EXTENDED, ColumnType::Integer),
                FactColumn::required(SUICIDE, ColumnType::Integer),
                FactColumn::required(SUCCESS, ColumnType::Integer),
                FactColumn::required(COUNTRY, ColumnType::Integer),
                FactColumn::required(REGION, ColumnType::Integer),
                FactColumn::required(ATTACK_TYPE, ColumnType::Integer),
                FactColumn::required(GROUP_ID, ColumnType::Integer),
            ],
            projection: [
                EVENT_ID,
                YEAR,
                MONTH,
                DAY,
                LATITUDE,
                LONGITUDE,
                SUMMARY,
                TARGET_TYPE,
                KILLS_COUNT,
                EXTENDED,
                SUICIDE,
                SUCCESS,
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        };

        let dimensions = BTreeMap::from([
            (
                Dimension::Country,
                DimensionTable::new("countries", "countrycode", "countryname", COUNTRY),
            ),
            (
                Dimension::AttackType,
                DimensionTable::new(
                    "attack_types",
                    "attacktype",
                    "attacktypedescription",
                    ATTACK_TYPE,
                ),
            ),
            (
                Dimension::Group,
                DimensionTable::new("groups", "id", "group_name", GROUP_ID),
            ),
            (
                Dimension::Region,
                DimensionTable::new("regions", "regioncode", "regionname", REGION),
            ),
            (
                Dimension::TargetType,
                DimensionTable::new("target_types", "id", "target_type", TARGET_TYPE),
            ),
        ]);

        Self { fact, dimensions }
    }

    /// Replace the descriptor of one dimension (e.g. a renamed lookup table).
    pub fn with_dimension(mut self, dimension: Dimension, table: DimensionTable) -> Self {
        self.dimensions.insert(dimension, table);
        self
    }

    /// Put the fact table under another name.
    pub fn with_fact_table(mut self, table: &str) -> Self {
        self.fact.table = table.into();
        self
    }

    pub fn fact(&self) -> &FactTable {
        &self.fact
    }

    /// Descriptor for a dimension. Every [`Dimension`] is always present.
    pub fn dimension(&self, dimension: Dimension) -> &DimensionTable {
        &self.dimensions[&dimension]
    }

    /// Dimensions in join order.
    pub fn dimensions(&self) -> impl Iterator<Item = (Dimension, &DimensionTable)> {
        self.dimensions.iter().map(|(d, t)| (*d, t))
    }
}

impl Default for StarSchema {
    fn default() -> Self {
        Self::global_terrorism()
    }
}
