//! SQL dialect definitions and formatting rules.
//!
//! Each dialect implements `SqlDialect` to describe the handful of places
//! where the filter queries differ between engines:
//!
//! - Identifier quoting: `"` (SQLite/PG/DuckDB), `` ` `` (MySQL)
//! - Bound parameter placeholders: `?` (SQLite/DuckDB/MySQL), `$n` (PostgreSQL)
//! - Column types for the star-schema DDL
//!
//! # Usage
//!
//! ```ignore
//! use facets::sql::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Postgres;
//! assert_eq!(dialect.placeholder(2), "$2");
//! ```

mod duckdb;
pub mod helpers;
mod mysql;
mod postgres;
mod sqlite;

pub use duckdb::DuckDb;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

use serde::{Deserialize, Serialize};

/// Storage class of a star-schema column, rendered per dialect in DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
}

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Quote an identifier (table, column, alias).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Render the placeholder for the `ordinal`-th bound parameter (1-based).
    fn placeholder(&self, ordinal: usize) -> String {
        let _ = ordinal;
        "?".into()
    }

    /// Column type keyword used when creating the star-schema tables.
    fn column_type(&self, ty: ColumnType) -> &'static str {
        helpers::column_type_ansi(ty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Sqlite,
    Postgres,
    DuckDb,
    MySql,
}

impl Dialect {
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Sqlite => &Sqlite,
            Dialect::Postgres => &Postgres,
            Dialect::DuckDb => &DuckDb,
            Dialect::MySql => &MySql,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn placeholder(&self, ordinal: usize) -> String {
        self.dialect().placeholder(ordinal)
    }

    fn column_type(&self, ty: ColumnType) -> &'static str {
        self.dialect().column_type(ty)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
