//! DuckDB SQL dialect.
//!
//! DuckDB is PostgreSQL-compatible for everything the filter queries use,
//! except that its client APIs bind anonymous `?` placeholders.

use super::helpers;
use super::SqlDialect;

/// DuckDB SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    // Uses default `?` placeholders
}
