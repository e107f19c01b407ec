//! Shared helper functions for SQL dialect implementations.
//!
//! Reusable building blocks that dialects compose to implement the
//! `SqlDialect` trait with minimal duplication.

use super::ColumnType;

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: SQLite, Postgres, DuckDB
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote identifier with backticks.
/// Used by: MySQL
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

// =============================================================================
// Placeholders
// =============================================================================

/// Positional `$n` placeholder.
/// Used by: Postgres
pub fn placeholder_dollar(ordinal: usize) -> String {
    format!("${}", ordinal)
}

// =============================================================================
// Column Types
// =============================================================================

/// Column types for Postgres/DuckDB style engines.
pub fn column_type_ansi(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Text => "TEXT",
        ColumnType::Integer => "BIGINT",
        ColumnType::Real => "DOUBLE PRECISION",
    }
}

/// SQLite storage classes.
pub fn column_type_sqlite(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Text => "TEXT",
        ColumnType::Integer => "INTEGER",
        ColumnType::Real => "REAL",
    }
}

/// Column types for MySQL.
pub fn column_type_mysql(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Text => "TEXT",
        ColumnType::Integer => "BIGINT",
        ColumnType::Real => "DOUBLE",
    }
}
