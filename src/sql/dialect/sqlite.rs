//! SQLite SQL dialect.
//!
//! SQLite is the engine the bundled data source runs against:
//! - ANSI identifier quoting (`"`)
//! - No boolean type, flags are stored as 0/1 integers
//! - Anonymous `?` placeholders bound in order
//! - Dynamic typing, DDL uses the storage class names

use super::helpers;
use super::{ColumnType, SqlDialect};

/// SQLite SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn column_type(&self, ty: ColumnType) -> &'static str {
        helpers::column_type_sqlite(ty)
    }
}
