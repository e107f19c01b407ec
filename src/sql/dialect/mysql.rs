//! MySQL SQL dialect.
//!
//! MySQL differences from ANSI:
//! - Backtick identifier quoting (`` `name` ``)
//! - Anonymous `?` placeholders

use super::helpers;
use super::{ColumnType, SqlDialect};

/// MySQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn column_type(&self, ty: ColumnType) -> &'static str {
        helpers::column_type_mysql(ty)
    }
}
