//! CREATE TABLE script for a star schema.

use crate::sql::{ColumnType, Dialect, SqlDialect};

use super::StarSchema;

/// Render the `CREATE TABLE IF NOT EXISTS` statements for the fact table
/// and every dimension table, separated by `;\n`.
///
/// Dimension tables are written first so the script also works on engines
/// that check foreign keys at creation time.
pub fn create_script(schema: &StarSchema, dialect: Dialect) -> String {
    let q = |ident: &str| dialect.quote_identifier(ident);
    let mut statements = Vec::new();

    for (_, dim) in schema.dimensions() {
        statements.push(format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  {} {} PRIMARY KEY,\n  {} {} NOT NULL\n)",
            q(&dim.table),
            q(&dim.key),
            dialect.column_type(ColumnType::Integer),
            q(&dim.display),
            dialect.column_type(ColumnType::Text),
        ));
    }

    let fact = schema.fact();
    let columns: Vec<String> = fact
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let mut def = format!("  {} {}", q(&column.name), dialect.column_type(column.ty));
            if i == 0 {
                def.push_str(" PRIMARY KEY");
            } else if !column.nullable {
                def.push_str(" NOT NULL");
            }
            def
        })
        .collect();
    statements.push(format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        q(&fact.table),
        columns.join(",\n")
    ));

    let mut script = statements.join(";\n");
    script.push(';');
    script
}
