//! SQL generation module.
//!
//! A type-safe SQL builder that renders the filter queries for several
//! dialects, always with bound parameters:
//!
//! - [`query`] - SELECT query builder
//! - [`expr`] - Expression AST and builder DSL
//! - [`statement`] - compiled SQL text plus bound values
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations

pub mod dialect;
pub mod expr;
pub mod query;
pub mod statement;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{ColumnType, Dialect, SqlDialect};
pub use expr::{conjunction, param, table_col, BinaryOperator, Expr, ExprExt};
pub use query::{Join, Query, SelectExpr, TableRef};
pub use statement::{Statement, Value};
pub use token::{Token, TokenStream};
