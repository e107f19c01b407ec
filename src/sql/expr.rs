//! Expression AST - the predicates and projections of a filter query.
//!
//! Strongly-typed AST for the SQL expressions the engine emits, with
//! exhaustive pattern matching enforced by the compiler. There is no
//! literal variant: every value reaches the SQL as a bound [`Expr::Param`].

use super::dialect::Dialect;
use super::statement::Value;
use super::token::{Token, TokenStream};

// =============================================================================
// Expression AST
// =============================================================================

/// A SQL expression.
///
/// Every variant must be handled in `to_tokens()` - the compiler enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Qualified column reference: table.column
    Column { table: String, column: String },

    /// Bound parameter placeholder carrying its value.
    Param(Value),

    /// Binary operation: left op right
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },

    /// IN: expr IN (values...)
    In { expr: Box<Expr>, values: Vec<Expr> },

    /// Parenthesized expression
    Paren(Box<Expr>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Eq,
    Lte,
    Gte,
    // Logical
    And,
}

// =============================================================================
// Expression to Tokens
// =============================================================================

impl Expr {
    /// Convert this expression to a token stream.
    ///
    /// Expressions are dialect-agnostic; quoting and placeholder style are
    /// decided when the stream is serialized.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();

        match self {
            Expr::Column { table, column } => {
                ts.push(Token::Ident(table.clone()));
                ts.push(Token::Dot);
                ts.push(Token::Ident(column.clone()));
            }

            Expr::Param(value) => {
                ts.push(Token::Param(value.clone()));
            }

            Expr::BinaryOp { left, op, right } => {
                ts.append(&left.to_tokens());
                ts.space();
                ts.push(binary_op_to_token(*op));
                ts.space();
                ts.append(&right.to_tokens());
            }

            Expr::In { expr, values } => {
                // "x IN ()" is invalid SQL and an empty list matches nothing
                if values.is_empty() {
                    ts.push(Token::False);
                } else {
                    ts.append(&expr.to_tokens());
                    ts.space().push(Token::In).space().lparen();
                    for (i, val) in values.iter().enumerate() {
                        if i > 0 {
                            ts.comma().space();
                        }
                        ts.append(&val.to_tokens());
                    }
                    ts.rparen();
                }
            }

            Expr::Paren(inner) => {
                ts.lparen();
                ts.append(&inner.to_tokens());
                ts.rparen();
            }
        }

        ts
    }

    /// Render this expression on its own (placeholders numbered from 1).
    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens().serialize(dialect)
    }
}

fn binary_op_to_token(op: BinaryOperator) -> Token {
    match op {
        BinaryOperator::Eq => Token::Eq,
        BinaryOperator::Lte => Token::Lte,
        BinaryOperator::Gte => Token::Gte,
        BinaryOperator::And => Token::And,
    }
}

// =============================================================================
// Expression Constructors
// =============================================================================

/// Create a qualified column reference (table.column).
pub fn table_col(table: &str, column: &str) -> Expr {
    Expr::Column {
        table: table.into(),
        column: column.into(),
    }
}

/// Create a bound parameter.
pub fn param(value: impl Into<Value>) -> Expr {
    Expr::Param(value.into())
}

/// AND together every expression, left to right.
///
/// Returns `None` for an empty input so callers decide what "no
/// predicates" means.
pub fn conjunction(exprs: impl IntoIterator<Item = Expr>) -> Option<Expr> {
    exprs.into_iter().reduce(|acc, next| acc.and(next))
}

// =============================================================================
// Expression Builder Trait
// =============================================================================

/// Extension trait for building expressions fluently.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    fn binary(self, op: BinaryOperator, other: Expr) -> Expr {
        Expr::BinaryOp {
            left: Box::new(self.into_expr()),
            op,
            right: Box::new(other),
        }
    }

    fn eq(self, other: Expr) -> Expr {
        self.binary(BinaryOperator::Eq, other)
    }

    fn gte(self, other: Expr) -> Expr {
        self.binary(BinaryOperator::Gte, other)
    }

    fn lte(self, other: Expr) -> Expr {
        self.binary(BinaryOperator::Lte, other)
    }

    fn and(self, other: Expr) -> Expr {
        self.binary(BinaryOperator::And, other)
    }

    fn in_list(self, values: Vec<Expr>) -> Expr {
        Expr::In {
            expr: Box::new(self.into_expr()),
            values,
        }
    }

    /// Wrap in parentheses.
    fn paren(self) -> Expr {
        Expr::Paren(Box::new(self.into_expr()))
    }

    /// Alias this expression (for SELECT list).
    fn alias(self, name: &str) -> crate::sql::query::SelectExpr {
        crate::sql::query::SelectExpr {
            expr: self.into_expr(),
            alias: Some(name.into()),
        }
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
