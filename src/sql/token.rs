//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens are dialect-agnostic representations that serialize
//! to dialect-specific strings.

use super::dialect::{Dialect, SqlDialect};
use super::statement::{Statement, Value};

/// SQL Token - every element the filter queries are made of.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Where,
    And,
    As,
    On,
    Join,
    Inner,
    In,
    False,

    // === Punctuation ===
    Comma,
    Dot,
    LParen,
    RParen,

    // === Operators ===
    Eq,
    Lte,
    Gte,

    // === Whitespace / Formatting ===
    Space,
    Newline,
    Indent(usize),

    // === Dynamic Content ===
    /// Identifier (table, column, alias)
    Ident(String),

    /// Bound parameter. Serializes to the dialect's placeholder; the value
    /// is collected by [`TokenStream::to_statement`].
    Param(Value),
}

impl Token {
    /// Serialize this token to a string for the given dialect.
    ///
    /// A lone `Param` renders as the first placeholder; streams number
    /// their parameters through [`Token::serialize_at`].
    pub fn serialize(&self, dialect: Dialect) -> String {
        self.serialize_at(dialect, 1)
    }

    /// Serialize this token, rendering a `Param` as the `ordinal`-th placeholder.
    pub fn serialize_at(&self, dialect: Dialect, ordinal: usize) -> String {
        match self {
            // Keywords
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::As => "AS".into(),
            Token::On => "ON".into(),
            Token::Join => "JOIN".into(),
            Token::Inner => "INNER".into(),
            Token::In => "IN".into(),
            Token::False => "FALSE".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            // Operators
            Token::Eq => "=".into(),
            Token::Lte => "<=".into(),
            Token::Gte => ">=".into(),

            // Whitespace
            Token::Space => " ".into(),
            Token::Newline => "\n".into(),
            Token::Indent(n) => "  ".repeat(*n),

            // Dynamic - dialect-specific formatting
            Token::Ident(name) => dialect.quote_identifier(name),
            Token::Param(_) => dialect.placeholder(ordinal),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self, dialect: Dialect) -> String {
        self.to_statement(dialect).sql
    }

    /// Serialize to SQL text, numbering placeholders and collecting the
    /// bound values in the order they appear.
    pub fn to_statement(&self, dialect: Dialect) -> Statement {
        let mut sql = String::new();
        let mut params = Vec::new();

        for token in &self.tokens {
            match token {
                Token::Param(value) => {
                    params.push(value.clone());
                    sql.push_str(&token.serialize_at(dialect, params.len()));
                }
                other => sql.push_str(&other.serialize(dialect)),
            }
        }

        Statement { sql, params }
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }
    pub fn indent(&mut self, n: usize) -> &mut Self {
        self.push(Token::Indent(n))
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
