//! Outbound capability: run a statement and hand back typed rows.
//!
//! The engine needs nothing from a database beyond "execute this SQL with
//! these bound values and let me read each row by column name". Anything
//! satisfying [`DataSource`] can back a repository; [`SqliteSource`] is
//! the bundled implementation.

mod sqlite;

pub use sqlite::SqliteSource;

use crate::sql::Statement;

/// A row value could not be turned into the requested Rust type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("column '{0}' not found in result set")]
    MissingColumn(String),

    #[error("column '{0}' is NULL")]
    UnexpectedNull(String),

    #[error("column '{column}': expected {expected}, found {found}")]
    InvalidType {
        column: String,
        expected: &'static str,
        found: String,
    },

    #[error("column '{column}': value {value} out of range for {expected}")]
    OutOfRange {
        column: String,
        expected: &'static str,
        value: String,
    },
}

/// Errors raised while executing a statement.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to decode row {row}: {source}")]
    Decode { row: usize, source: DecodeError },

    #[error("data source connection lock poisoned")]
    Poisoned,
}

pub type DataSourceResult<T> = Result<T, DataSourceError>;

/// Read access to the current row, by column name.
///
/// Implementations coerce between compatible storage types (an integer
/// read as a string, `0`/`1` read as a boolean); anything else is a
/// [`DecodeError`].
pub trait Row {
    fn get_opt_string(&self, column: &str) -> Result<Option<String>, DecodeError>;

    fn get_opt_int(&self, column: &str) -> Result<Option<i64>, DecodeError>;

    fn get_opt_double(&self, column: &str) -> Result<Option<f64>, DecodeError>;

    fn get_opt_bool(&self, column: &str) -> Result<Option<bool>, DecodeError>;

    fn get_string(&self, column: &str) -> Result<String, DecodeError> {
        self.get_opt_string(column)?
            .ok_or_else(|| DecodeError::UnexpectedNull(column.into()))
    }

    fn get_int(&self, column: &str) -> Result<i64, DecodeError> {
        self.get_opt_int(column)?
            .ok_or_else(|| DecodeError::UnexpectedNull(column.into()))
    }

    fn get_double(&self, column: &str) -> Result<f64, DecodeError> {
        self.get_opt_double(column)?
            .ok_or_else(|| DecodeError::UnexpectedNull(column.into()))
    }

    fn get_bool(&self, column: &str) -> Result<bool, DecodeError> {
        self.get_opt_bool(column)?
            .ok_or_else(|| DecodeError::UnexpectedNull(column.into()))
    }
}

/// Something that can execute a compiled statement.
pub trait DataSource {
    /// Execute `statement` and decode every row with `f`, in the order the
    /// database delivers them.
    ///
    /// Stops at the first row `f` rejects; that failure is reported as
    /// [`DataSourceError::Decode`] with the zero-based row index and no
    /// rows are returned.
    fn query_map<T, F>(&self, statement: &Statement, f: F) -> DataSourceResult<Vec<T>>
    where
        F: FnMut(&dyn Row) -> Result<T, DecodeError>;
}

impl<D: DataSource> DataSource for &D {
    fn query_map<T, F>(&self, statement: &Statement, f: F) -> DataSourceResult<Vec<T>>
    where
        F: FnMut(&dyn Row) -> Result<T, DecodeError>,
    {
        (**self).query_map(statement, f)
    }
}

impl<D: DataSource> DataSource for std::sync::Arc<D> {
    fn query_map<T, F>(&self, statement: &Statement, f: F) -> DataSourceResult<Vec<T>>
    where
        F: FnMut(&dyn Row) -> Result<T, DecodeError>,
    {
        (**self).query_map(statement, f)
    }
}
