//! SQLite-backed data source.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};
use tracing::{debug, trace};

use super::{DataSource, DataSourceError, DataSourceResult, DecodeError, Row};
use crate::sql::{Statement, Value};

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Bool(b) => ToSqlOutput::from(*b),
            Value::Int(n) => ToSqlOutput::from(*n),
            Value::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}

/// A [`DataSource`] over a single SQLite connection.
///
/// Access is serialized through a mutex so the source can be shared
/// between threads.
pub struct SqliteSource {
    conn: Mutex<Connection>,
}

impl SqliteSource {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DataSourceResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening sqlite database");
        Ok(Self::from_connection(Connection::open(path)?))
    }

    /// Open a private in-memory database (for testing).
    pub fn open_in_memory() -> DataSourceResult<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Run a semicolon-separated script, e.g. the star-schema DDL or seed data.
    pub fn execute_batch(&self, sql: &str) -> DataSourceResult<()> {
        let conn = self.conn.lock().map_err(|_| DataSourceError::Poisoned)?;
        conn.execute_batch(sql)?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSource").finish_non_exhaustive()
    }
}

impl DataSource for SqliteSource {
    fn query_map<T, F>(&self, statement: &Statement, mut f: F) -> DataSourceResult<Vec<T>>
    where
        F: FnMut(&dyn Row) -> Result<T, DecodeError>,
    {
        let conn = self.conn.lock().map_err(|_| DataSourceError::Poisoned)?;
        let mut stmt = conn.prepare(&statement.sql)?;
        let mut rows = stmt.query(params_from_iter(statement.params.iter()))?;

        let mut decoded = Vec::new();
        while let Some(row) = rows.next()? {
            let value = f(&SqliteRow(row)).map_err(|source| DataSourceError::Decode {
                row: decoded.len(),
                source,
            })?;
            decoded.push(value);
        }

        trace!(rows = decoded.len(), "sqlite query finished");
        Ok(decoded)
    }
}

struct SqliteRow<'r, 's>(&'r rusqlite::Row<'s>);

impl SqliteRow<'_, '_> {
    fn value(&self, column: &str) -> Result<Option<ValueRef<'_>>, DecodeError> {
        match self.0.get_ref(column) {
            Ok(ValueRef::Null) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(DecodeError::MissingColumn(column.into())),
        }
    }
}

fn text<'a>(column: &str, bytes: &'a [u8]) -> Result<&'a str, DecodeError> {
    std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidType {
        column: column.into(),
        expected: "utf-8 text",
        found: "invalid utf-8".into(),
    })
}

fn invalid(column: &str, expected: &'static str, value: ValueRef<'_>) -> DecodeError {
    let found = match value {
        ValueRef::Text(bytes) => format!("text '{}'", String::from_utf8_lossy(bytes)),
        other => other.data_type().to_string().to_lowercase(),
    };
    DecodeError::InvalidType {
        column: column.into(),
        expected,
        found,
    }
}

impl Row for SqliteRow<'_, '_> {
    fn get_opt_string(&self, column: &str) -> Result<Option<String>, DecodeError> {
        let Some(value) = self.value(column)? else {
            return Ok(None);
        };
        match value {
            ValueRef::Text(bytes) => Ok(Some(text(column, bytes)?.to_string())),
            ValueRef::Integer(n) => Ok(Some(n.to_string())),
            ValueRef::Real(f) => Ok(Some(f.to_string())),
            other => Err(invalid(column, "text", other)),
        }
    }

    fn get_opt_int(&self, column: &str) -> Result<Option<i64>, DecodeError> {
        let Some(value) = self.value(column)? else {
            return Ok(None);
        };
        match value {
            ValueRef::Integer(n) => Ok(Some(n)),
            ValueRef::Real(f) if f.fract() == 0.0 => {
                if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    Ok(Some(f as i64))
                } else {
                    Err(DecodeError::OutOfRange {
                        column: column.into(),
                        expected: "integer",
                        value: f.to_string(),
                    })
                }
            }
            ValueRef::Text(bytes) => text(column, bytes)?
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| invalid(column, "integer", value)),
            other => Err(invalid(column, "integer", other)),
        }
    }

    fn get_opt_double(&self, column: &str) -> Result<Option<f64>, DecodeError> {
        let Some(value) = self.value(column)? else {
            return Ok(None);
        };
        match value {
            ValueRef::Real(f) => Ok(Some(f)),
            ValueRef::Integer(n) => Ok(Some(n as f64)),
            ValueRef::Text(bytes) => text(column, bytes)?
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| invalid(column, "double", value)),
            other => Err(invalid(column, "double", other)),
        }
    }

    fn get_opt_bool(&self, column: &str) -> Result<Option<bool>, DecodeError> {
        let Some(value) = self.value(column)? else {
            return Ok(None);
        };
        match value {
            ValueRef::Integer(n) => Ok(Some(n != 0)),
            ValueRef::Text(bytes) => match text(column, bytes)?.trim() {
                "1" => Ok(Some(true)),
                "0" => Ok(Some(false)),
                s if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
                s if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
                _ => Err(invalid(column, "boolean", value)),
            },
            other => Err(invalid(column, "boolean", other)),
        }
    }
}
