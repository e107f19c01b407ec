//! Event lookup by filter.
//!
//! Compiles a [`Filter`], runs it on a [`DataSource`] and decodes every
//! row into an [`Event`]. A row that cannot be decoded fails the whole
//! call; callers never see a partial result.

use tracing::debug;

use crate::builder::QueryBuilder;
use crate::datasource::{DataSource, DataSourceError, DecodeError, Row};
use crate::filter::Filter;
use crate::model::Event;
use crate::schema::{columns, Dimension};
use crate::sql::Statement;

/// Errors returned by a filter lookup.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("query execution failed: {0}")]
    Execution(#[source] DataSourceError),

    #[error("failed to decode event at row {row}: {source}")]
    Decode { row: usize, source: DecodeError },
}

impl From<DataSourceError> for QueryError {
    fn from(err: DataSourceError) -> Self {
        match err {
            DataSourceError::Decode { row, source } => QueryError::Decode { row, source },
            other => QueryError::Execution(other),
        }
    }
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Finds events matching a filter.
pub trait FiltersRepository {
    fn find_by(&self, filter: &Filter) -> QueryResult<Vec<Event>>;
}

/// [`FiltersRepository`] over any [`DataSource`].
#[derive(Debug)]
pub struct FacetRepository<D> {
    source: D,
    builder: QueryBuilder,
}

impl<D: DataSource> FacetRepository<D> {
    pub fn new(source: D, builder: QueryBuilder) -> Self {
        Self { source, builder }
    }

    /// Default schema, default year bounds, SQLite placeholders.
    pub fn with_defaults(source: D) -> Self {
        Self::new(source, QueryBuilder::default())
    }

    /// The statement [`find_by`](FiltersRepository::find_by) would run.
    pub fn compile(&self, filter: &Filter) -> Statement {
        self.builder.compile(filter)
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    pub fn builder(&self) -> &QueryBuilder {
        &self.builder
    }
}

impl<D: DataSource> FiltersRepository for FacetRepository<D> {
    fn find_by(&self, filter: &Filter) -> QueryResult<Vec<Event>> {
        find_events_matching(&self.source, &self.builder, filter)
    }
}

/// Compile `filter`, run it on `source`, and decode the rows in delivery order.
pub fn find_events_matching<D: DataSource>(
    source: &D,
    builder: &QueryBuilder,
    filter: &Filter,
) -> QueryResult<Vec<Event>> {
    let statement = builder.compile(filter);
    let events = source.query_map(&statement, decode_event)?;
    debug!(events = events.len(), "filter query returned");
    Ok(events)
}

/// Map one result row to an [`Event`].
///
/// Dimension names are read through [`Dimension::display_alias`], the
/// aliases the query builder gives the display columns.
pub fn decode_event(row: &dyn Row) -> Result<Event, DecodeError> {
    let display = |dimension: Dimension| row.get_string(&dimension.display_alias());

    Ok(Event {
        event_id: row.get_string(columns::EVENT_ID)?,
        year: row.get_int(columns::YEAR)?,
        month: row.get_int(columns::MONTH)?,
        day: row.get_int(columns::DAY)?,
        extended: row.get_int(columns::EXTENDED)?,
        country: display(Dimension::Country)?,
        region: display(Dimension::Region)?,
        latitude: row.get_opt_double(columns::LATITUDE)?,
        longitude: row.get_opt_double(columns::LONGITUDE)?,
        summary: row.get_opt_string(columns::SUMMARY)?,
        is_success: row.get_bool(columns::SUCCESS)?,
        is_suicide: row.get_bool(columns::SUICIDE)?,
        attack_type: display(Dimension::AttackType)?,
        target_type: display(Dimension::TargetType)?,
        kills_count: row.get_opt_int(columns::KILLS_COUNT)?,
        group: display(Dimension::Group)?,
    })
}
