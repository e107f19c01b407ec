//! # facets
//!
//! A faceted query engine over a star-schema event dataset.
//!
//! ## Architecture
//!
//! A caller describes which events it wants with a [`Filter`] whose
//! facets are all optional. The filter is compiled into one parameterized
//! SELECT, run on a [`DataSource`](datasource::DataSource), and every row
//! is decoded into an [`Event`](model::Event):
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Filter (optional facets)                │
//! │  (year range, flags, country/region/group/... ids)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Query AST over the StarSchema                  │
//! │  (fact table + inner joins to five dimension tables)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql: tokens + dialect]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Statement (SQL text + bound parameters)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [datasource + repository]
//! ┌─────────────────────────────────────────────────────────┐
//! │                     Vec<Event>                          │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod builder;
pub mod config;
pub mod datasource;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repository;
pub mod schema;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::builder::{FacetPredicate, QueryBuilder};
    pub use crate::datasource::{DataSource, DecodeError, Row, SqliteSource};
    pub use crate::filter::{Facet, Filter, YearBounds};
    pub use crate::model::Event;
    pub use crate::repository::{
        find_events_matching, FacetRepository, FiltersRepository, QueryError, QueryResult,
    };
    pub use crate::schema::{Dimension, DimensionTable, StarSchema};
    pub use crate::sql::{Dialect, SqlDialect, Statement, Value};
}

// Also export at crate root for convenience
pub use builder::QueryBuilder;
pub use filter::{Filter, YearBounds};
pub use model::Event;
pub use repository::{find_events_matching, FacetRepository, FiltersRepository};
pub use sql::{Dialect, Statement};
