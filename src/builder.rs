//! Filter compilation.
//!
//! Turns a [`Filter`] into one SELECT over the star schema:
//!
//! ```text
//! SELECT <fact projection>, <one display column per dimension>
//! FROM global
//! INNER JOIN <dimension> ON <dimension>.<key> = global.<foreign key>   (x5)
//! WHERE (<year range>) [AND (<facet>)]...
//! ```
//!
//! Each facet yields an optional predicate. Facets are visited in the
//! fixed [`Facet::ORDER`], inactive ones are dropped, and the rest are
//! ANDed. The year range is always active, so the WHERE clause is never
//! empty. Filter values are bound parameters, never inline literals.

use tracing::debug;

use crate::filter::{Facet, Filter, YearBounds};
use crate::schema::{columns, Dimension, StarSchema};
use crate::sql::{
    conjunction, param, table_col, Dialect, Expr, ExprExt, Query, SelectExpr, Statement, TableRef,
};

/// A facet's contribution to the WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetPredicate {
    pub facet: Facet,
    /// `None` when the filter leaves the facet unconstrained.
    pub predicate: Option<Expr>,
}

impl FacetPredicate {
    pub fn is_active(&self) -> bool {
        self.predicate.is_some()
    }
}

/// Compiles filters against a star schema.
///
/// Holds only immutable configuration and is freely shared across threads.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    schema: StarSchema,
    bounds: YearBounds,
    dialect: Dialect,
}

impl QueryBuilder {
    pub fn new(bounds: YearBounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub fn with_schema(mut self, schema: StarSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn schema(&self) -> &StarSchema {
        &self.schema
    }

    pub fn bounds(&self) -> YearBounds {
        self.bounds
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Build the query AST for `filter`.
    pub fn build_query(&self, filter: &Filter) -> Query {
        let fact = self.schema.fact();

        let mut select: Vec<SelectExpr> = fact
            .projection
            .iter()
            .map(|column| SelectExpr::new(table_col(&fact.table, column)))
            .collect();
        select.extend(
            self.schema
                .dimensions()
                .map(|(dimension, dim)| {
                    table_col(&dim.table, &dim.display).alias(&dimension.display_alias())
                }),
        );

        let mut query = Query::new()
            .select(select)
            .from(TableRef::new(&fact.table));

        for (_, dim) in self.schema.dimensions() {
            query = query.inner_join(
                TableRef::new(&dim.table),
                table_col(&dim.table, &dim.key).eq(table_col(&fact.table, &dim.foreign_key)),
            );
        }

        let active = self
            .predicates(filter)
            .into_iter()
            .filter_map(|p| p.predicate);
        if let Some(predicate) = conjunction(active) {
            query = query.filter(predicate);
        }

        query
    }

    /// Compile `filter` to SQL text and bound parameters.
    pub fn compile(&self, filter: &Filter) -> Statement {
        let statement = self.build_query(filter).to_statement(self.dialect);
        debug!(
            dialect = %self.dialect,
            params = statement.params.len(),
            sql = %statement.sql,
            "compiled filter query"
        );
        statement
    }

    /// Every facet's predicate in compile order, active or not.
    ///
    /// Each active predicate is parenthesized so it composes with AND
    /// regardless of its own operators.
    pub fn predicates(&self, filter: &Filter) -> Vec<FacetPredicate> {
        Facet::ORDER
            .into_iter()
            .map(|facet| FacetPredicate {
                facet,
                predicate: self.predicate(facet, filter).map(|p| p.paren()),
            })
            .collect()
    }

    fn predicate(&self, facet: Facet, filter: &Filter) -> Option<Expr> {
        match facet {
            Facet::YearRange => {
                let (min, max) = filter.year_range(self.bounds);
                let year = || self.fact_col(columns::YEAR);
                Some(year().gte(param(min)).and(year().lte(param(max))))
            }
            Facet::Extended => self.flag(columns::EXTENDED, filter.is_extended),
            Facet::Success => self.flag(columns::SUCCESS, filter.is_success),
            Facet::Suicide => self.flag(columns::SUICIDE, filter.is_suicide),
            Facet::Countries => self.membership(Dimension::Country, filter),
            Facet::Regions => self.membership(Dimension::Region, filter),
            Facet::AttackTypes => self.membership(Dimension::AttackType, filter),
            Facet::TargetTypes => self.membership(Dimension::TargetType, filter),
            Facet::Groups => self.membership(Dimension::Group, filter),
        }
    }

    /// Flags are stored as 0/1 integers.
    fn flag(&self, column: &str, value: Option<bool>) -> Option<Expr> {
        value.map(|v| self.fact_col(column).eq(param(i64::from(v))))
    }

    fn membership(&self, dimension: Dimension, filter: &Filter) -> Option<Expr> {
        let ids = filter.ids(dimension)?;
        let foreign_key = &self.schema.dimension(dimension).foreign_key;
        Some(
            self.fact_col(foreign_key)
                .in_list(ids.iter().map(|id| param(*id)).collect()),
        )
    }

    fn fact_col(&self, column: &str) -> Expr {
        table_col(&self.schema.fact().table, column)
    }
}
