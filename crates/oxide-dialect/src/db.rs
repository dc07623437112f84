//! Database handle.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::callbacks::{self, Callbacks, Record};
use crate::clause::{Clause, ClauseBuilder, Expr, Limit, OrderByColumn};
use crate::dialect::Dialect;
use crate::driver::{ConnPool, Drivers, QueryResult};
use crate::error::{Error, Result};
use crate::migrator::Migrator;
use crate::schema::Table;
use crate::statement::Statement;
use crate::value::Value;

/// Options for [`Db::find`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    /// Projected columns; empty selects `*`.
    pub columns: Vec<String>,
    /// Conditions joined with AND.
    pub conditions: Vec<Expr>,
    /// Ordering.
    pub order: Vec<OrderByColumn>,
    /// Pagination.
    pub limit: Option<Limit>,
}

impl FindOptions {
    /// Creates options selecting every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition.
    #[must_use]
    pub fn filter(mut self, condition: Expr) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds an ordering column.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, desc: bool) -> Self {
        self.order.push(OrderByColumn {
            column: column.into(),
            desc,
        });
        self
    }

    /// Sets pagination.
    #[must_use]
    pub const fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A database handle: the dialect, its connection pool and the clause
/// renderers the dialect installed.
#[derive(Debug)]
pub struct Db {
    dialect: Arc<dyn Dialect>,
    drivers: Drivers,
    conn_pool: Option<Arc<dyn ConnPool>>,
    clause_builders: HashMap<&'static str, ClauseBuilder>,
    callbacks: Callbacks,
}

impl Db {
    /// Creates a handle for `dialect` and lets the dialect initialize it.
    ///
    /// `drivers` is the set of drivers the dialect may open a pool with.
    pub fn open(dialect: impl Dialect + 'static, drivers: Drivers) -> Result<Self> {
        let dialect: Arc<dyn Dialect> = Arc::new(dialect);
        let mut db = Self {
            dialect: Arc::clone(&dialect),
            drivers,
            conn_pool: None,
            clause_builders: HashMap::new(),
            callbacks: Callbacks::default(),
        };
        dialect.initialize(&mut db)?;
        debug!(dialect = dialect.name(), "Database handle initialized");
        Ok(db)
    }

    /// Returns the dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Returns the registered drivers.
    #[must_use]
    pub const fn drivers(&self) -> &Drivers {
        &self.drivers
    }

    /// Returns the connection pool.
    pub fn conn_pool(&self) -> Result<&Arc<dyn ConnPool>> {
        self.conn_pool.as_ref().ok_or(Error::NoConnPool)
    }

    /// Sets the connection pool.
    pub fn set_conn_pool(&mut self, pool: Arc<dyn ConnPool>) {
        self.conn_pool = Some(pool);
    }

    /// Returns the clause renderers installed on this handle.
    #[must_use]
    pub const fn clause_builders(&self) -> &HashMap<&'static str, ClauseBuilder> {
        &self.clause_builders
    }

    /// Installs a clause renderer, replacing any previous one for `name`.
    pub fn register_clause_builder(&mut self, name: &'static str, builder: ClauseBuilder) {
        self.clause_builders.insert(name, builder);
    }

    /// Returns the statement processors.
    #[must_use]
    pub const fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// Returns the statement processors for modification.
    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    /// Starts a new statement.
    #[must_use]
    pub const fn statement(&self) -> Statement<'_> {
        Statement::new(self)
    }

    /// Returns the dialect's migrator.
    #[must_use]
    pub fn migrator(&self) -> Box<dyn Migrator + '_> {
        self.dialect.migrator(self)
    }

    /// Executes a statement.
    pub fn exec(&self, sql: &str, vars: &[Value]) -> Result<u64> {
        debug!(sql = %self.dialect.explain(sql, vars), "Executing SQL");
        self.conn_pool()?.exec(sql, vars)
    }

    /// Runs a query.
    pub fn raw_query(&self, sql: &str, vars: &[Value]) -> Result<QueryResult> {
        debug!(sql = %self.dialect.explain(sql, vars), "Running query");
        self.conn_pool()?.query(sql, vars)
    }

    /// Inserts `records` into `table` and returns the affected row count.
    pub fn create(&self, table: &Table, records: &[Record]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }
        let mut stmt = self.statement();
        stmt.add_clause(Clause::insert(table.name.as_str()));
        stmt.add_clause(callbacks::create_values(self.dialect(), table, records));
        stmt.build(self.callbacks.create_clauses());
        let (sql, vars) = stmt.into_parts();
        self.exec(&sql, &vars)
    }

    /// Selects rows from `table`.
    pub fn find(&self, table: &Table, options: FindOptions) -> Result<QueryResult> {
        let stmt = self.find_statement(table, options);
        let (sql, vars) = stmt.into_parts();
        self.raw_query(&sql, &vars)
    }

    /// Builds the SELECT statement [`Db::find`] would run.
    #[must_use]
    pub fn find_statement(&self, table: &Table, options: FindOptions) -> Statement<'_> {
        let mut stmt = self.statement();
        let columns: Vec<&str> = options.columns.iter().map(String::as_str).collect();
        stmt.add_clause(Clause::select(&columns));
        stmt.add_clause(Clause::from(table.name.as_str()));
        if !options.conditions.is_empty() {
            stmt.add_clause(Clause::where_(options.conditions));
        }
        if !options.order.is_empty() {
            stmt.add_clause(Clause::order_by(options.order));
        }
        if let Some(limit) = options.limit {
            stmt.add_clause(Clause::limit(limit));
        }
        stmt.build(self.callbacks.query_clauses());
        stmt
    }
}
