//! Default statement processors.
//!
//! Each operation (create, query, update, delete) renders a fixed sequence
//! of clauses. Dialects register these during initialization and may
//! replace individual clause renderers afterwards.

use std::collections::BTreeMap;

use crate::clause::{self, Arg, Clause};
use crate::db::Db;
use crate::dialect::Dialect;
use crate::schema::Table;
use crate::value::Value;

/// A row to insert, keyed by column name.
pub type Record = BTreeMap<String, Value>;

/// Clause order per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Clauses of an INSERT.
    pub create_clauses: Vec<&'static str>,
    /// Clauses of a SELECT.
    pub query_clauses: Vec<&'static str>,
    /// Clauses of an UPDATE.
    pub update_clauses: Vec<&'static str>,
    /// Clauses of a DELETE.
    pub delete_clauses: Vec<&'static str>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_clauses: vec![clause::INSERT, clause::VALUES, clause::ON_CONFLICT],
            query_clauses: vec![
                clause::SELECT,
                clause::FROM,
                clause::WHERE,
                clause::GROUP_BY,
                clause::ORDER_BY,
                clause::LIMIT,
                clause::FOR,
            ],
            update_clauses: vec![clause::UPDATE, clause::SET, clause::WHERE],
            delete_clauses: vec![clause::DELETE, clause::FROM, clause::WHERE],
        }
    }
}

/// Clause orders installed on a database handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Callbacks {
    config: Config,
    registered: bool,
}

impl Callbacks {
    /// Returns whether the default processors were registered.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.registered
    }

    /// Clause order for inserts.
    #[must_use]
    pub fn create_clauses(&self) -> &[&'static str] {
        &self.config.create_clauses
    }

    /// Clause order for queries.
    #[must_use]
    pub fn query_clauses(&self) -> &[&'static str] {
        &self.config.query_clauses
    }

    /// Clause order for updates.
    #[must_use]
    pub fn update_clauses(&self) -> &[&'static str] {
        &self.config.update_clauses
    }

    /// Clause order for deletes.
    #[must_use]
    pub fn delete_clauses(&self) -> &[&'static str] {
        &self.config.delete_clauses
    }
}

/// Installs the default processors on `db`.
pub fn register_default_callbacks(db: &mut Db, config: &Config) {
    *db.callbacks_mut() = Callbacks {
        config: config.clone(),
        registered: true,
    };
}

/// Builds the VALUES clause for inserting `records` into `table`.
///
/// Columns follow the table's field order. A field missing from a record
/// takes the dialect's default value expression; an auto-increment field
/// missing from every record is left out so the database assigns it.
#[must_use]
pub fn create_values(dialect: &dyn Dialect, table: &Table, records: &[Record]) -> Clause {
    let fields: Vec<_> = table
        .fields
        .iter()
        .filter(|f| !f.auto_increment || records.iter().any(|r| r.contains_key(&f.name)))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| match record.get(&field.name) {
                    Some(value) => Arg::Value(value.clone()),
                    None => Arg::Expr(dialect.default_value_of(field)),
                })
                .collect()
        })
        .collect();

    Clause::values(fields.iter().map(|f| f.name.clone()).collect(), rows)
}
