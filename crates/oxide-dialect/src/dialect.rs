//! SQL dialect plugin contract.
//!
//! Different databases spell the same statement differently. A [`Dialect`]
//! supplies those differences to the statement builder and the migrator:
//! column types, quoting, placeholders and clause overrides.

use std::collections::HashMap;
use std::fmt;

use crate::clause::{ClauseBuilder, Expr, Writer};
use crate::db::Db;
use crate::error::Result;
use crate::migrator::Migrator;
use crate::schema::Field;
use crate::statement::Statement;
use crate::value::Value;

/// Trait for database dialects.
pub trait Dialect: Send + Sync + fmt::Debug {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Prepares a freshly created database handle: registers callbacks,
    /// sets up the connection pool and installs clause builders.
    fn initialize(&self, db: &mut Db) -> Result<()>;

    /// Returns the clause renderers this dialect overrides, by clause name.
    fn clause_builders(&self) -> HashMap<&'static str, ClauseBuilder>;

    /// Returns the column type for a field.
    fn data_type_of(&self, field: &Field) -> String;

    /// Returns the expression used for a field that has no value on insert.
    fn default_value_of(&self, field: &Field) -> Expr;

    /// Writes a quoted identifier.
    fn quote_to(&self, writer: &mut dyn Writer, identifier: &str);

    /// Writes the placeholder for a value just bound to `stmt`.
    fn bind_var_to(&self, writer: &mut dyn Writer, stmt: &Statement<'_>, value: &Value);

    /// Renders `sql` with its values inlined, for logging.
    fn explain(&self, sql: &str, vars: &[Value]) -> String;

    /// Returns the migrator for this dialect.
    fn migrator<'a>(&self, db: &'a Db) -> Box<dyn Migrator + 'a>;
}
