//! # oxide-dialect
//!
//! The dialect plugin contract of the oxide ORM layer.
//!
//! The ORM renders statements from abstract clauses and describes tables
//! with dialect-independent column descriptors. Everything that differs
//! between databases is asked of a [`Dialect`]:
//!
//! - the column type for a [`Field`](schema::Field)
//! - identifier quoting and bind placeholders
//! - clause renderers that replace the ANSI default (e.g. pagination)
//! - the expression used for missing insert values
//! - how a statement is explained in logs
//! - the [`Migrator`](migrator::Migrator) used for DDL
//!
//! A [`Db`] handle is created with [`Db::open`], which hands the fresh
//! handle to [`Dialect::initialize`]. The dialect opens (or adopts) a
//! [`ConnPool`](driver::ConnPool) through the explicit [`Drivers`]
//! registry and installs its clause builders.
//!
//! ## Example
//!
//! ```rust,ignore
//! use oxide_dialect::{Db, Drivers, FindOptions};
//! use oxide_dialect::clause::Limit;
//!
//! let db = Db::open(my_dialect, Drivers::new().with("mydriver", MyDriver))?;
//! let rows = db.find(&users, FindOptions::new().limit(Limit::new(10).offset(20)))?;
//! ```

pub mod callbacks;
pub mod clause;
pub mod db;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod explain;
pub mod migrator;
pub mod schema;
pub mod statement;
pub mod value;

pub use clause::{Builder, Clause, ClauseBuilder, Expr, Expression, Limit, Writer};
pub use db::{Db, FindOptions};
pub use dialect::Dialect;
pub use driver::{ConnPool, Driver, Drivers, QueryResult};
pub use error::{Error, Result};
pub use migrator::{GenericMigrator, Migrator};
pub use schema::{DataType, Field, Index, Table};
pub use statement::Statement;
pub use value::Value;
