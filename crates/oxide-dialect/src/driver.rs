//! Driver and connection-pool seam.
//!
//! The dialect layer never speaks a wire protocol itself. A [`Driver`] opens
//! a [`ConnPool`] from a data source string, and the pool executes SQL. The
//! set of available drivers is an explicit [`Drivers`] registry handed to
//! [`Db::open`](crate::Db::open), so there is no process-wide registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value::Value;

/// Metadata for a result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Column name as reported by the database.
    pub name: String,
    /// Database type name, when the driver reports one.
    pub database_type: Option<String>,
}

impl ColumnMeta {
    /// Creates column metadata without a type name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database_type: None,
        }
    }
}

/// Rows returned by a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Result columns.
    pub columns: Vec<ColumnMeta>,
    /// Result rows, aligned with `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Returns the first column of the first row.
    #[must_use]
    pub fn scalar(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.first())
    }
}

/// A pool of database connections.
pub trait ConnPool: Send + Sync + fmt::Debug {
    /// Executes a statement and returns the number of affected rows.
    fn exec(&self, sql: &str, vars: &[Value]) -> Result<u64>;

    /// Runs a query and returns its rows.
    fn query(&self, sql: &str, vars: &[Value]) -> Result<QueryResult>;
}

/// Opens connection pools for one database engine.
pub trait Driver: Send + Sync {
    /// Opens a pool for the given data source string.
    fn open(&self, dsn: &str) -> Result<Arc<dyn ConnPool>>;
}

/// Registry of drivers by name.
#[derive(Clone, Default)]
pub struct Drivers {
    drivers: HashMap<String, Arc<dyn Driver>>,
}

impl Drivers {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a driver under `name`, replacing any previous one.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, driver: impl Driver + 'static) -> Self {
        self.register(name, driver);
        self
    }

    /// Registers a driver under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, driver: impl Driver + 'static) {
        self.drivers.insert(name.into(), Arc::new(driver));
    }

    /// Returns whether a driver is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }

    /// Opens a pool with the driver registered under `name`.
    pub fn open(&self, name: &str, dsn: &str) -> Result<Arc<dyn ConnPool>> {
        let driver = self
            .drivers
            .get(name)
            .ok_or_else(|| Error::UnknownDriver(name.to_string()))?;
        driver.open(dsn)
    }
}

impl fmt::Debug for Drivers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.drivers.keys().collect();
        names.sort();
        f.debug_struct("Drivers").field("names", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NullPool;

    impl ConnPool for NullPool {
        fn exec(&self, _sql: &str, _vars: &[Value]) -> Result<u64> {
            Ok(0)
        }

        fn query(&self, _sql: &str, _vars: &[Value]) -> Result<QueryResult> {
            Ok(QueryResult::default())
        }
    }

    struct NullDriver;

    impl Driver for NullDriver {
        fn open(&self, _dsn: &str) -> Result<Arc<dyn ConnPool>> {
            Ok(Arc::new(NullPool))
        }
    }

    #[test]
    fn test_open_registered_driver() {
        let drivers = Drivers::new().with("null", NullDriver);
        assert!(drivers.contains("null"));
        assert!(drivers.open("null", "whatever").is_ok());
    }

    #[test]
    fn test_open_unknown_driver() {
        let drivers = Drivers::new();
        let err = drivers.open("firebirdsql", "db.fdb").unwrap_err();
        assert!(matches!(err, Error::UnknownDriver(ref name) if name == "firebirdsql"));
    }

    #[test]
    fn test_scalar() {
        let result = QueryResult {
            columns: vec![ColumnMeta::new("count")],
            rows: vec![vec![Value::Int(3)]],
        };
        assert_eq!(result.scalar(), Some(&Value::Int(3)));
        assert_eq!(QueryResult::default().scalar(), None);
    }
}
