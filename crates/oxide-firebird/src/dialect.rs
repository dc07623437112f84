//! Firebird dialect implementation.

use std::collections::HashMap;
use std::sync::Arc;

use oxide_dialect::callbacks::{self, Config as CallbacksConfig};
use oxide_dialect::clause::{ClauseBuilder, Expr, Writer};
use oxide_dialect::explain::explain_sql;
use oxide_dialect::migrator::{Config as MigratorConfig, GenericMigrator, Migrator};
use oxide_dialect::{Db, Dialect, Field, Result, Statement, Value};
use tracing::info;

use crate::clause;
use crate::config::Config;
use crate::types;

/// Firebird dialect.
#[derive(Debug, Clone, Default)]
pub struct FirebirdDialect {
    config: Config,
}

impl FirebirdDialect {
    /// Creates a dialect that connects to `dsn` with the default driver.
    #[must_use]
    pub fn open(dsn: impl Into<String>) -> Self {
        Self::new(Config::new(dsn))
    }

    /// Creates a dialect from a configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

impl Dialect for FirebirdDialect {
    fn name(&self) -> &'static str {
        "firebird"
    }

    fn initialize(&self, db: &mut Db) -> Result<()> {
        callbacks::register_default_callbacks(db, &CallbacksConfig::default());

        let pool = match self.config.conn {
            Some(ref conn) => {
                info!("Using provided connection pool");
                Arc::clone(conn)
            }
            None => {
                let driver = self.config.driver_name();
                info!(driver, "Opening connection pool");
                db.drivers().open(driver, &self.config.dsn)?
            }
        };
        db.set_conn_pool(pool);

        for (name, builder) in self.clause_builders() {
            db.register_clause_builder(name, builder);
        }
        Ok(())
    }

    fn clause_builders(&self) -> HashMap<&'static str, ClauseBuilder> {
        clause::clause_builders()
    }

    fn data_type_of(&self, field: &Field) -> String {
        types::data_type_of(field, self.config.string_size())
    }

    fn default_value_of(&self, _field: &Field) -> Expr {
        Expr::new("NULL")
    }

    fn quote_to(&self, writer: &mut dyn Writer, identifier: &str) {
        writer.write_byte(b'"');
        for (idx, segment) in identifier.split('.').enumerate() {
            if idx > 0 {
                writer.write_sql(".\"");
            }
            writer.write_sql(segment);
            writer.write_byte(b'"');
        }
    }

    fn bind_var_to(&self, writer: &mut dyn Writer, _stmt: &Statement<'_>, _value: &Value) {
        writer.write_byte(b'?');
    }

    fn explain(&self, sql: &str, vars: &[Value]) -> String {
        explain_sql(sql, None, "'", vars)
    }

    fn migrator<'a>(&self, db: &'a Db) -> Box<dyn Migrator + 'a> {
        Box::new(GenericMigrator::new(MigratorConfig {
            db,
            create_index_after_create_table: true,
        }))
    }
}
