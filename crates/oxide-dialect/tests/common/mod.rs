#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use oxide_dialect::callbacks::{self, Config as CallbacksConfig};
use oxide_dialect::clause::{ClauseBuilder, Expr, Writer};
use oxide_dialect::driver::QueryResult;
use oxide_dialect::migrator::{Config as MigratorConfig, GenericMigrator, Migrator};
use oxide_dialect::{ConnPool, DataType, Db, Dialect, Drivers, Field, Result, Statement, Value};

type Responder = Box<dyn Fn(&str, &[Value]) -> QueryResult + Send + Sync>;

/// Pool that records every statement and answers queries from a closure.
pub struct RecordingPool {
    log: Mutex<Vec<(String, Vec<Value>)>>,
    responder: Responder,
}

impl std::fmt::Debug for RecordingPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingPool").finish_non_exhaustive()
    }
}

impl RecordingPool {
    pub fn new() -> Arc<Self> {
        Self::with_responder(|_, _| QueryResult::default())
    }

    pub fn with_responder(
        responder: impl Fn(&str, &[Value]) -> QueryResult + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            log: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    pub fn statements(&self) -> Vec<String> {
        self.log.lock().unwrap().iter().map(|(sql, _)| sql.clone()).collect()
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.log.lock().unwrap().clone()
    }
}

impl ConnPool for RecordingPool {
    fn exec(&self, sql: &str, vars: &[Value]) -> Result<u64> {
        self.log.lock().unwrap().push((sql.to_string(), vars.to_vec()));
        Ok(1)
    }

    fn query(&self, sql: &str, vars: &[Value]) -> Result<QueryResult> {
        self.log.lock().unwrap().push((sql.to_string(), vars.to_vec()));
        Ok((self.responder)(sql, vars))
    }
}

/// Plain ANSI dialect adopting a fixed pool.
#[derive(Debug)]
pub struct AnsiDialect {
    pub pool: Arc<RecordingPool>,
}

impl Dialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn initialize(&self, db: &mut Db) -> Result<()> {
        callbacks::register_default_callbacks(db, &CallbacksConfig::default());
        db.set_conn_pool(self.pool.clone());
        Ok(())
    }

    fn clause_builders(&self) -> HashMap<&'static str, ClauseBuilder> {
        HashMap::new()
    }

    fn data_type_of(&self, field: &Field) -> String {
        match field.data_type {
            DataType::Int | DataType::Uint => "BIGINT".to_string(),
            DataType::String => "TEXT".to_string(),
            _ => "BLOB".to_string(),
        }
    }

    fn default_value_of(&self, _field: &Field) -> Expr {
        Expr::new("DEFAULT")
    }

    fn quote_to(&self, writer: &mut dyn Writer, identifier: &str) {
        writer.write_byte(b'"');
        writer.write_sql(identifier);
        writer.write_byte(b'"');
    }

    fn bind_var_to(&self, writer: &mut dyn Writer, stmt: &Statement<'_>, _value: &Value) {
        writer.write_sql(&format!("${}", stmt.vars().len()));
    }

    fn explain(&self, sql: &str, vars: &[Value]) -> String {
        let pattern = regex::Regex::new(r"\$(\d+)").unwrap();
        oxide_dialect::explain::explain_sql(sql, Some(&pattern), "'", vars)
    }

    fn migrator<'a>(&self, db: &'a Db) -> Box<dyn Migrator + 'a> {
        Box::new(GenericMigrator::new(MigratorConfig::new(db)))
    }
}

pub fn open_db(pool: &Arc<RecordingPool>) -> Db {
    Db::open(
        AnsiDialect {
            pool: Arc::clone(pool),
        },
        Drivers::new(),
    )
    .expect("ansi dialect never fails to initialize")
}
