#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use oxide_dialect::driver::QueryResult;
use oxide_dialect::{ConnPool, Db, Driver, Drivers, Error, Result, Value};
use oxide_firebird::{Config, FirebirdDialect};

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

/// Driver handing out one shared pool and remembering the DSNs it saw.
#[derive(Clone)]
pub struct FakeDriver {
    pub pool: Arc<RecordingPool>,
    pub dsns: Arc<Mutex<Vec<String>>>,
}

impl FakeDriver {
    pub fn new(pool: &Arc<RecordingPool>) -> Self {
        Self {
            pool: Arc::clone(pool),
            dsns: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn dsns(&self) -> Vec<String> {
        self.dsns.lock().unwrap().clone()
    }
}

impl Driver for FakeDriver {
    fn open(&self, dsn: &str) -> Result<Arc<dyn ConnPool>> {
        self.dsns.lock().unwrap().push(dsn.to_string());
        let pool: Arc<dyn ConnPool> = self.pool.clone();
        Ok(pool)
    }
}

/// Driver that always refuses to connect.
pub struct RefusingDriver;

impl Driver for RefusingDriver {
    fn open(&self, _dsn: &str) -> Result<Arc<dyn ConnPool>> {
        Err(Error::Connection("connection refused".into()))
    }
}

/// Opens a Firebird handle adopting `pool` as its connection.
pub fn open_db(pool: &Arc<RecordingPool>) -> Db {
    let config = Config {
        conn: Some(Arc::clone(pool) as Arc<dyn ConnPool>),
        ..Config::default()
    };
    Db::open(FirebirdDialect::new(config), Drivers::new())
        .expect("adopting a pool never fails")
}
