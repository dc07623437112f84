//! Statement assembly.

use crate::clause::{Builder, Clause, Writer};
use crate::db::Db;
use crate::value::Value;

/// A statement under construction: SQL text, bound values and the clauses
/// waiting to be rendered.
#[derive(Debug)]
pub struct Statement<'a> {
    db: &'a Db,
    sql: String,
    vars: Vec<Value>,
    clauses: Vec<Clause>,
}

impl<'a> Statement<'a> {
    /// Creates an empty statement bound to a database handle.
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self {
            db,
            sql: String::new(),
            vars: Vec::new(),
            clauses: Vec::new(),
        }
    }

    /// Returns the database handle.
    #[must_use]
    pub const fn db(&self) -> &'a Db {
        self.db
    }

    /// Adds a clause, replacing an earlier clause with the same name.
    pub fn add_clause(&mut self, clause: Clause) {
        match self.clauses.iter_mut().find(|c| c.name == clause.name) {
            Some(existing) => *existing = clause,
            None => self.clauses.push(clause),
        }
    }

    /// Renders the clauses named in `names`, in that order.
    ///
    /// Clauses not present in the statement are skipped. A clause builder
    /// registered on the database under the clause name takes precedence
    /// over the expression's default rendering.
    pub fn build(&mut self, names: &[&str]) {
        let clauses = std::mem::take(&mut self.clauses);
        let db = self.db;
        let mut first = true;
        for name in names {
            let Some(clause) = clauses.iter().find(|c| c.name == *name) else {
                continue;
            };
            if first {
                first = false;
            } else {
                self.write_byte(b' ');
            }
            match db.clause_builders().get(clause.name) {
                Some(builder) => builder(clause, self),
                None => clause.expression.build(self),
            }
        }
        self.clauses = clauses;
    }

    /// Returns the rendered SQL.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the bound values.
    #[must_use]
    pub fn vars(&self) -> &[Value] {
        &self.vars
    }

    /// Consumes the statement, returning its SQL and values.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.vars)
    }

    /// Quotes an identifier with the database's dialect.
    #[must_use]
    pub fn quote(&self, identifier: &str) -> String {
        let mut out = String::new();
        self.db.dialect().quote_to(&mut out, identifier);
        out
    }

    /// Returns the SQL with values inlined, for logging.
    #[must_use]
    pub fn explain(&self) -> String {
        self.db.dialect().explain(&self.sql, &self.vars)
    }
}

impl Writer for Statement<'_> {
    fn write_sql(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    fn write_byte(&mut self, byte: u8) {
        self.sql.push(char::from(byte));
    }
}

impl Builder for Statement<'_> {
    fn write_quoted(&mut self, identifier: &str) {
        let db = self.db;
        db.dialect().quote_to(self, identifier);
    }

    fn add_var(&mut self, value: Value) {
        let db = self.db;
        self.vars.push(value);
        let mut placeholder = String::new();
        if let Some(value) = self.vars.last() {
            db.dialect().bind_var_to(&mut placeholder, self, value);
        }
        self.sql.push_str(&placeholder);
    }
}
