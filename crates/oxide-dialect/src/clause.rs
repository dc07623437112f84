//! Clause model and rendering.
//!
//! A statement is assembled from named clauses (`SELECT`, `FROM`, `LIMIT`,
//! ...). Each clause carries an [`Expression`] with a default ANSI rendering.
//! Dialects that spell a clause differently register a [`ClauseBuilder`]
//! under the clause name, and the statement builder uses it instead of the
//! default.

use crate::value::Value;

/// Clause name for the projection.
pub const SELECT: &str = "SELECT";
/// Clause name for the source table.
pub const FROM: &str = "FROM";
/// Clause name for filter conditions.
pub const WHERE: &str = "WHERE";
/// Clause name for grouping.
pub const GROUP_BY: &str = "GROUP BY";
/// Clause name for ordering.
pub const ORDER_BY: &str = "ORDER BY";
/// Clause name for pagination.
pub const LIMIT: &str = "LIMIT";
/// Clause name for row locking.
pub const FOR: &str = "FOR";
/// Clause name for the insert target.
pub const INSERT: &str = "INSERT";
/// Clause name for inserted rows.
pub const VALUES: &str = "VALUES";
/// Clause name for upsert handling.
pub const ON_CONFLICT: &str = "ON CONFLICT";
/// Clause name for the update target.
pub const UPDATE: &str = "UPDATE";
/// Clause name for assignments.
pub const SET: &str = "SET";
/// Clause name for the delete target.
pub const DELETE: &str = "DELETE";

/// Sink for rendered SQL text.
pub trait Writer {
    /// Appends raw SQL text.
    fn write_sql(&mut self, sql: &str);

    /// Appends a single ASCII byte.
    fn write_byte(&mut self, byte: u8);
}

impl Writer for String {
    fn write_sql(&mut self, sql: &str) {
        self.push_str(sql);
    }

    fn write_byte(&mut self, byte: u8) {
        self.push(char::from(byte));
    }
}

/// A writer that can also quote identifiers and bind values.
pub trait Builder: Writer {
    /// Writes an identifier quoted for the current dialect.
    fn write_quoted(&mut self, identifier: &str);

    /// Binds a value and writes its placeholder.
    fn add_var(&mut self, value: Value);
}

/// Dialect override for rendering a clause.
pub type ClauseBuilder = fn(&Clause, &mut dyn Builder);

/// Raw SQL with `?` positions and the values bound to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// SQL text.
    pub sql: String,
    /// Values for the `?` positions, in order.
    pub vars: Vec<Value>,
}

impl Expr {
    /// Creates an expression without bound values.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            vars: Vec::new(),
        }
    }

    /// Binds the next `?` position.
    #[must_use]
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.vars.push(value.into());
        self
    }

    /// Renders the expression, binding each `?` to the next value.
    ///
    /// Positions beyond the supplied values are written back as `?`.
    pub fn build(&self, builder: &mut dyn Builder) {
        let mut vars = self.vars.iter();
        let mut rest = self.sql.as_str();
        while let Some(pos) = rest.find('?') {
            builder.write_sql(&rest[..pos]);
            match vars.next() {
                Some(value) => builder.add_var(value.clone()),
                None => builder.write_byte(b'?'),
            }
            rest = &rest[pos + 1..];
        }
        builder.write_sql(rest);
    }
}

/// Pagination: number of rows and number of rows to skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limit {
    /// Maximum number of rows.
    pub limit: i64,
    /// Rows to skip; `0` or less means no offset.
    pub offset: i64,
}

impl Limit {
    /// Creates a limit without offset.
    #[must_use]
    pub const fn new(limit: i64) -> Self {
        Self { limit, offset: 0 }
    }

    /// Sets the offset.
    #[must_use]
    pub const fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }
}

/// An ORDER BY item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByColumn {
    /// Column name.
    pub column: String,
    /// Descending order.
    pub desc: bool,
}

/// A value position inside a VALUES row.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A bound value.
    Value(Value),
    /// An inline SQL expression (e.g. a column default).
    Expr(Expr),
}

/// Clause payloads understood by the statement builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Projected columns; empty selects `*`.
    Select(Vec<String>),
    /// Source table.
    From(String),
    /// Conditions joined with AND.
    Where(Vec<Expr>),
    /// Ordering.
    OrderBy(Vec<OrderByColumn>),
    /// Pagination.
    Limit(Limit),
    /// Insert target table.
    Insert(String),
    /// Inserted rows.
    Values {
        /// Column names.
        columns: Vec<String>,
        /// One entry per row, aligned with `columns`.
        rows: Vec<Vec<Arg>>,
    },
    /// Raw SQL.
    Expr(Expr),
}

impl Expression {
    /// Renders the expression in ANSI syntax.
    pub fn build(&self, builder: &mut dyn Builder) {
        match self {
            Self::Select(columns) => {
                builder.write_sql("SELECT ");
                if columns.is_empty() {
                    builder.write_byte(b'*');
                } else {
                    write_quoted_list(builder, columns);
                }
            }
            Self::From(table) => {
                builder.write_sql("FROM ");
                builder.write_quoted(table);
            }
            Self::Where(conditions) => {
                builder.write_sql("WHERE ");
                for (idx, cond) in conditions.iter().enumerate() {
                    if idx > 0 {
                        builder.write_sql(" AND ");
                    }
                    cond.build(builder);
                }
            }
            Self::OrderBy(columns) => {
                builder.write_sql("ORDER BY ");
                for (idx, col) in columns.iter().enumerate() {
                    if idx > 0 {
                        builder.write_byte(b',');
                    }
                    builder.write_quoted(&col.column);
                    if col.desc {
                        builder.write_sql(" DESC");
                    }
                }
            }
            Self::Limit(limit) => {
                builder.write_sql("LIMIT ");
                builder.write_sql(&limit.limit.to_string());
                if limit.offset > 0 {
                    builder.write_sql(" OFFSET ");
                    builder.write_sql(&limit.offset.to_string());
                }
            }
            Self::Insert(table) => {
                builder.write_sql("INSERT INTO ");
                builder.write_quoted(table);
            }
            Self::Values { columns, rows } => {
                if columns.is_empty() {
                    builder.write_sql("DEFAULT VALUES");
                    return;
                }
                builder.write_byte(b'(');
                write_quoted_list(builder, columns);
                builder.write_sql(") VALUES ");
                for (idx, row) in rows.iter().enumerate() {
                    if idx > 0 {
                        builder.write_byte(b',');
                    }
                    builder.write_byte(b'(');
                    for (pos, arg) in row.iter().enumerate() {
                        if pos > 0 {
                            builder.write_byte(b',');
                        }
                        match arg {
                            Arg::Value(value) => builder.add_var(value.clone()),
                            Arg::Expr(expr) => expr.build(builder),
                        }
                    }
                    builder.write_byte(b')');
                }
            }
            Self::Expr(expr) => expr.build(builder),
        }
    }
}

fn write_quoted_list(builder: &mut dyn Builder, names: &[String]) {
    for (idx, name) in names.iter().enumerate() {
        if idx > 0 {
            builder.write_byte(b',');
        }
        builder.write_quoted(name);
    }
}

/// A named clause of a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// Clause name, used to look up dialect builders.
    pub name: &'static str,
    /// Clause payload.
    pub expression: Expression,
}

impl Clause {
    /// Creates a clause.
    #[must_use]
    pub const fn new(name: &'static str, expression: Expression) -> Self {
        Self { name, expression }
    }

    /// `SELECT` clause.
    #[must_use]
    pub fn select(columns: &[&str]) -> Self {
        Self::new(
            SELECT,
            Expression::Select(columns.iter().map(ToString::to_string).collect()),
        )
    }

    /// `FROM` clause.
    #[must_use]
    pub fn from(table: impl Into<String>) -> Self {
        Self::new(FROM, Expression::From(table.into()))
    }

    /// `WHERE` clause.
    #[must_use]
    pub fn where_(conditions: Vec<Expr>) -> Self {
        Self::new(WHERE, Expression::Where(conditions))
    }

    /// `ORDER BY` clause.
    #[must_use]
    pub fn order_by(columns: Vec<OrderByColumn>) -> Self {
        Self::new(ORDER_BY, Expression::OrderBy(columns))
    }

    /// `LIMIT` clause.
    #[must_use]
    pub const fn limit(limit: Limit) -> Self {
        Self::new(LIMIT, Expression::Limit(limit))
    }

    /// `INSERT` clause.
    #[must_use]
    pub fn insert(table: impl Into<String>) -> Self {
        Self::new(INSERT, Expression::Insert(table.into()))
    }

    /// `VALUES` clause.
    #[must_use]
    pub fn values(columns: Vec<String>, rows: Vec<Vec<Arg>>) -> Self {
        Self::new(VALUES, Expression::Values { columns, rows })
    }
}
