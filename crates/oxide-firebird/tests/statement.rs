//! Statements rendered through the Firebird dialect.

mod common;
use common::*;

use chrono::NaiveDate;
use oxide_dialect::callbacks::Record;
use oxide_dialect::clause::{Clause, Expr, Limit};
use oxide_dialect::{DataType, Field, FindOptions, Table, Value};

fn users() -> Table {
    Table::new("users")
        .field(
            Field::new("id", DataType::Int)
                .size(64)
                .primary_key()
                .auto_increment(),
        )
        .field(Field::new("name", DataType::String).size(100))
        .field(Field::new("bio", DataType::String))
}

#[test]
fn find_uses_rows_pagination() {
    let pool = RecordingPool::new();
    let db = open_db(&pool);

    db.find(
        &users(),
        FindOptions::new()
            .filter(Expr::new("\"name\" = ?").bind("ann"))
            .order_by("id", true)
            .limit(Limit::new(10).offset(20)),
    )
    .unwrap();

    let calls = pool.calls();
    assert_eq!(
        calls[0].0,
        "SELECT * FROM \"users\" WHERE \"name\" = ? ORDER BY \"id\" DESC ROWS 10 TO 20"
    );
    assert_eq!(calls[0].1, vec![Value::Text("ann".into())]);
}

#[test]
fn limit_without_offset() {
    let pool = RecordingPool::new();
    let db = open_db(&pool);

    let stmt = db.find_statement(&users(), FindOptions::new().limit(Limit::new(5)));
    assert_eq!(stmt.sql(), "SELECT * FROM \"users\" ROWS 5");
}

#[test]
fn zero_offset_is_omitted() {
    let pool = RecordingPool::new();
    let db = open_db(&pool);

    let mut stmt = db.statement();
    stmt.add_clause(Clause::select(&["id", "name"]));
    stmt.add_clause(Clause::from("users"));
    stmt.add_clause(Clause::limit(Limit::new(1).offset(0)));
    stmt.build(db.callbacks().query_clauses());

    assert_eq!(stmt.sql(), "SELECT \"id\",\"name\" FROM \"users\" ROWS 1");
}

#[test]
fn qualified_identifiers_are_quoted_per_segment() {
    let pool = RecordingPool::new();
    let db = open_db(&pool);

    let stmt = db.statement();
    assert_eq!(stmt.quote("users.name"), "\"users\".\"name\"");
}

#[test]
fn every_placeholder_is_a_question_mark() {
    let pool = RecordingPool::new();
    let db = open_db(&pool);

    let stmt = db.find_statement(
        &users(),
        FindOptions::new()
            .filter(Expr::new("\"id\" > ?").bind(1))
            .filter(Expr::new("\"name\" <> ?").bind("bob")),
    );
    assert_eq!(
        stmt.sql(),
        "SELECT * FROM \"users\" WHERE \"id\" > ? AND \"name\" <> ?"
    );
    assert_eq!(stmt.vars().len(), 2);
}

#[test]
fn create_fills_missing_values_with_null() {
    let pool = RecordingPool::new();
    let db = open_db(&pool);

    let mut first = Record::new();
    first.insert("name".into(), "ann".into());
    first.insert("bio".into(), "hi".into());
    let mut second = Record::new();
    second.insert("name".into(), "bob".into());

    db.create(&users(), &[first, second]).unwrap();

    let calls = pool.calls();
    assert_eq!(
        calls[0].0,
        "INSERT INTO \"users\" (\"name\",\"bio\") VALUES (?,?),(?,NULL)"
    );
    assert_eq!(
        calls[0].1,
        vec![
            Value::Text("ann".into()),
            Value::Text("hi".into()),
            Value::Text("bob".into()),
        ]
    );
}

#[test]
fn explain_inlines_values() {
    let pool = RecordingPool::new();
    let db = open_db(&pool);
    let joined = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();

    let stmt = db.find_statement(
        &users(),
        FindOptions::new()
            .filter(Expr::new("\"name\" = ?").bind("O'Neil"))
            .filter(Expr::new("\"joined\" > ?").bind(joined))
            .filter(Expr::new("\"bio\" IS ?").bind(Value::Null)),
    );
    assert_eq!(
        stmt.explain(),
        "SELECT * FROM \"users\" WHERE \"name\" = 'O''Neil' AND \"joined\" > '2024-03-01 12:30:00' \
         AND \"bio\" IS NULL"
    );
}
