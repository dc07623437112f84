//! Example: Blog Schema on Firebird
//!
//! This example shows the SQL the Firebird dialect produces for a small
//! blog schema. Statements are printed by a pool that never touches a
//! database, so no Firebird server is needed.
//!
//! Run with: cargo run --example blog_schema -p oxide-firebird

use std::sync::Arc;

use oxide_dialect::callbacks::Record;
use oxide_dialect::driver::QueryResult;
use oxide_dialect::{
    ConnPool, DataType, Db, Drivers, Expr, Field, FindOptions, Index, Limit, Result, Table, Value,
};
use oxide_firebird::{Config, FirebirdDialect};

/// Pool that prints statements instead of running them.
#[derive(Debug)]
struct PrintingPool;

impl ConnPool for PrintingPool {
    fn exec(&self, sql: &str, vars: &[Value]) -> Result<u64> {
        println!("{sql};  -- {} bind value(s)", vars.len());
        Ok(0)
    }

    fn query(&self, sql: &str, vars: &[Value]) -> Result<QueryResult> {
        println!("{sql};  -- {} bind value(s)", vars.len());
        Ok(QueryResult::default())
    }
}

// =============================================================================
// Schema
// =============================================================================

fn users() -> Table {
    Table::new("users")
        .field(
            Field::new("id", DataType::Int)
                .size(64)
                .primary_key()
                .auto_increment(),
        )
        .field(Field::new("username", DataType::String).not_null().unique())
        .field(Field::new("email", DataType::String).size(255).not_null())
        .field(Field::new("is_active", DataType::Bool).default_value("1"))
        .field(Field::new("created_at", DataType::Time))
        .index(Index::new("idx_users_username", &["username"]).unique())
}

fn posts() -> Table {
    Table::new("posts")
        .field(
            Field::new("id", DataType::Int)
                .size(64)
                .primary_key()
                .auto_increment(),
        )
        .field(Field::new("author_id", DataType::Int).size(64).not_null())
        .field(Field::new("title", DataType::String).size(200).not_null())
        .field(Field::new("body", DataType::String))
        .field(Field::new("views", DataType::Int).size(32).default_value("0"))
        .index(Index::new("idx_posts_author", &["author_id"]))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = Config {
        default_string_size: 100,
        conn: Some(Arc::new(PrintingPool) as Arc<dyn ConnPool>),
        ..Config::default()
    };
    let db = Db::open(FirebirdDialect::new(config), Drivers::new())?;

    println!("-- schema");
    db.migrator().create_table(&[users(), posts()])?;

    println!("\n-- data");
    let mut ann = Record::new();
    ann.insert("username".into(), "ann".into());
    ann.insert("email".into(), "ann@example.com".into());
    let mut bob = Record::new();
    bob.insert("username".into(), "bob".into());
    bob.insert("email".into(), "bob@example.com".into());
    bob.insert("is_active".into(), false.into());
    db.create(&users(), &[ann, bob])?;

    println!("\n-- third page of recent posts");
    db.find(
        &posts(),
        FindOptions::new()
            .filter(Expr::new("\"views\" > ?").bind(10))
            .order_by("id", true)
            .limit(Limit::new(10).offset(20)),
    )?;

    println!("\n-- teardown");
    db.migrator().drop_table(&[users(), posts()])?;

    Ok(())
}
