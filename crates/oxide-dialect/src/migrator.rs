//! Schema migrations.
//!
//! [`GenericMigrator`] generates ANSI-style DDL using the database's dialect
//! for column types and quoting. Dialects customise it through [`Config`]
//! rather than reimplementing it.

use tracing::{debug, info};

use crate::clause::{Clause, Limit};
use crate::db::Db;
use crate::driver::ColumnMeta;
use crate::error::{Error, Result};
use crate::schema::{Field, Index, Table};
use crate::value::Value;

/// Schema migration operations.
pub trait Migrator {
    /// Creates missing tables, and missing columns and indexes of existing ones.
    fn auto_migrate(&self, tables: &[Table]) -> Result<()>;

    /// Returns the name of the current database.
    fn current_database(&self) -> Result<String>;

    /// Returns the column type with its NOT NULL, UNIQUE and DEFAULT parts.
    fn full_data_type_of(&self, field: &Field) -> String;

    /// Creates tables.
    fn create_table(&self, tables: &[Table]) -> Result<()>;

    /// Drops tables, in reverse order.
    fn drop_table(&self, tables: &[Table]) -> Result<()>;

    /// Returns whether a table exists.
    fn has_table(&self, name: &str) -> Result<bool>;

    /// Renames a table.
    fn rename_table(&self, old_name: &str, new_name: &str) -> Result<()>;

    /// Adds the column for `field` to the table.
    fn add_column(&self, table: &Table, field: &str) -> Result<()>;

    /// Drops a column.
    fn drop_column(&self, table: &Table, column: &str) -> Result<()>;

    /// Changes a column's type to match its field.
    fn alter_column(&self, table: &Table, field: &str) -> Result<()>;

    /// Returns whether a column exists.
    fn has_column(&self, table: &Table, column: &str) -> Result<bool>;

    /// Renames a column.
    fn rename_column(&self, table: &Table, old_name: &str, new_name: &str) -> Result<()>;

    /// Returns the columns the database reports for the table.
    fn column_types(&self, table: &Table) -> Result<Vec<ColumnMeta>>;

    /// Creates one of the table's indexes.
    fn create_index(&self, table: &Table, name: &str) -> Result<()>;

    /// Drops an index.
    fn drop_index(&self, table: &Table, name: &str) -> Result<()>;

    /// Returns whether an index exists.
    fn has_index(&self, table: &Table, name: &str) -> Result<bool>;

    /// Renames an index.
    fn rename_index(&self, table: &Table, old_name: &str, new_name: &str) -> Result<()>;
}

/// Migrator settings.
#[derive(Debug, Clone, Copy)]
pub struct Config<'a> {
    /// Database the DDL runs against.
    pub db: &'a Db,
    /// Create indexes with separate statements after `CREATE TABLE`
    /// instead of declaring them inline.
    pub create_index_after_create_table: bool,
}

impl<'a> Config<'a> {
    /// Creates settings with inline index creation.
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self {
            db,
            create_index_after_create_table: false,
        }
    }
}

/// Dialect-agnostic migrator.
#[derive(Debug, Clone, Copy)]
pub struct GenericMigrator<'a> {
    config: Config<'a>,
}

impl<'a> GenericMigrator<'a> {
    /// Creates a migrator.
    #[must_use]
    pub const fn new(config: Config<'a>) -> Self {
        Self { config }
    }

    /// Returns the settings.
    #[must_use]
    pub const fn config(&self) -> &Config<'a> {
        &self.config
    }

    fn quote(&self, identifier: &str) -> String {
        let mut out = String::new();
        self.config.db.dialect().quote_to(&mut out, identifier);
        out
    }

    fn quote_list(&self, identifiers: &[String]) -> String {
        let quoted: Vec<String> = identifiers.iter().map(|i| self.quote(i)).collect();
        format!("({})", quoted.join(","))
    }

    fn field<'t>(table: &'t Table, name: &str) -> Result<&'t Field> {
        table.get_field(name).ok_or_else(|| Error::FieldNotFound {
            table: table.name.clone(),
            field: name.to_string(),
        })
    }

    fn index<'t>(table: &'t Table, name: &str) -> Result<&'t Index> {
        table.get_index(name).ok_or_else(|| Error::IndexNotFound {
            table: table.name.clone(),
            index: name.to_string(),
        })
    }

    fn exec(&self, sql: &str) -> Result<()> {
        debug!(sql = %sql, "Executing DDL");
        self.config.db.exec(sql, &[])?;
        Ok(())
    }

    fn exists(&self, sql: &str, vars: &[Value]) -> Result<bool> {
        let result = self.config.db.raw_query(sql, vars)?;
        Ok(result.scalar().and_then(Value::as_i64).unwrap_or(0) > 0)
    }
}

impl Migrator for GenericMigrator<'_> {
    fn auto_migrate(&self, tables: &[Table]) -> Result<()> {
        for table in tables {
            if !self.has_table(&table.name)? {
                self.create_table(std::slice::from_ref(table))?;
                continue;
            }
            for field in &table.fields {
                if !self.has_column(table, &field.name)? {
                    self.add_column(table, &field.name)?;
                }
            }
            for index in &table.indexes {
                if !self.has_index(table, &index.name)? {
                    self.create_index(table, &index.name)?;
                }
            }
        }
        Ok(())
    }

    fn current_database(&self) -> Result<String> {
        let result = self.config.db.raw_query("SELECT DATABASE()", &[])?;
        Ok(result
            .scalar()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    fn full_data_type_of(&self, field: &Field) -> String {
        let mut sql = self.config.db.dialect().data_type_of(field);
        if field.not_null {
            sql.push_str(" NOT NULL");
        }
        if field.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(ref default) = field.default_value {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        sql
    }

    fn create_table(&self, tables: &[Table]) -> Result<()> {
        for table in tables {
            info!(table = %table.name, "Creating table");

            let mut items = Vec::new();
            let mut has_primary_key_in_data_type = false;
            for field in &table.fields {
                let data_type = self.full_data_type_of(field);
                has_primary_key_in_data_type |= data_type.to_uppercase().contains("PRIMARY KEY");
                items.push(format!("{} {}", self.quote(&field.name), data_type));
            }

            let primary_keys: Vec<String> = table.primary_keys().map(|f| f.name.clone()).collect();
            if !has_primary_key_in_data_type && !primary_keys.is_empty() {
                items.push(format!("PRIMARY KEY {}", self.quote_list(&primary_keys)));
            }

            if !self.config.create_index_after_create_table {
                for index in &table.indexes {
                    let class = if index.unique { "UNIQUE " } else { "" };
                    items.push(format!(
                        "{class}INDEX {} {}",
                        self.quote(&index.name),
                        self.quote_list(&index.columns)
                    ));
                }
            }

            self.exec(&format!(
                "CREATE TABLE {} ({})",
                self.quote(&table.name),
                items.join(",")
            ))?;

            if self.config.create_index_after_create_table {
                for index in &table.indexes {
                    self.create_index(table, &index.name)?;
                }
            }
        }
        Ok(())
    }

    fn drop_table(&self, tables: &[Table]) -> Result<()> {
        for table in tables.iter().rev() {
            info!(table = %table.name, "Dropping table");
            self.exec(&format!(
                "DROP TABLE IF EXISTS {} CASCADE",
                self.quote(&table.name)
            ))?;
        }
        Ok(())
    }

    fn has_table(&self, name: &str) -> Result<bool> {
        let database = self.current_database()?;
        self.exists(
            "SELECT count(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ? AND table_type = ?",
            &[database.into(), name.into(), "BASE TABLE".into()],
        )
    }

    fn rename_table(&self, old_name: &str, new_name: &str) -> Result<()> {
        self.exec(&format!(
            "ALTER TABLE {} RENAME TO {}",
            self.quote(old_name),
            self.quote(new_name)
        ))
    }

    fn add_column(&self, table: &Table, field: &str) -> Result<()> {
        let field = Self::field(table, field)?;
        self.exec(&format!(
            "ALTER TABLE {} ADD {} {}",
            self.quote(&table.name),
            self.quote(&field.name),
            self.full_data_type_of(field)
        ))
    }

    fn drop_column(&self, table: &Table, column: &str) -> Result<()> {
        self.exec(&format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.quote(&table.name),
            self.quote(column)
        ))
    }

    fn alter_column(&self, table: &Table, field: &str) -> Result<()> {
        let field = Self::field(table, field)?;
        self.exec(&format!(
            "ALTER TABLE {} ALTER COLUMN {} TYPE {}",
            self.quote(&table.name),
            self.quote(&field.name),
            self.full_data_type_of(field)
        ))
    }

    fn has_column(&self, table: &Table, column: &str) -> Result<bool> {
        let database = self.current_database()?;
        self.exists(
            "SELECT count(*) FROM INFORMATION_SCHEMA.columns WHERE table_schema = ? AND table_name = ? AND column_name = ?",
            &[database.into(), table.name.as_str().into(), column.into()],
        )
    }

    fn rename_column(&self, table: &Table, old_name: &str, new_name: &str) -> Result<()> {
        self.exec(&format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {}",
            self.quote(&table.name),
            self.quote(old_name),
            self.quote(new_name)
        ))
    }

    fn column_types(&self, table: &Table) -> Result<Vec<ColumnMeta>> {
        let db = self.config.db;
        let mut stmt = db.statement();
        stmt.add_clause(Clause::select(&[]));
        stmt.add_clause(Clause::from(table.name.as_str()));
        stmt.add_clause(Clause::limit(Limit::new(1)));
        stmt.build(db.callbacks().query_clauses());
        let (sql, vars) = stmt.into_parts();
        Ok(db.raw_query(&sql, &vars)?.columns)
    }

    fn create_index(&self, table: &Table, name: &str) -> Result<()> {
        let index = Self::index(table, name)?;
        let mut sql = String::from("CREATE ");
        if index.unique {
            sql.push_str("UNIQUE ");
        }
        sql.push_str(&format!(
            "INDEX {} ON {}{}",
            self.quote(&index.name),
            self.quote(&table.name),
            self.quote_list(&index.columns)
        ));
        if let Some(ref condition) = index.condition {
            sql.push_str(" WHERE ");
            sql.push_str(condition);
        }
        self.exec(&sql)
    }

    fn drop_index(&self, table: &Table, name: &str) -> Result<()> {
        self.exec(&format!(
            "DROP INDEX {} ON {}",
            self.quote(name),
            self.quote(&table.name)
        ))
    }

    fn has_index(&self, table: &Table, name: &str) -> Result<bool> {
        let database = self.current_database()?;
        self.exists(
            "SELECT count(*) FROM information_schema.statistics WHERE table_schema = ? AND table_name = ? AND index_name = ?",
            &[database.into(), table.name.as_str().into(), name.into()],
        )
    }

    fn rename_index(&self, table: &Table, old_name: &str, new_name: &str) -> Result<()> {
        self.exec(&format!(
            "ALTER TABLE {} RENAME INDEX {} TO {}",
            self.quote(&table.name),
            self.quote(old_name),
            self.quote(new_name)
        ))
    }
}
