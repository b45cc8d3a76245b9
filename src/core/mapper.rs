//! The record mapper facade.

use crate::core::predicate::Predicate;
use crate::core::record::Record;
use crate::core::sql;
use crate::db::schema::{ColumnDef, ColumnInfo, Schema};
use crate::db::Connection;
use crate::error::{Error, Result};
use rusqlite::types::Value;
use rusqlite::ToSql;
use std::path::Path;
use tracing::debug;

/// CRUD over record types, with all SQL generated from introspected column
/// metadata.
///
/// Operations are synchronous and take `&mut self`; every mutating call
/// commits immediately, except `insert_many` which commits once for the whole
/// batch.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Get the underlying connection.
    pub fn conn(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Create a table idempotently with a synthetic identity column and
    /// return its schema.
    pub fn create_table(&mut self, table: &str, defs: &[ColumnDef]) -> Result<Vec<ColumnInfo>> {
        Schema::create_table(&mut self.conn, table, defs, "")
    }

    /// `create_table` with extra SQL appended after the column list.
    pub fn create_table_with(
        &mut self,
        table: &str,
        defs: &[ColumnDef],
        extra_sql: &str,
    ) -> Result<Vec<ColumnInfo>> {
        Schema::create_table(&mut self.conn, table, defs, extra_sql)
    }

    /// Drop the given table if it exists.
    pub fn drop_table(&mut self, table: &str) -> Result<()> {
        Schema::drop_table(&mut self.conn, table)
    }

    /// Create a trigger from its name and raw body.
    pub fn create_trigger(&mut self, name: &str, body: &str) -> Result<()> {
        Schema::create_trigger(&mut self.conn, name, body)
    }

    /// Introspect a table's columns in canonical order.
    pub fn table_info(&mut self, table: &str) -> Result<Vec<ColumnInfo>> {
        Schema::table_info(&mut self.conn, table)
    }

    /// Column names in canonical order.
    pub fn table_columns(&mut self, table: &str) -> Result<Vec<String>> {
        Schema::table_columns(&mut self.conn, table)
    }

    /// Non-identity column names in canonical order.
    fn data_columns(&mut self, table: &str) -> Result<Vec<String>> {
        Ok(Schema::table_info(&mut self.conn, table)?
            .into_iter()
            .filter(|c| !c.primary_key)
            .map(|c| c.name)
            .collect())
    }

    /// Insert (or replace) a single record; returns the stored row id.
    ///
    /// Binds every non-identity column positionally in canonical order and
    /// commits immediately.
    pub fn insert_one<R: Record>(&mut self, table: &str, record: &R) -> Result<i64> {
        let data = self.data_columns(table)?;
        let cols: Vec<&str> = data.iter().map(String::as_str).collect();
        let sql = sql::insert(table, &cols, true);
        debug!(table, %sql, "insert_one");

        let values = record_values(record, &cols)?;
        let params = borrow_params(&values);
        self.conn.execute(&sql, &params)?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert many records with one prepared statement inside a single
    /// transaction; returns the number of rows inserted.
    pub fn insert_many<R: Record>(&mut self, table: &str, records: &[R]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let data = self.data_columns(table)?;
        let cols: Vec<&str> = data.iter().map(String::as_str).collect();
        let sql = sql::insert(table, &cols, false);
        debug!(table, %sql, rows = records.len(), "insert_many");

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for record in records {
                let values = record_values(record, &cols)?;
                stmt.execute(rusqlite::params_from_iter(values))?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Select records matching the predicate (all records when it is empty).
    pub fn select<R: Record>(&mut self, table: &str, predicate: &Predicate) -> Result<Vec<R>> {
        let all = Schema::table_columns(&mut self.conn, table)?;
        let cols: Vec<&str> = all.iter().map(String::as_str).collect();
        let sql = sql::select(table, &cols, &predicate.columns());
        debug!(table, %sql, "select");

        let values = predicate.values();
        let params = borrow_params(&values);
        self.conn.query(&sql, &params, |row| R::from_row(row))
    }

    /// Select all records from the given table.
    pub fn select_all<R: Record>(&mut self, table: &str) -> Result<Vec<R>> {
        self.select(table, &Predicate::new())
    }

    /// Overwrite every non-identity column of matching rows with the record's
    /// values; returns the number of rows changed.
    pub fn update<R: Record>(
        &mut self,
        table: &str,
        record: &R,
        predicate: &Predicate,
    ) -> Result<usize> {
        if predicate.is_empty() {
            return Err(Error::EmptyPredicate);
        }
        let data = self.data_columns(table)?;
        let cols: Vec<&str> = data.iter().map(String::as_str).collect();
        let sql = sql::update(table, &cols, &predicate.columns());
        debug!(table, %sql, "update");

        let mut values = record_values(record, &cols)?;
        values.extend(predicate.values());
        let params = borrow_params(&values);
        self.conn.execute(&sql, &params)
    }

    /// Delete rows matching the predicate; returns the number of rows removed.
    pub fn delete(&mut self, table: &str, predicate: &Predicate) -> Result<usize> {
        if predicate.is_empty() {
            return Err(Error::EmptyPredicate);
        }
        let sql = sql::delete(table, &predicate.columns());
        debug!(table, %sql, "delete");

        let values = predicate.values();
        let params = borrow_params(&values);
        self.conn.execute(&sql, &params)
    }

    /// Delete every row in the given table.
    pub fn delete_all(&mut self, table: &str) -> Result<usize> {
        // Introspect first so a missing table errors the same way as delete
        Schema::table_info(&mut self.conn, table)?;
        let sql = sql::delete(table, &[]);
        debug!(table, %sql, "delete_all");
        self.conn.execute(&sql, &[])
    }
}

/// Collect a record's values for the given columns in order.
fn record_values<R: Record>(record: &R, columns: &[&str]) -> Result<Vec<Value>> {
    columns.iter().map(|c| record.value(c)).collect()
}

fn borrow_params(values: &[Value]) -> Vec<&dyn ToSql> {
    values.iter().map(|v| v as &dyn ToSql).collect()
}
