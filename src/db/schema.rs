//! Table metadata and DDL operations.

use crate::core::sql::quote_ident;
use crate::db::Connection;
use crate::error::{Error, Result};
use rusqlite::Row;

/// Name of the synthetic identity column added to every mapped table.
pub const ID_COLUMN: &str = "id";

/// A caller-supplied column definition for `create_table`.
///
/// The declaration is raw SQL appended after the column name, e.g.
/// `"TEXT NOT NULL UNIQUE"`.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub decl: String,
}

impl ColumnDef {
    /// Create a column definition from a name and a raw SQL declaration.
    pub fn new(name: impl Into<String>, decl: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decl: decl.into(),
        }
    }
}

/// One column as reported by `PRAGMA table_info`.
///
/// The `cid` order is the canonical column order used for positional
/// parameter binding throughout the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub default: Option<String>,
    pub primary_key: bool,
}

impl ColumnInfo {
    /// Create a ColumnInfo from a `PRAGMA table_info` row.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let pk: i64 = row.get("pk")?;
        Ok(Self {
            cid: row.get("cid")?,
            name: row.get("name")?,
            decl_type: row.get("type")?,
            not_null: row.get("notnull")?,
            default: row.get("dflt_value")?,
            primary_key: pk > 0,
        })
    }
}

/// DDL and introspection over mapped tables.
pub struct Schema;

impl Schema {
    /// Introspect a table's columns in canonical (cid) order.
    ///
    /// Returns `NoSuchTable` when the pragma reports no columns.
    pub fn table_info(conn: &mut Connection, table: &str) -> Result<Vec<ColumnInfo>> {
        // PRAGMA targets cannot be bound as parameters
        let sql = format!("PRAGMA table_info({})", quote_ident(table));
        let columns = conn.query(&sql, &[], ColumnInfo::from_row)?;
        if columns.is_empty() {
            return Err(Error::NoSuchTable(table.to_string()));
        }
        Ok(columns)
    }

    /// Column names in canonical order.
    pub fn table_columns(conn: &mut Connection, table: &str) -> Result<Vec<String>> {
        Ok(Self::table_info(conn, table)?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    /// Create a table idempotently with a synthetic integer identity column
    /// prepended, then return its introspected schema.
    ///
    /// `extra_sql` is appended verbatim after the closing parenthesis, for
    /// table options.
    pub fn create_table(
        conn: &mut Connection,
        table: &str,
        defs: &[ColumnDef],
        extra_sql: &str,
    ) -> Result<Vec<ColumnInfo>> {
        let mut body = format!("{ID_COLUMN} INTEGER PRIMARY KEY");
        for def in defs {
            body.push_str(", ");
            body.push_str(&quote_ident(&def.name));
            body.push(' ');
            body.push_str(&def.decl);
        }
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({body}){extra_sql}",
            quote_ident(table)
        );
        tracing::debug!(table, %sql, "create_table");
        conn.execute(&sql, &[])?;
        Self::table_info(conn, table)
    }

    /// Drop the given table if it exists.
    pub fn drop_table(conn: &mut Connection, table: &str) -> Result<()> {
        let sql = format!("DROP TABLE IF EXISTS {}", quote_ident(table));
        tracing::debug!(table, %sql, "drop_table");
        conn.execute(&sql, &[])?;
        Ok(())
    }

    /// Create a trigger from its name and raw body.
    pub fn create_trigger(conn: &mut Connection, name: &str, body: &str) -> Result<()> {
        let sql = format!("CREATE TRIGGER {} {body}", quote_ident(name));
        tracing::debug!(trigger = name, %sql, "create_trigger");
        conn.execute(&sql, &[])?;
        Ok(())
    }
}
