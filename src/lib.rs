//! # rowlite - record-to-row mapping over embedded SQLite
//!
//! A minimal convenience layer for persisting plain data types in a single
//! SQLite table. Callers implement the [`Record`] trait (bind a value per
//! column, rebuild from a row); the crate generates parameterized CRUD SQL
//! from the table's introspected column metadata, so mapper and engine always
//! agree on column order.
//!
//! Scope stops at CRUD: table create/drop, trigger creation, single and bulk
//! insert, equality select/update/delete, and CSV import/export. There is no
//! query builder, no relationship mapping, and no migration engine.

pub mod core;
pub mod db;
pub mod error;

// Re-export commonly used types
pub use crate::core::{Database, IntoValue, Predicate, Record};
pub use db::{ColumnDef, ColumnInfo, Connection};
pub use error::{Error, Result};

/// Owned SQLite value, re-exported from rusqlite.
pub use rusqlite::types::Value;
