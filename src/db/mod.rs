//! Database layer: connection management, introspection, and DDL.

pub mod connection;
pub mod schema;

pub use connection::Connection;
pub use schema::{ColumnDef, ColumnInfo, Schema};
