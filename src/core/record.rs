//! Record trait: mapping between application types and table rows.

use crate::error::Result;
use rusqlite::types::Value;
use rusqlite::Row;

/// A plain application type persisted as a single table row.
///
/// Field names correspond to table columns by name. The synthetic identity
/// column is never requested during binding (the mapper skips primary-key
/// columns), so a record may model it as `Option<i64>` or omit it entirely.
///
/// `value` is the bind side: the mapper asks for each non-identity column in
/// canonical order and binds the returned values positionally. `from_row` is
/// the materialization side and reads columns by name, so it is immune to
/// column-order changes.
pub trait Record: Sized {
    /// Owned SQLite value for the named column.
    ///
    /// Return `Error::UnknownColumn` for a column the record does not carry.
    fn value(&self, column: &str) -> Result<Value>;

    /// Rebuild a record from a fetched row.
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
