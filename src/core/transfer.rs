//! CSV import and export.
//!
//! The header row carries the table's column names in canonical order.
//! Export writes raw row values; import deserializes each row into the record
//! type via serde and bulk-inserts, so the identity column in the file (if
//! any) is ignored and the engine reassigns ids.

use crate::core::mapper::Database;
use crate::core::record::Record;
use crate::core::sql;
use crate::error::{Error, Result};
use rusqlite::types::Value;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Render a single value as a CSV field.
///
/// Null becomes the empty field (round-trips to `None` through serde);
/// blobs have no faithful text form and are rejected.
fn csv_field(column: &str, value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Real(r) => Ok(r.to_string()),
        Value::Text(t) => Ok(t.clone()),
        Value::Blob(_) => Err(Error::BlobInCsv(column.to_string())),
    }
}

impl Database {
    /// Export every row of a table to a CSV file; returns the row count.
    pub fn export_csv<P: AsRef<Path>>(&mut self, table: &str, path: P) -> Result<usize> {
        let all = self.table_columns(table)?;
        let cols: Vec<&str> = all.iter().map(String::as_str).collect();
        let stmt = sql::select(table, &cols, &[]);
        debug!(table, sql = %stmt, "export_csv");

        let width = cols.len();
        let rows: Vec<Vec<Value>> = self.conn().query(&stmt, &[], |row| {
            (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<Value>>>()
        })?;

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&cols)?;
        let count = rows.len();
        for row in rows {
            let fields = cols
                .iter()
                .zip(row.iter())
                .map(|(c, v)| csv_field(c, v))
                .collect::<Result<Vec<String>>>()?;
            writer.write_record(&fields)?;
        }
        writer.flush()?;
        Ok(count)
    }

    /// Import records from a headered CSV file via `insert_many`; returns the
    /// number of rows inserted.
    pub fn import_csv<R, P>(&mut self, table: &str, path: P) -> Result<usize>
    where
        R: Record + DeserializeOwned,
        P: AsRef<Path>,
    {
        let mut reader = csv::Reader::from_path(path)?;
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<R>, csv::Error>>()?;
        debug!(table, rows = records.len(), "import_csv");
        self.insert_many(table, &records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::test_support::Location;
    use crate::db::schema::ColumnDef;
    use std::fs;

    fn setup() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        db.create_table(
            "locations",
            &[
                ColumnDef::new("ref", "TEXT NOT NULL UNIQUE"),
                ColumnDef::new("name", "TEXT NOT NULL UNIQUE"),
                ColumnDef::new("postcode", "TEXT NOT NULL"),
            ],
        )
        .unwrap();
        db
    }

    #[test]
    fn test_export_header_and_rows() {
        let mut db = setup();
        db.insert_many(
            "locations",
            &[
                Location::new("lrh", "Louisa Ryland House", "B3 3PL"),
                Location::new("town", "Town Hall", "B3 3DQ"),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.csv");
        let exported = db.export_csv("locations", &path).unwrap();
        assert_eq!(exported, 2);

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("id,ref,name,postcode"));
        assert_eq!(lines.next(), Some("1,lrh,Louisa Ryland House,B3 3PL"));
        assert_eq!(lines.next(), Some("2,town,Town Hall,B3 3DQ"));
    }

    #[test]
    fn test_export_empty_table() {
        let mut db = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        assert_eq!(db.export_csv("locations", &path).unwrap(), 0);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), "id,ref,name,postcode");
    }

    #[test]
    fn test_import() {
        let mut db = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(
            &path,
            "ref,name,postcode\nlrh,Louisa Ryland House,B3 3PL\ntown,Town Hall,B3 3DQ\n",
        )
        .unwrap();

        let imported = db.import_csv::<Location, _>("locations", &path).unwrap();
        assert_eq!(imported, 2);

        let all: Vec<Location> = db.select_all("locations").unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].r#ref, "lrh");
    }

    #[test]
    fn test_round_trip_reassigns_ids() {
        let mut db = setup();
        db.insert_one("locations", &Location::new("lrh", "Louisa Ryland House", "B3 3PL"))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        db.export_csv("locations", &path).unwrap();

        db.delete_all("locations").unwrap();
        db.import_csv::<Location, _>("locations", &path).unwrap();

        let all: Vec<Location> = db.select_all("locations").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].r#ref, "lrh");
        assert_eq!(all[0].postcode, "B3 3PL");
        assert!(all[0].id.is_some());
    }

    #[test]
    fn test_export_rejects_blobs() {
        let mut db = Database::open_in_memory().unwrap();
        db.create_table("files", &[ColumnDef::new("data", "BLOB")])
            .unwrap();
        db.conn()
            .execute(
                "INSERT INTO files (data) VALUES (?)",
                &[&vec![0u8, 1, 2] as &dyn rusqlite::ToSql],
            )
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("files.csv");
        let result = db.export_csv("files", &path);
        assert!(matches!(result, Err(Error::BlobInCsv(c)) if c == "data"));
    }
}
