//! Dynamic SQL synthesis.
//!
//! Every statement the mapper executes is built here from the table's column
//! list, so statement shape and positional parameter order are decided in one
//! place. Column order always comes from introspection (`PRAGMA table_info`),
//! which keeps the mapper and the engine agreeing on binding positions.

/// Quote an identifier for safe interpolation into SQL text.
///
/// SQLite identifier quoting: wrap in double quotes, double any embedded
/// quote characters.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build the `a = ? AND b = ?` tail of an equality WHERE clause.
fn where_clause(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| format!("{} = ?", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Build an INSERT statement binding the given columns positionally.
pub fn insert(table: &str, columns: &[&str], or_replace: bool) -> String {
    let verb = if or_replace {
        "INSERT OR REPLACE"
    } else {
        "INSERT"
    };
    let names = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "{verb} INTO {} ({names}) VALUES ({placeholders})",
        quote_ident(table)
    )
}

/// Build a SELECT with an explicit column list and an optional equality WHERE.
pub fn select(table: &str, columns: &[&str], predicate_columns: &[&str]) -> String {
    let names = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let mut sql = format!("SELECT {names} FROM {}", quote_ident(table));
    if !predicate_columns.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_clause(predicate_columns));
    }
    sql
}

/// Build an UPDATE overwriting the given columns on rows matching the predicate.
pub fn update(table: &str, columns: &[&str], predicate_columns: &[&str]) -> String {
    let assignments = columns
        .iter()
        .map(|c| format!("{} = ?", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {assignments} WHERE {}",
        quote_ident(table),
        where_clause(predicate_columns)
    )
}

/// Build a DELETE; an empty predicate list deletes every row.
pub fn delete(table: &str, predicate_columns: &[&str]) -> String {
    let mut sql = format!("DELETE FROM {}", quote_ident(table));
    if !predicate_columns.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_clause(predicate_columns));
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("locations"), "\"locations\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_insert() {
        assert_eq!(
            insert("locations", &["ref", "name"], false),
            "INSERT INTO \"locations\" (\"ref\", \"name\") VALUES (?, ?)"
        );
        assert_eq!(
            insert("locations", &["ref"], true),
            "INSERT OR REPLACE INTO \"locations\" (\"ref\") VALUES (?)"
        );
    }

    #[test]
    fn test_select_with_predicate() {
        assert_eq!(
            select("locations", &["id", "ref"], &["ref", "name"]),
            "SELECT \"id\", \"ref\" FROM \"locations\" WHERE \"ref\" = ? AND \"name\" = ?"
        );
    }

    #[test]
    fn test_select_without_predicate() {
        assert_eq!(
            select("locations", &["id", "ref"], &[]),
            "SELECT \"id\", \"ref\" FROM \"locations\""
        );
    }

    #[test]
    fn test_update() {
        assert_eq!(
            update("locations", &["ref", "name"], &["id"]),
            "UPDATE \"locations\" SET \"ref\" = ?, \"name\" = ? WHERE \"id\" = ?"
        );
    }

    #[test]
    fn test_delete() {
        assert_eq!(
            delete("locations", &["ref"]),
            "DELETE FROM \"locations\" WHERE \"ref\" = ?"
        );
        assert_eq!(delete("locations", &[]), "DELETE FROM \"locations\"");
    }
}
