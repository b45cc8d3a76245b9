//! Equality predicates for select/update/delete.

use rusqlite::types::Value;

/// Conversion into an owned SQLite value for predicate and record binding.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Integer(i64::from(self))
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Real(self)
    }
}

impl IntoValue for bool {
    // SQLite stores booleans as integers
    fn into_value(self) -> Value {
        Value::Integer(i64::from(self))
    }
}

impl IntoValue for Vec<u8> {
    fn into_value(self) -> Value {
        Value::Blob(self)
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

/// An ordered conjunction of column equality terms.
///
/// Terms are ANDed in insertion order; the same order is used for positional
/// parameter binding.
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    terms: Vec<(String, Value)>,
}

impl Predicate {
    /// Empty predicate (matches every row).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality term.
    pub fn eq(mut self, column: impl Into<String>, value: impl IntoValue) -> Self {
        self.terms.push((column.into(), value.into_value()));
        self
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when the predicate has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> Vec<&str> {
        self.terms.iter().map(|(c, _)| c.as_str()).collect()
    }

    /// Bound values in insertion order.
    pub fn values(&self) -> Vec<Value> {
        self.terms.iter().map(|(_, v)| v.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_predicate() {
        let pred = Predicate::new();
        assert!(pred.is_empty());
        assert_eq!(pred.len(), 0);
        assert!(pred.columns().is_empty());
    }

    #[test]
    fn test_terms_keep_insertion_order() {
        let pred = Predicate::new().eq("ref", "lrh").eq("postcode", "B3 3PL");
        assert_eq!(pred.columns(), vec!["ref", "postcode"]);
        assert_eq!(
            pred.values(),
            vec![
                Value::Text("lrh".to_string()),
                Value::Text("B3 3PL".to_string())
            ]
        );
    }

    #[test]
    fn test_into_value_conversions() {
        assert_eq!(42i64.into_value(), Value::Integer(42));
        assert_eq!(7i32.into_value(), Value::Integer(7));
        assert_eq!(true.into_value(), Value::Integer(1));
        assert_eq!(1.5f64.into_value(), Value::Real(1.5));
        assert_eq!("x".into_value(), Value::Text("x".to_string()));
        assert_eq!(None::<i64>.into_value(), Value::Null);
        assert_eq!(Some("x").into_value(), Value::Text("x".to_string()));
        assert_eq!(vec![1u8, 2].into_value(), Value::Blob(vec![1, 2]));
    }
}
