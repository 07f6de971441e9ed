mod cast;

pub use cast::CastError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;

/// A typed member value, as exposed by a filterable item or produced by
/// casting a clause literal to a member's declared type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Value {
    I64(i64),
    F64(f64),
    Bool(bool),
    String(String),
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Compare two values. Same-variant values compare in their domain
    /// order; integers and floats compare numerically across variants.
    /// Returns None for incomparable pairs.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::I64(a), Value::I64(b)) => Some(a.cmp(b)),
            (Value::F64(a), Value::F64(b)) => a.partial_cmp(b),
            (Value::I64(a), Value::F64(b)) => (*a as f64).partial_cmp(b),
            (Value::F64(a), Value::I64(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    I64,
    F64,
    Bool,
    String,
    DateTime,
}

impl ValueType {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::I64(_) => ValueType::I64,
            Value::F64(_) => ValueType::F64,
            Value::Bool(_) => ValueType::Bool,
            Value::String(_) => ValueType::String,
            Value::DateTime(_) => ValueType::DateTime,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::I64(int) => write!(f, "{:?}", int),
            Value::F64(float) => write!(f, "{:?}", float),
            Value::Bool(bool) => write!(f, "{:?}", bool),
            Value::String(string) => write!(f, "{:?}", string),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridql::parse_datetime;

    #[test]
    fn test_compare_same_variant() {
        assert_eq!(Value::I64(1).compare(&Value::I64(2)), Some(Ordering::Less));
        assert_eq!(
            Value::String("b".into()).compare(&Value::String("a".into())),
            Some(Ordering::Greater)
        );
        let earlier = parse_datetime("2023-08-15T20:26:07Z").unwrap();
        let later = parse_datetime("2023-08-15T21:00:00Z").unwrap();
        assert_eq!(
            Value::DateTime(earlier).compare(&Value::DateTime(later)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_compare_numeric_cross_variant() {
        assert_eq!(Value::I64(2).compare(&Value::F64(1.5)), Some(Ordering::Greater));
        assert_eq!(Value::F64(1.5).compare(&Value::I64(2)), Some(Ordering::Less));
    }

    #[test]
    fn test_incomparable_pairs() {
        assert_eq!(Value::String("1".into()).compare(&Value::I64(1)), None);
        assert_eq!(Value::Bool(true).compare(&Value::I64(1)), None);
    }
}
