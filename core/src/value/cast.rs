use super::{Value, ValueType};
use gridql::parse_datetime;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
    #[error("cannot cast from {from:?} to {to:?}")]
    IncompatibleTypes { from: ValueType, to: ValueType },
    #[error("invalid format '{value}' for type {target:?}")]
    InvalidFormat { value: String, target: ValueType },
}

impl Value {
    /// Cast this value to the specified target type.
    pub fn cast_to(&self, target: ValueType) -> Result<Value, CastError> {
        // If already the target type, return clone
        if ValueType::of(self) == target {
            return Ok(self.clone());
        }

        match (self, target) {
            // String conversions - the clause literal path
            (Value::String(s), ValueType::I64) => match s.trim().parse::<i64>() {
                Ok(n) => Ok(Value::I64(n)),
                Err(_) => Err(CastError::InvalidFormat { value: s.clone(), target }),
            },
            (Value::String(s), ValueType::F64) => match s.trim().parse::<f64>() {
                Ok(n) => Ok(Value::F64(n)),
                Err(_) => Err(CastError::InvalidFormat { value: s.clone(), target }),
            },
            (Value::String(s), ValueType::Bool) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
                "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
                _ => Err(CastError::InvalidFormat { value: s.clone(), target }),
            },
            (Value::String(s), ValueType::DateTime) => match parse_datetime(s) {
                Some(dt) => Ok(Value::DateTime(dt)),
                None => Err(CastError::InvalidFormat { value: s.clone(), target }),
            },

            // Numeric widening
            (Value::I64(n), ValueType::F64) => Ok(Value::F64(*n as f64)),

            // To string
            (Value::I64(n), ValueType::String) => Ok(Value::String(n.to_string())),
            (Value::F64(n), ValueType::String) => Ok(Value::String(n.to_string())),
            (Value::Bool(b), ValueType::String) => Ok(Value::String(b.to_string())),
            (Value::DateTime(dt), ValueType::String) => {
                Ok(Value::String(dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()))
            }

            (_, _) => Err(CastError::IncompatibleTypes { from: ValueType::of(self), to: target }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_numeric() {
        assert_eq!(Value::String("30".into()).cast_to(ValueType::I64), Ok(Value::I64(30)));
        assert_eq!(
            Value::String("1.5".into()).cast_to(ValueType::F64),
            Ok(Value::F64(1.5))
        );
        assert!(matches!(
            Value::String("thirty".into()).cast_to(ValueType::I64),
            Err(CastError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_string_to_bool() {
        assert_eq!(Value::String("Yes".into()).cast_to(ValueType::Bool), Ok(Value::Bool(true)));
        assert_eq!(Value::String("0".into()).cast_to(ValueType::Bool), Ok(Value::Bool(false)));
        assert!(Value::String("maybe".into()).cast_to(ValueType::Bool).is_err());
    }

    #[test]
    fn test_string_to_datetime_round_trip() {
        let canonical = "2023-08-15T20:26:07Z";
        let value = Value::String(canonical.into()).cast_to(ValueType::DateTime).unwrap();
        assert_eq!(value.cast_to(ValueType::String), Ok(Value::String(canonical.into())));
    }

    #[test]
    fn test_identity_and_incompatible() {
        assert_eq!(Value::I64(1).cast_to(ValueType::I64), Ok(Value::I64(1)));
        assert_eq!(Value::I64(1).cast_to(ValueType::F64), Ok(Value::F64(1.0)));
        assert!(matches!(
            Value::Bool(true).cast_to(ValueType::DateTime),
            Err(CastError::IncompatibleTypes { .. })
        ));
    }
}
